use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{response, validation::FieldErrors};

pub const VALIDATION_FAILED: &str = "Validation failed";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", VALIDATION_FAILED)]
    Validation(FieldErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error(transparent)]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                response::validation_error_with_data(VALIDATION_FAILED, errors)
            }
            AppError::BadRequest(msg) => response::error_response(StatusCode::BAD_REQUEST, &msg),
            AppError::PayloadTooLarge(limit) => response::error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                &format!("Request body exceeds {} bytes", limit),
            ),
            AppError::InternalServerError(err) => {
                tracing::error!("Internal server error: {:?}", err);
                response::error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}
