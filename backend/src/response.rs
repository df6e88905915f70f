//! JSON envelope shared by every response: `{ success, message, data }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data,
        }
    }
}

pub fn success_response_with_data<T: Serialize>(message: &str, data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::ok(message, data))).into_response()
}

/// 400 with the error list under `data`.
pub fn validation_error_with_data<T: Serialize>(message: &str, data: T) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::failure(message, Some(data))),
    )
        .into_response()
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiResponse::<()>::failure(message, None))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn validation_error_with_data_wraps_list() {
        let response =
            validation_error_with_data("Validation failed", json!([{ "field": "userId" }]));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Validation failed");
        assert_eq!(json["data"][0]["field"], "userId");
    }

    #[tokio::test]
    async fn success_response_carries_data() {
        let response = success_response_with_data("Operation success", json!({ "issueNo": "1" }));
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["issueNo"], "1");
    }

    #[tokio::test]
    async fn error_response_omits_data() {
        let response = error_response(StatusCode::NOT_FOUND, "missing");
        let json = response_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
    }
}
