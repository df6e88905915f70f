//! Issue endpoints. Persistence lives elsewhere; these acknowledge the
//! validated, sanitized payload so callers see exactly what would be stored.

use axum::{extract::Extension, response::Response};

use crate::{middleware::ValidatedBody, response};

const OPERATION_SUCCESS: &str = "Operation success";

pub async fn create_issue(Extension(ValidatedBody(payload)): Extension<ValidatedBody>) -> Response {
    tracing::info!(fields = payload.len(), "Issue create accepted");
    response::success_response_with_data(OPERATION_SUCCESS, payload)
}

pub async fn update_issue(Extension(ValidatedBody(payload)): Extension<ValidatedBody>) -> Response {
    tracing::info!(issue_no = ?payload.get("issueNo"), "Issue update accepted");
    response::success_response_with_data(OPERATION_SUCCESS, payload)
}

pub async fn delete_issue(Extension(ValidatedBody(payload)): Extension<ValidatedBody>) -> Response {
    tracing::info!(issue_no = ?payload.get("issueNo"), "Issue delete accepted");
    response::success_response_with_data(OPERATION_SUCCESS, payload)
}

pub async fn check_user_id(Extension(ValidatedBody(payload)): Extension<ValidatedBody>) -> Response {
    response::success_response_with_data(OPERATION_SUCCESS, payload)
}

pub async fn health() -> Response {
    response::success_response_with_data("ok", serde_json::json!({ "status": "up" }))
}
