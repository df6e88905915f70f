//! Body validation middleware.
//!
//! Runs a route's [`RuleSet`] against the JSON body and either forwards the
//! sanitized body to the handler or answers with the collected field errors.

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Request, State},
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::{
    error::AppError,
    validation::{FieldErrors, RuleSet},
};

/// Sanitized body of a request that passed validation.
#[derive(Clone, Debug)]
pub struct ValidatedBody(pub Map<String, Value>);

/// Rule set and body limit for one route.
#[derive(Clone, Debug)]
pub struct RuleGuard {
    rules: Arc<RuleSet>,
    max_body_bytes: usize,
}

impl RuleGuard {
    pub fn new(rules: RuleSet, max_body_bytes: usize) -> Self {
        Self {
            rules: Arc::new(rules),
            max_body_bytes,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

/// Decides the fate of a request from its collected errors.
pub fn validate_result(errors: FieldErrors) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Validates the JSON body against the route's rule set.
///
/// Either the request continues to `next` carrying the sanitized body (also
/// available as a [`ValidatedBody`] extension) or a validation error response
/// is returned and `next` never runs.
pub async fn validate(State(guard): State<RuleGuard>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();
    let method = parts.method.clone();
    let uri = parts.uri.clone();

    let payload = match read_payload(body, guard.max_body_bytes).await {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(%method, %uri, error = %err, "Rejected unreadable request body");
            return err.into_response();
        }
    };

    let validated = guard.rules().evaluate(&payload);
    if let Err(err) = validate_result(validated.errors) {
        if let AppError::Validation(errors) = &err {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            tracing::warn!(%method, %uri, ?fields, "Request failed validation");
        }
        return err.into_response();
    }

    let bytes = match serde_json::to_vec(&validated.sanitized) {
        Ok(bytes) => bytes,
        Err(err) => return AppError::InternalServerError(err.into()).into_response(),
    };
    parts.headers.remove(CONTENT_LENGTH);
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    parts.extensions.insert(ValidatedBody(validated.sanitized));

    tracing::debug!(%method, %uri, "Request passed validation");
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn read_payload(body: Body, limit: usize) -> Result<Map<String, Value>, AppError> {
    let bytes: Bytes = to_bytes(body, limit).await.map_err(|err| {
        if err.into_inner().is::<LengthLimitError>() {
            AppError::PayloadTooLarge(limit)
        } else {
            AppError::BadRequest("Failed to read request body".to_string())
        }
    })?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AppError::BadRequest("Invalid JSON body".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ErrorKind, FieldRule};
    use axum::{
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::post,
        Extension, Json, Router,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    fn guard() -> RuleGuard {
        RuleGuard::new(
            RuleSet::new(vec![FieldRule::body("name")
                .not_empty()
                .trim()
                .message("name is required")]),
            1024,
        )
    }

    fn app(hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/",
                post(
                    |Extension(ValidatedBody(body)): Extension<ValidatedBody>,
                     Json(raw): Json<Value>| async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        assert_eq!(Value::Object(body), raw);
                        "ok"
                    },
                ),
            )
            .layer(from_fn_with_state(guard(), validate))
    }

    fn post_body(body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn validate_result_continues_only_without_errors() {
        assert!(validate_result(FieldErrors::new()).is_ok());

        let mut errors = FieldErrors::new();
        errors.push("name", "name is required", ErrorKind::MissingRequiredField);
        assert!(matches!(
            validate_result(errors),
            Err(AppError::Validation(list)) if list.len() == 1
        ));
    }

    #[tokio::test]
    async fn forwards_sanitized_body_to_next() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(hits.clone())
            .oneshot(post_body(r#"{"name":"  Ada  "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejects_without_calling_next() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(hits.clone()).oneshot(post_body("")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejects_non_object_json() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(hits.clone()).oneshot(post_body("[1,2]")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejects_oversized_body() {
        let hits = Arc::new(AtomicUsize::new(0));
        let big = format!(r#"{{"name":"{}"}}"#, "a".repeat(2048));
        let response = app(hits.clone()).oneshot(post_body(&big)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
