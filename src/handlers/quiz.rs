// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    error::AppError,
    models::quiz::{TestDefinition, TestListResponse},
    store::{StoreError, TestStore},
};

fn decode_definition(body: &[u8]) -> Option<TestDefinition> {
    serde_json::from_slice(body)
        .map_err(|e| tracing::warn!("Rejected test payload: {}", e))
        .ok()
}

/// Submits a test to the test module.
///
/// * 400 if the body is not a test definition (nothing is spawned).
/// * 500 with the module's output under `details` if it fails.
/// * 200 with the module's raw output otherwise.
pub async fn submit_test(
    State(store): State<Arc<dyn TestStore>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let test = decode_definition(&body)
        .ok_or_else(|| AppError::BadRequest("Invalid input".to_string()))?;

    match store.submit(&test).await {
        Ok(output) => Ok(Json(json!({
            "message": "Test saved successfully",
            "output": output,
        }))
        .into_response()),
        Err(e) => {
            tracing::error!("Test module failed on submit: {}", e);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to process test",
                    "details": e.output(),
                })),
            )
                .into_response())
        }
    }
}

/// Creates a test through the test module.
///
/// Same flow as `submit_test`; failures also report the failure reason
/// under `error` next to the module output.
pub async fn create_test(
    State(store): State<Arc<dyn TestStore>>,
    body: Bytes,
) -> Response {
    let Some(input) = decode_definition(&body) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Invalid input" })),
        )
            .into_response();
    };

    match store.submit(&input).await {
        Ok(output) => Json(json!({
            "message": "Test processed successfully",
            "output": output,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Test module failed on create: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "message": "Test module execution failed",
                    "error": e.to_string(),
                    "output": e.output(),
                })),
            )
                .into_response()
        }
    }
}

/// Lists all tests known to the test module.
///
/// Module output is never echoed back on failure.
pub async fn list_tests(State(store): State<Arc<dyn TestStore>>) -> Response {
    match store.list().await {
        Ok(tests) => Json(TestListResponse { tests }).into_response(),
        Err(e @ StoreError::Decode(_)) => {
            tracing::error!("Failed to parse test data: {}", e);
            internal_error("Failed to parse test data")
        }
        Err(e) => {
            tracing::error!("Failed to fetch tests: {}", e);
            internal_error("Failed to fetch tests")
        }
    }
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
