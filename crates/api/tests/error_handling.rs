//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use quill_api::error::AppError;
use quill_core::error::CoreError;
use quill_writer::GenerationError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: every error body carries success=false
// ---------------------------------------------------------------------------

#[tokio::test]
async fn error_bodies_carry_success_false() {
    let (_, json) = error_to_response(AppError::BadRequest("x".into())).await;
    assert_eq!(json["success"], false);
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 and keeps its message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Topic is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Topic is required");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Storage maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn storage_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Storage(
        "connection refused to db.internal:5432".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "STORAGE_ERROR");
    assert_eq!(json["error"], "A storage error occurred");
}

// ---------------------------------------------------------------------------
// Test: GenerationError maps to 500 with a generic message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generation_error_returns_500_and_sanitizes_message() {
    let err = AppError::Generation(GenerationError::Authentication(
        "invalid key sk-abc".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "GENERATION_ERROR");
    assert_eq!(
        json["error"],
        "Failed to generate blog. Please try again later."
    );
}

// ---------------------------------------------------------------------------
// Test: AppError::OperationFailed maps to 500 and keeps its message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn operation_failed_returns_500_with_message() {
    let (status, json) = error_to_response(AppError::OperationFailed("Failed to delete blog")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "OPERATION_FAILED");
    assert_eq!(json["error"], "Failed to delete blog");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: AppError::UnreadableBody keeps its status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn oversized_body_returns_413() {
    let err = AppError::UnreadableBody {
        status: StatusCode::PAYLOAD_TOO_LARGE,
        message: "Failed to buffer the request body: length limit exceeded".into(),
    };

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn non_json_body_returns_415() {
    let err = AppError::UnreadableBody {
        status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
        message: "Expected request with `Content-Type: application/json`".into(),
    };

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["code"], "UNSUPPORTED_MEDIA_TYPE");
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
