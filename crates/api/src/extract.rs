//! Extractors that turn axum rejections into [`AppError`] JSON responses.

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::Json;

use crate::error::AppError;

/// `Json<T>` whose rejection (malformed body, missing or unknown field,
/// wrong content type) is a 400 `AppError` payload instead of plain text.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);

/// `Path<T>` with the same JSON rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ValidPath<T>(pub T);
