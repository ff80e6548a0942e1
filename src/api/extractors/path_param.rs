//! Path extractor whose rejections use the standard error body.

use axum::extract::{rejection::PathRejection, FromRequestParts};

use crate::errors::AppError;

/// Drop-in replacement for `axum::extract::Path`.
///
/// An unparsable segment (`/users/abc`) becomes a 400 `VALIDATION_ERROR`
/// instead of axum's plain-text rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}
