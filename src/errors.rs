//! Centralized error handling.
//!
//! Services return typed error kinds; only the `IntoResponse` impl below
//! knows how they map to HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Uniqueness violations on user accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    EmailTaken,
    UsernameTaken,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictKind::EmailTaken => write!(f, "Email is already registered"),
            ConflictKind::UsernameTaken => write!(f, "Username is already taken"),
        }
    }
}

/// Referential or shape violations in a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// The referenced owner does not exist
    UnknownOwner,
    /// A patch named a field outside the allow-list
    UnknownField(String),
    /// A known field carried an unusable value
    InvalidField { field: String, message: String },
    /// Payload could not be decoded or failed declarative validation
    Request(String),
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFailure::UnknownOwner => write!(f, "The specified user does not exist"),
            ValidationFailure::UnknownField(field) => {
                write!(f, "Field '{}' cannot be updated", field)
            }
            ValidationFailure::InvalidField { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
            ValidationFailure::Request(msg) => write!(f, "{}", msg),
        }
    }
}

/// Authentication failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    InvalidCredentials,
    InactiveAccount,
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(ConflictKind),

    #[error("{0}")]
    Validation(ValidationFailure),

    #[error("Invalid credentials")]
    Unauthorized(AuthFailure),

    #[error("Database error")]
    Database(#[from] DbErr),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "INVALID_CREDENTIALS",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Both failure kinds must look identical to the caller
            AppError::Unauthorized(kind) => {
                tracing::warn!(reason = ?kind, "Authentication rejected");
                self.to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &'static str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &'static str) -> AppResult<T> {
        self.ok_or(AppError::NotFound(entity))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(ValidationFailure::Request(msg.into()))
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(ValidationFailure::InvalidField {
            field: field.into(),
            message: message.into(),
        })
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Translate a failed user insert/update into a conflict when the store
    /// rejected it on a unique index.
    pub fn from_user_write(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("email") => {
                AppError::Conflict(ConflictKind::EmailTaken)
            }
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict(ConflictKind::UsernameTaken)
            }
            _ => AppError::Database(err),
        }
    }

    /// Translate a failed note insert/update into an unknown-owner failure when
    /// the store rejected the foreign key.
    pub fn from_note_write(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::Validation(ValidationFailure::UnknownOwner)
            }
            _ => AppError::Database(err),
        }
    }
}
