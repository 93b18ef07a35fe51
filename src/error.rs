//! Error types for the EMS server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Machine-readable error codes returned alongside every failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 2,
    NoSuchData = 3,
    BadValue = 4,
    Duplicate = 5,
    DeviceNotAvailable = 6,
    LoanAlreadyReturned = 7,
    BrokenReference = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {1}")]
    Conflict(ConflictKind, String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Reason behind a [`AppError::Conflict`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// A unique value (serial number, name) is already taken
    Duplicate,
    /// The device is currently on loan
    DeviceUnavailable,
    /// The loan has already been returned
    AlreadyReturned,
    /// A write would leave a dangling or orphaned foreign key
    BrokenReference,
}

impl ConflictKind {
    fn code(self) -> ErrorCode {
        match self {
            ConflictKind::Duplicate => ErrorCode::Duplicate,
            ConflictKind::DeviceUnavailable => ErrorCode::DeviceNotAvailable,
            ConflictKind::AlreadyReturned => ErrorCode::LoanAlreadyReturned,
            ConflictKind::BrokenReference => ErrorCode::BrokenReference,
        }
    }
}

impl AppError {
    pub fn duplicate(msg: impl Into<String>) -> Self {
        AppError::Conflict(ConflictKind::Duplicate, msg.into())
    }

    /// Convert a failed write into a domain error.
    ///
    /// Unique and foreign-key violations lost at the storage layer surface as
    /// conflicts; anything else stays a database failure.
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            match db.code().as_deref() {
                Some("23505") => {
                    return AppError::duplicate(format!(
                        "Unique constraint violated: {}",
                        db.constraint().unwrap_or("unknown")
                    ));
                }
                Some("23503") => {
                    return AppError::Conflict(
                        ConflictKind::BrokenReference,
                        format!(
                            "Foreign key constraint violated: {}",
                            db.constraint().unwrap_or("unknown")
                        ),
                    );
                }
                _ => {}
            }
        }
        AppError::Database(err)
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(kind, msg) => (StatusCode::CONFLICT, kind.code(), msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::duplicate("x"), StatusCode::CONFLICT),
            (
                AppError::Conflict(ConflictKind::AlreadyReturned, "x".into()),
                StatusCode::CONFLICT,
            ),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_non_constraint_write_error_stays_database() {
        let err = AppError::from_write(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(_)));
    }
}
