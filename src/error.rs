use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("You have already booked this slot")]
    AlreadyBooked,
    #[error("This slot is no longer available. All spots are booked")]
    SlotFull,
    #[error("This booking belongs to another user")]
    NotOwner,
    #[error("This booking cannot be cancelled")]
    NotCancellable,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal server error")]
    Internal,
}

/// Unique-constraint violation, either backend.
/// 2067 = SQLite SQLITE_CONSTRAINT_UNIQUE, 23505 = PostgreSQL unique_violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        let code = db_err.code().unwrap_or_default();
        return code == "2067" || code == "23505";
    }
    false
}

/// Transient lock/serialization failure the caller may retry.
/// 40001 = PostgreSQL serialization_failure, 5/517 = SQLITE_BUSY variants.
pub fn is_retryable_conflict(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        let code = db_err.code().unwrap_or_default();
        return code == "40001" || code == "5" || code == "517";
    }
    false
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if is_unique_violation(e) {
                    return (
                        StatusCode::CONFLICT,
                        Json(json!({ "error": "Resource already exists (duplicate entry)" }))
                    ).into_response();
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::AlreadyBooked => (StatusCode::CONFLICT, self.to_string()),
            AppError::SlotFull => (StatusCode::CONFLICT, self.to_string()),
            AppError::NotOwner => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::NotCancellable => (StatusCode::CONFLICT, self.to_string()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
