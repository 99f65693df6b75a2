use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Service-level errors for the account flow.
///
/// Conflict and InvalidCredentials map to 400 rather than their more usual
/// status codes; callers are expected to read the response envelope, not the
/// status line.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("database error")]
    Database(#[source] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure envelope: every error response carries `success: false` and a
/// user-facing message.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) | AppError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message. Store and hashing failures are logged in full
    /// and replaced with a generic message.
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                "Server error. Please try again later.".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                "Server error. Please try again later.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            message: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Translates store errors. Unique violations become the per-field conflict
/// message, keyed on the constraint names from the users migration.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return match db.constraint() {
                    Some("users_email_key") => {
                        AppError::Conflict("User with this email already exists.".into())
                    }
                    Some("users_username_key") => {
                        AppError::Conflict("Username already taken.".into())
                    }
                    _ => AppError::Conflict("Duplicate value.".into()),
                };
            }
        }
        AppError::Database(e)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_and_validation_map_to_bad_request() {
        assert_eq!(
            AppError::Validation("missing".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("taken".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_and_unauthorized_statuses() {
        assert_eq!(
            AppError::NotFound("User not found.".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("no token".into()).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn internal_errors_hide_detail() {
        let err = AppError::Internal("argon2 exploded".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "Server error. Please try again later.");
    }

    #[test]
    fn error_body_serializes_envelope() {
        let body = ErrorBody {
            success: false,
            message: "Invalid credentials.".into(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains("Invalid credentials."));
    }

    #[test]
    fn row_not_found_is_a_database_error() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
