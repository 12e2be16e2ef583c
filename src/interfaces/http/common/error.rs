//! Error responses
//!
//! Every failure leaves the API as `{"error": "<message>"}`. Storage
//! failures are logged here and replaced by a fixed per-operation message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

pub const INVALID_BODY: &str = "invalid request body";
pub const INVALID_USER_ID: &str = "invalid user id";
pub const USER_NOT_FOUND: &str = "user not found";

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description; never contains backend details
    #[schema(example = "user not found")]
    pub error: String,
}

/// An HTTP status plus client-facing message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a service failure of `operation` (e.g. `"update user"`).
    ///
    /// Storage errors are logged with the operation and user id, and the
    /// client only sees `failed to <operation>`.
    pub fn from_domain(err: DomainError, operation: &'static str, user_id: Option<i32>) -> Self {
        match err {
            DomainError::Validation(msg) => Self::bad_request(msg),
            DomainError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, USER_NOT_FOUND),
            DomainError::Storage(detail) => {
                error!(operation, user_id, error = %detail, "Failed to {}", operation);
                Self::internal(format!("failed to {}", operation))
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400_with_message() {
        let err = ApiError::from_domain(
            DomainError::Validation("dob must be a valid YYYY-MM-DD date".into()),
            "create user",
            None,
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "dob must be a valid YYYY-MM-DD date");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from_domain(DomainError::user_not_found(3), "get user", Some(3));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), USER_NOT_FOUND);
    }

    #[test]
    fn storage_detail_is_not_leaked() {
        let err = ApiError::from_domain(
            DomainError::Storage("connection refused (os error 111)".into()),
            "delete user",
            Some(9),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "failed to delete user");
    }
}
