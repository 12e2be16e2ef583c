//! `/users/{id}` path extractor

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::{ApiError, INVALID_USER_ID};

/// A user id taken from the `{id}` path segment.
///
/// Anything that is not a non-negative 32-bit integer is rejected with
/// 400 before a handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdPath(pub i32);

pub fn parse_user_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id >= 0)
}

impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request(INVALID_USER_ID))?;

        parse_user_id(&raw)
            .map(UserIdPath)
            .ok_or_else(|| ApiError::bad_request(INVALID_USER_ID))
    }
}
