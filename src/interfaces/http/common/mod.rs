//! Shared HTTP building blocks: error body, extractors

pub mod error;
pub mod user_id;
pub mod validated_json;

pub use error::{ApiError, ErrorResponse, INVALID_BODY, INVALID_USER_ID, USER_NOT_FOUND};
pub use user_id::UserIdPath;
pub use validated_json::ValidatedJson;
