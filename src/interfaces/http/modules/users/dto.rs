//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::users::{format_dob, UserView};

/// User API representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
    /// Date of birth, `YYYY-MM-DD`
    #[schema(example = "1990-01-01")]
    pub dob: String,
    /// Whole years since `dob`, computed at request time (UTC)
    #[schema(example = 34)]
    pub age: i32,
}

impl From<UserView> for UserResponse {
    fn from(u: UserView) -> Self {
        Self {
            id: u.id,
            name: u.name,
            dob: format_dob(u.dob),
            age: u.age,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100, message = "must be between 2 and 100 characters"))]
    #[schema(example = "Alice", min_length = 2, max_length = 100)]
    pub name: String,
    /// `YYYY-MM-DD`
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "1990-01-01")]
    pub dob: String,
}

/// Update user request; replaces both fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100, message = "must be between 2 and 100 characters"))]
    #[schema(example = "Alice", min_length = 2, max_length = 100)]
    pub name: String,
    /// `YYYY-MM-DD`
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "1990-01-01")]
    pub dob: String,
}
