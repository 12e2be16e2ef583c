use async_trait::async_trait;

use super::{CreateUserDto, UpdateUserDto, User};
use crate::domain::DomainResult;

/// Persistence port for user records.
///
/// Implementations report a missing row as [`DomainError::NotFound`]
/// and every backend failure as [`DomainError::Storage`]. Dropping a
/// returned future must abort the backend call.
///
/// [`DomainError::NotFound`]: crate::domain::DomainError::NotFound
/// [`DomainError::Storage`]: crate::domain::DomainError::Storage
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn get_user_by_id(&self, id: i32) -> DomainResult<User>;
    /// All users ordered by ascending id
    async fn list_users(&self) -> DomainResult<Vec<User>>;

    async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<User>;
    async fn delete_user(&self, id: i32) -> DomainResult<()>;
}
