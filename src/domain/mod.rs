//! Domain layer: entities, DTOs, repository ports and errors

pub mod error;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use user::{CreateUserDto, UpdateUserDto, User, UserRepositoryInterface};
