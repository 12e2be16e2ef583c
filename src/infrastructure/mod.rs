//! Infrastructure layer - external concerns

pub mod database;

pub use database::repositories::UserRepository;
pub use database::{init_database, DatabaseConfig};
