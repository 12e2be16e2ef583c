//! # User API
//!
//! CRUD REST API for user records. A user has a name and a date of birth;
//! the age is never stored and is computed from the current UTC date on
//! every read.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core entities, errors and the repository trait
//! - **application**: `UserService`, date parsing and age calculation
//! - **infrastructure**: SeaORM connection, entity, schema bootstrap and repository
//! - **interfaces**: HTTP router, extractors and handlers with Swagger documentation
//! - **shared**: Shutdown coordination
//! - **server**: Process lifecycle (`ServerHandle`) and tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, RouterOptions};
