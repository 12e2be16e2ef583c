//! Application layer: use cases orchestrating domain ports

pub mod users;

pub use users::{UserService, UserView};
