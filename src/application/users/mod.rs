//! Users module: create, read, update and delete user records
//!
//! `UserService` owns the only business rule of the system: the age
//! derived from a date of birth.

pub mod age;
pub mod service;
pub mod view;

pub use age::{calculate_age, format_dob, parse_dob, DOB_FORMAT};
pub use service::UserService;
pub use view::UserView;
