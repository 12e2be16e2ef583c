use chrono::NaiveDate;

/// A user as returned by the service, with the derived age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: i32,
    pub name: String,
    pub dob: NaiveDate,
    /// Computed on every read, never persisted
    pub age: i32,
}
