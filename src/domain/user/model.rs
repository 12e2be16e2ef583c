use chrono::NaiveDate;

/// Stored user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Assigned by the backend on insert, never changed afterwards
    pub id: i32,
    pub name: String,
    /// Calendar date without time-of-day or timezone
    pub dob: NaiveDate,
}
