use chrono::NaiveDate;

/// Full replacement of the mutable user fields
#[derive(Debug, Clone)]
pub struct UpdateUserDto {
    pub name: String,
    pub dob: NaiveDate,
}
