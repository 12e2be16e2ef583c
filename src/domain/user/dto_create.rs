use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub dob: NaiveDate,
}
