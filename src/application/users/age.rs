//! Calendar helpers for the `dob` field

use chrono::{Datelike, NaiveDate};

use crate::domain::{DomainError, DomainResult};

/// Wire format of `dob` in both directions
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date of birth.
///
/// Exactly four year digits and two each for month and day; no sign,
/// padding or surrounding whitespace.
pub fn parse_dob(raw: &str) -> DomainResult<NaiveDate> {
    if !has_dob_shape(raw) {
        return Err(DomainError::Validation(
            "dob must be a valid YYYY-MM-DD date".to_string(),
        ));
    }

    NaiveDate::parse_from_str(raw, DOB_FORMAT).map_err(|e| {
        DomainError::Validation(format!("dob must be a valid YYYY-MM-DD date: {}", e))
    })
}

fn has_dob_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub fn format_dob(dob: NaiveDate) -> String {
    dob.format(DOB_FORMAT).to_string()
}

/// Whole years between `dob` and `today`.
///
/// One less than the year difference while `today`'s (month, day) is still
/// before the birthday. A 29 February birthday counts as not yet reached on
/// 28 February of a common year.
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}
