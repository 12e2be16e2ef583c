//! Test doubles shared by unit tests

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(y: i32, m: u32, d: u32, hour: u32, min: u32) -> Self {
        Self(Utc.with_ymd_and_hms(y, m, d, hour, min, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
