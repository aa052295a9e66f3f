use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pii::Masked;

/// A venue where a product is sold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub location: String,
}

/// A member buying at a venue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: Masked<NaiveDate>,
    pub membership_type: String,
}

impl Member {
    /// Whole years elapsed between the date of birth and the calendar date of `instant` (UTC).
    ///
    /// A birthday counts only once its month and day have been reached, so someone born on
    /// 29 February turns a year older on 1 March in non-leap years.
    pub fn age_at(&self, instant: DateTime<Utc>) -> i32 {
        let dob = self.date_of_birth.expose();
        let today = instant.date_naive();

        let mut years = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        years
    }
}
