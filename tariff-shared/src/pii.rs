use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for personal data (a member's date of birth, for instance) that never
/// shows its value through `Debug` or `Display`.
///
/// Serialization writes the real value, since the dataset file has to round-trip it.
/// Only formatting is masked, which keeps `tracing::debug!("{:?}", member)` safe.
#[derive(Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_debug_and_display_are_masked() {
        let dob = Masked(NaiveDate::from_ymd_opt(1990, 4, 12).unwrap());

        assert_eq!(format!("{:?}", dob), "********");
        assert_eq!(format!("{}", dob), "********");
        assert_eq!(dob.expose().to_string(), "1990-04-12");
    }

    #[test]
    fn test_serializes_real_value() {
        let dob = Masked(NaiveDate::from_ymd_opt(1990, 4, 12).unwrap());

        let json = serde_json::to_string(&dob).unwrap();
        assert_eq!(json, "\"1990-04-12\"");

        let back: Masked<NaiveDate> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dob);
    }
}
