use chrono::{DateTime, Utc};
use tariff_shared::{Member, Venue};

/// Purchasing context a price is computed for.
///
/// `timestamp` is the instant ages are derived at. Pass it explicitly to get
/// reproducible results; `PricingContext::now` reads the system clock.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    pub venue: &'a Venue,
    pub member: &'a Member,
    pub timestamp: DateTime<Utc>,
}

impl<'a> PricingContext<'a> {
    pub fn new(venue: &'a Venue, member: &'a Member, timestamp: DateTime<Utc>) -> Self {
        Self {
            venue,
            member,
            timestamp,
        }
    }

    pub fn now(venue: &'a Venue, member: &'a Member) -> Self {
        Self::new(venue, member, Utc::now())
    }

    pub fn member_age(&self) -> i32 {
        self.member.age_at(self.timestamp)
    }
}
