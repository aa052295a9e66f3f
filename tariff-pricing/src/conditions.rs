use tariff_catalog::{Condition, PricingModifier};

use crate::context::PricingContext;

/// Decides whether a modifier applies to a purchasing context
pub trait EligibilityCheck: Send + Sync {
    fn check_conditions(&self, modifier: &PricingModifier, context: &PricingContext<'_>) -> bool;
}

/// Checks every condition of a modifier against the venue and member.
///
/// All conditions must hold; the first failing one ends the check. A modifier
/// without conditions is always eligible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionChecker;

impl ConditionChecker {
    pub fn new() -> Self {
        Self
    }

    fn matches(&self, condition: &Condition, context: &PricingContext<'_>) -> bool {
        match condition {
            Condition::AgeRange(range) => range.contains(context.member_age()),
            Condition::VenueLocations(locations) => locations.contains(&context.venue.location),
            Condition::MembershipTypes(types) => types.contains(&context.member.membership_type),
        }
    }
}

impl EligibilityCheck for ConditionChecker {
    fn check_conditions(&self, modifier: &PricingModifier, context: &PricingContext<'_>) -> bool {
        for condition in &modifier.conditions {
            if !self.matches(condition, context) {
                tracing::trace!(
                    modifier_id = %modifier.id,
                    condition = condition.kind(),
                    "condition not met"
                );
                return false;
            }
        }
        true
    }
}
