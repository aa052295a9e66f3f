pub mod adjustment;
pub mod calculator;
pub mod conditions;
pub mod context;

pub use adjustment::{AdjustmentCalculator, PriceAdjuster, PricingError};
pub use calculator::{Calculator, EligibleModifier, PriceQuote};
pub use conditions::{ConditionChecker, EligibilityCheck};
pub use context::PricingContext;
