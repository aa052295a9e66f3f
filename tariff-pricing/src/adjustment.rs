use rust_decimal::{Decimal, RoundingStrategy};
use tariff_catalog::{Adjustment, PricingModifier};
use uuid::Uuid;

/// Computes the price a single modifier produces from an original price
pub trait PriceAdjuster: Send + Sync {
    fn calculate_price(
        &self,
        original_price: Decimal,
        modifier: &PricingModifier,
    ) -> Result<Decimal, PricingError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Price adjustment of modifier {modifier_id} overflowed (original price {original_price})")]
    Overflow {
        modifier_id: Uuid,
        original_price: Decimal,
    },
}

/// Currency precision used when a multiplier produces sub-penny amounts
pub const CURRENCY_DP: u32 = 2;

/// Stateless adjustment calculator.
///
/// Only multipliers are rounded (half away from zero, to pennies). Fixed deltas and
/// overrides are returned as computed, so inputs already at currency precision stay there.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjustmentCalculator;

impl AdjustmentCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl PriceAdjuster for AdjustmentCalculator {
    fn calculate_price(
        &self,
        original_price: Decimal,
        modifier: &PricingModifier,
    ) -> Result<Decimal, PricingError> {
        let price = match modifier.adjustment {
            Adjustment::Multiplier(ratio) => original_price.checked_mul(ratio).map(|p| {
                p.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
            }),
            Adjustment::Fixed(delta) => original_price.checked_add(delta),
            Adjustment::Override(price) => Some(price),
        };

        price.ok_or(PricingError::Overflow {
            modifier_id: modifier.id,
            original_price,
        })
    }
}
