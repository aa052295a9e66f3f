use rust_decimal::Decimal;
use serde::Serialize;
use tariff_catalog::{PricingModifier, Product};
use uuid::Uuid;

use crate::adjustment::{AdjustmentCalculator, PriceAdjuster, PricingError};
use crate::conditions::{ConditionChecker, EligibilityCheck};
use crate::context::PricingContext;

/// A modifier whose conditions were met, with the price it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibleModifier {
    pub modifier: PricingModifier,
    pub price: Decimal,
}

/// Outcome of one best-price computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub product_id: Uuid,
    pub base_price: Decimal,
    pub best_price: Decimal,
    /// Eligible modifiers in evaluation order
    pub eligible: Vec<EligibleModifier>,
}

impl PriceQuote {
    pub fn valid_modifiers(&self) -> &[EligibleModifier] {
        &self.eligible
    }

    pub fn is_discounted(&self) -> bool {
        self.best_price < self.base_price
    }
}

/// Finds the lowest price a product can be sold at in a given context.
///
/// Every eligible modifier is priced against the pricing option's base price; modifiers
/// are alternative offers and never stack. The calculator keeps no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Calculator<C = ConditionChecker, A = AdjustmentCalculator> {
    condition_checker: C,
    adjustment_calculator: A,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C, A> Calculator<C, A>
where
    C: EligibilityCheck,
    A: PriceAdjuster,
{
    pub fn with_collaborators(condition_checker: C, adjustment_calculator: A) -> Self {
        Self {
            condition_checker,
            adjustment_calculator,
        }
    }

    /// Fails only when an adjustment overflows the decimal range.
    pub fn get_best_price(
        &self,
        product: &Product,
        context: &PricingContext<'_>,
    ) -> Result<PriceQuote, PricingError> {
        let pricing_option = &product.pricing_option;
        let base_price = pricing_option.price;

        let mut best_price = base_price;
        let mut eligible = Vec::new();

        for modifier in &pricing_option.modifiers {
            if !self.condition_checker.check_conditions(modifier, context) {
                tracing::debug!(modifier_id = %modifier.id, name = %modifier.name, "modifier skipped");
                continue;
            }

            let price = self
                .adjustment_calculator
                .calculate_price(base_price, modifier)?;

            tracing::debug!(
                modifier_id = %modifier.id,
                name = %modifier.name,
                adjustment = modifier.adjustment.kind(),
                %price,
                "modifier applies"
            );

            best_price = best_price.min(price);
            eligible.push(EligibleModifier {
                modifier: modifier.clone(),
                price,
            });
        }

        tracing::info!(
            product_id = %product.id,
            %base_price,
            %best_price,
            eligible = eligible.len(),
            "best price computed"
        );

        Ok(PriceQuote {
            product_id: product.id,
            base_price,
            best_price,
            eligible,
        })
    }
}
