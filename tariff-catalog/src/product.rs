use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modifier::PricingModifier;

/// Priceable unit attached to a product.
///
/// `modifiers` holds only the modifiers that are current for the lookup instant;
/// whoever builds the option is responsible for that filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingOption {
    pub id: Uuid,
    pub price: Decimal,
    #[serde(default)]
    pub modifiers: Vec<PricingModifier>,
}

impl PricingOption {
    pub fn new(price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            price,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: PricingModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

/// Core product structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub pricing_option: PricingOption,
}

impl Product {
    pub fn new(name: impl Into<String>, pricing_option: PricingOption) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            pricing_option,
        }
    }

    pub fn base_price(&self) -> Decimal {
        self.pricing_option.price
    }
}
