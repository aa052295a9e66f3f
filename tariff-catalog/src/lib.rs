pub mod modifier;
pub mod product;

pub use modifier::{Adjustment, AgeRange, Condition, ModifierError, ModifierRecord, PricingModifier};
pub use product::{PricingOption, Product};
