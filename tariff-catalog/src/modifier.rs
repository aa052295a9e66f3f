use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Inclusive age bounds in whole years. A missing bound is open on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<u32>,
}

impl AgeRange {
    pub fn contains(&self, age: i32) -> bool {
        let age = i64::from(age);
        let above_from = self.from.map_or(true, |from| age >= i64::from(from));
        let below_to = self.to.map_or(true, |to| age <= i64::from(to));
        above_from && below_to
    }
}

/// A predicate a modifier requires before it applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    AgeRange(AgeRange),
    VenueLocations(BTreeSet<String>),
    MembershipTypes(BTreeSet<String>),
}

impl Condition {
    pub const AGE_RANGE: &'static str = "age_range";
    pub const VENUE_LOCATIONS: &'static str = "venue_locations";
    pub const MEMBERSHIP_TYPES: &'static str = "membership_types";

    /// Key used for this condition in stored modifiers
    pub fn kind(&self) -> &'static str {
        match self {
            Condition::AgeRange(_) => Self::AGE_RANGE,
            Condition::VenueLocations(_) => Self::VENUE_LOCATIONS,
            Condition::MembershipTypes(_) => Self::MEMBERSHIP_TYPES,
        }
    }

    pub fn venue_locations<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::VenueLocations(locations.into_iter().map(Into::into).collect())
    }

    pub fn membership_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::MembershipTypes(types.into_iter().map(Into::into).collect())
    }

    fn decode(kind: &str, payload: Value) -> Result<Self, ModifierError> {
        let invalid = |err: serde_json::Error| ModifierError::InvalidCondition {
            kind: kind.to_string(),
            reason: err.to_string(),
        };

        match kind {
            Self::AGE_RANGE => serde_json::from_value(payload)
                .map(Condition::AgeRange)
                .map_err(invalid),
            Self::VENUE_LOCATIONS => serde_json::from_value(payload)
                .map(Condition::VenueLocations)
                .map_err(invalid),
            Self::MEMBERSHIP_TYPES => serde_json::from_value(payload)
                .map(Condition::MembershipTypes)
                .map_err(invalid),
            other => Err(ModifierError::UnrecognizedConditionKind(other.to_string())),
        }
    }

    fn payload(&self) -> Value {
        match self {
            Condition::AgeRange(range) => serde_json::json!(range),
            Condition::VenueLocations(set) | Condition::MembershipTypes(set) => {
                serde_json::json!(set)
            }
        }
    }
}

/// How a modifier turns the base price into its own price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Ratio applied to the base price
    Multiplier(Decimal),
    /// Signed amount added to the base price
    Fixed(Decimal),
    /// Absolute price replacing the base price
    Override(Decimal),
}

impl Adjustment {
    pub const MULTIPLIER: &'static str = "multiplier";
    pub const FIXED: &'static str = "fixed";
    pub const OVERRIDE: &'static str = "override";

    pub fn kind(&self) -> &'static str {
        match self {
            Adjustment::Multiplier(_) => Self::MULTIPLIER,
            Adjustment::Fixed(_) => Self::FIXED,
            Adjustment::Override(_) => Self::OVERRIDE,
        }
    }

    pub fn value(&self) -> Decimal {
        match self {
            Adjustment::Multiplier(v) | Adjustment::Fixed(v) | Adjustment::Override(v) => *v,
        }
    }

    fn decode(kind: &str, value: Decimal) -> Result<Self, ModifierError> {
        match kind {
            Self::MULTIPLIER => Ok(Adjustment::Multiplier(value)),
            Self::FIXED => Ok(Adjustment::Fixed(value)),
            Self::OVERRIDE => Ok(Adjustment::Override(value)),
            other => Err(ModifierError::UnrecognizedAdjustmentType(other.to_string())),
        }
    }
}

/// A conditional rule yielding an alternative price for a pricing option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ModifierRecord", into = "ModifierRecord")]
pub struct PricingModifier {
    pub id: Uuid,
    pub name: String,
    pub conditions: Vec<Condition>,
    pub adjustment: Adjustment,
}

impl PricingModifier {
    pub fn new(name: impl Into<String>, adjustment: Adjustment) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            conditions: Vec::new(),
            adjustment,
        }
    }

    /// Adds a condition, replacing any existing condition of the same kind
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.retain(|c| c.kind() != condition.kind());
        self.conditions.push(condition);
        self
    }

    /// Conditions in their stored, key-addressed form
    pub fn conditions_json(&self) -> Value {
        Value::Object(encode_conditions(&self.conditions))
    }
}

/// Stored shape of a modifier: open condition map and stringly adjustment type.
///
/// This is the only place unrecognized condition kinds and adjustment types can appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub conditions: Map<String, Value>,
    pub adjustment_type: String,
    pub adjustment_value: Decimal,
}

impl TryFrom<ModifierRecord> for PricingModifier {
    type Error = ModifierError;

    fn try_from(record: ModifierRecord) -> Result<Self, Self::Error> {
        let conditions = record
            .conditions
            .into_iter()
            .map(|(kind, payload)| Condition::decode(&kind, payload))
            .collect::<Result<Vec<_>, _>>()?;

        let adjustment = Adjustment::decode(&record.adjustment_type, record.adjustment_value)?;

        Ok(Self {
            id: record.id,
            name: record.name,
            conditions,
            adjustment,
        })
    }
}

impl From<PricingModifier> for ModifierRecord {
    fn from(modifier: PricingModifier) -> Self {
        Self {
            id: modifier.id,
            name: modifier.name,
            conditions: encode_conditions(&modifier.conditions),
            adjustment_type: modifier.adjustment.kind().to_string(),
            adjustment_value: modifier.adjustment.value(),
        }
    }
}

fn encode_conditions(conditions: &[Condition]) -> Map<String, Value> {
    conditions
        .iter()
        .map(|c| (c.kind().to_string(), c.payload()))
        .collect()
}

/// Stored modifier that cannot be turned into a typed one
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    #[error("Unrecognised pricing modifier condition: {0}")]
    UnrecognizedConditionKind(String),

    #[error("Unrecognised pricing modifier adjustment type: {0}")]
    UnrecognizedAdjustmentType(String),

    #[error("Invalid {kind} condition: {reason}")]
    InvalidCondition { kind: String, reason: String },
}
