//! Random demo datasets for trying the calculator out.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use tariff_catalog::{Adjustment, AgeRange, Condition, ModifierRecord, PricingModifier};
use tariff_shared::{Masked, Member, Venue};
use uuid::Uuid;

use crate::app_config::SeedConfig;
use crate::dataset::{Dataset, ModifierAttachment, PricingOptionRecord, ProductRecord};

const LOCATIONS: &[&str] = &[
    "Edinburgh",
    "Glasgow",
    "Hull",
    "Kidderminster",
    "Leeds",
    "London",
    "Manchester",
    "Sheffield",
];

const VENUE_KINDS: &[&str] = &["Leisure Centre", "Sports Hall", "Aquatics Centre", "Tennis Club"];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Sam", "Jo", "Priya", "Tom", "Aisha", "Morgan", "Ewan", "Mei", "Callum", "Niamh",
    "Ravi",
];

const LAST_NAMES: &[&str] = &[
    "Campbell", "Patel", "Smith", "Okafor", "MacLeod", "Jones", "Nguyen", "Byrne",
];

const MEMBERSHIP_TYPES: &[&str] = &["bronze", "silver", "gold", "platinum"];

const PRODUCTS: &[&str] = &[
    "Swim session",
    "Squash court",
    "Badminton court",
    "Gym pass",
    "Spin class",
    "Yoga class",
    "Five-a-side pitch",
    "Climbing wall",
    "Sauna",
    "Tennis court",
];

const MODIFIER_NAMES: &[&str] = &[
    "Junior rate",
    "Student saver",
    "Senior discount",
    "Members' price",
    "City offer",
    "Peak surcharge",
    "Flat fee",
    "Launch offer",
];

fn condition_sets() -> Vec<Vec<Condition>> {
    vec![
        vec![],
        vec![Condition::AgeRange(AgeRange { from: None, to: Some(18) })],
        vec![Condition::AgeRange(AgeRange { from: Some(18), to: Some(25) })],
        vec![Condition::AgeRange(AgeRange { from: Some(65), to: None })],
        vec![Condition::membership_types(["silver", "gold", "platinum"])],
        vec![Condition::venue_locations(["Glasgow"])],
        vec![Condition::venue_locations(["London", "Kidderminster"])],
    ]
}

fn adjustments() -> Vec<Adjustment> {
    let multipliers = [(5, 1), (75, 2), (125, 2), (2, 0)];
    let fixed = [(-15, 0), (-5, 0), (2, 0), (50, 0)];
    let overrides = [(3, 0), (5, 0), (550, 2)];

    multipliers
        .iter()
        .map(|&(n, s)| Adjustment::Multiplier(Decimal::new(n, s)))
        .chain(fixed.iter().map(|&(n, s)| Adjustment::Fixed(Decimal::new(n, s))))
        .chain(overrides.iter().map(|&(n, s)| Adjustment::Override(Decimal::new(n, s))))
        .collect()
}

fn choose<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Ids come from `rng` too, so a seeded generator reproduces the whole dataset
fn next_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Generates a self-consistent dataset. Most attachments are current at `now`;
/// roughly three in ten start in the future, have already ended, or are switched off.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &SeedConfig, now: DateTime<Utc>) -> Dataset {
    let venues = (0..config.venues)
        .map(|_| {
            let location = choose(rng, LOCATIONS);
            Venue {
                id: next_id(rng),
                name: format!("{} {}", location, choose(rng, VENUE_KINDS)),
                location: location.to_string(),
            }
        })
        .collect();

    let members = (0..config.members)
        .map(|_| {
            let days_old = rng.gen_range(5 * 365..90 * 365);
            Member {
                id: next_id(rng),
                name: format!("{} {}", choose(rng, FIRST_NAMES), choose(rng, LAST_NAMES)),
                date_of_birth: Masked(now.date_naive() - Duration::days(days_old)),
                membership_type: choose(rng, MEMBERSHIP_TYPES).to_string(),
            }
        })
        .collect();

    let condition_sets = condition_sets();
    let adjustments = adjustments();
    let pricing_modifiers: Vec<ModifierRecord> = (0..config.modifiers)
        .map(|_| {
            let adjustment = adjustments.choose(rng).copied().unwrap_or(Adjustment::Fixed(Decimal::ZERO));
            let conditions = condition_sets.choose(rng).cloned().unwrap_or_default();
            let mut modifier = conditions.into_iter().fold(
                PricingModifier::new(choose(rng, MODIFIER_NAMES), adjustment),
                PricingModifier::with_condition,
            );
            modifier.id = next_id(rng);
            ModifierRecord::from(modifier)
        })
        .collect();

    let mut products = Vec::with_capacity(config.products);
    let mut pricing_options = Vec::with_capacity(config.products);
    let mut attachments = Vec::new();

    for _ in 0..config.products {
        let option = PricingOptionRecord {
            id: next_id(rng),
            price: Decimal::new(rng.gen_range(300..5_000), 2),
        };

        for modifier in pricing_modifiers.choose_multiple(rng, config.modifiers_per_option) {
            attachments.push(attachment(rng, option.id, modifier.id, now));
        }

        products.push(ProductRecord {
            id: next_id(rng),
            name: choose(rng, PRODUCTS).to_string(),
            pricing_option_id: option.id,
        });
        pricing_options.push(option);
    }

    tracing::info!(
        products = products.len(),
        modifiers = pricing_modifiers.len(),
        attachments = attachments.len(),
        "demo dataset generated"
    );

    Dataset {
        venues,
        members,
        products,
        pricing_options,
        pricing_modifiers,
        attachments,
    }
}

fn attachment<R: Rng + ?Sized>(
    rng: &mut R,
    pricing_option_id: Uuid,
    pricing_modifier_id: Uuid,
    now: DateTime<Utc>,
) -> ModifierAttachment {
    let (valid_from, valid_to, active) = match rng.gen_range(0..10) {
        // not started yet
        0 => (now + Duration::days(rng.gen_range(1..30)), None, true),
        // switched off
        1 => (now - Duration::days(rng.gen_range(1..30)), None, false),
        // already ended
        2 => (
            now - Duration::days(rng.gen_range(120..365)),
            Some(now - Duration::days(rng.gen_range(1..30))),
            true,
        ),
        _ => {
            let valid_to = rng
                .gen_bool(0.3)
                .then(|| now + Duration::days(rng.gen_range(30..365)));
            (now - Duration::days(rng.gen_range(1..90)), valid_to, true)
        }
    };

    ModifierAttachment {
        pricing_option_id,
        pricing_modifier_id,
        valid_from,
        valid_to,
        active,
    }
}
