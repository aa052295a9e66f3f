use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::json;
use tariff_catalog::{Adjustment, Condition, ModifierRecord, PricingModifier};
use tariff_core::repository::{MemberRepository, ProductRepository, VenueRepository};
use tariff_core::CoreError;
use tariff_pricing::{Calculator, PricingContext};
use tariff_shared::{Masked, Member, Venue};
use tariff_store::dataset::{ModifierAttachment, PricingOptionRecord, ProductRecord};
use tariff_store::{Dataset, InMemoryStore};
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

struct Fixture {
    dataset: Dataset,
    product_id: Uuid,
    option_id: Uuid,
}

impl Fixture {
    fn new() -> Self {
        let option = PricingOptionRecord {
            id: Uuid::new_v4(),
            price: dec!(10),
        };
        let product = ProductRecord {
            id: Uuid::new_v4(),
            name: "Swim session".to_string(),
            pricing_option_id: option.id,
        };

        let dataset = Dataset {
            venues: vec![Venue {
                id: Uuid::new_v4(),
                name: "Tollcross".to_string(),
                location: "Glasgow".to_string(),
            }],
            members: vec![Member {
                id: Uuid::new_v4(),
                name: "Kirsty".to_string(),
                date_of_birth: Masked(NaiveDate::from_ymd_opt(2007, 6, 1).unwrap()),
                membership_type: "silver".to_string(),
            }],
            products: vec![product.clone()],
            pricing_options: vec![option.clone()],
            pricing_modifiers: vec![],
            attachments: vec![],
        };

        Self {
            dataset,
            product_id: product.id,
            option_id: option.id,
        }
    }

    /// Attaches `modifier` with the given window; returns its id
    fn attach(&mut self, modifier: ModifierRecord, valid_from: DateTime<Utc>, active: bool) -> Uuid {
        let id = modifier.id;
        self.dataset.attachments.push(ModifierAttachment {
            pricing_option_id: self.option_id,
            pricing_modifier_id: id,
            valid_from,
            valid_to: None,
            active,
        });
        self.dataset.pricing_modifiers.push(modifier);
        id
    }

    fn store(&self) -> InMemoryStore {
        InMemoryStore::new(self.dataset.clone())
    }
}

fn record(name: &str, adjustment: Adjustment) -> ModifierRecord {
    ModifierRecord::from(PricingModifier::new(name, adjustment))
}

#[tokio::test]
async fn test_only_current_modifiers_reach_the_pricing_option() {
    let mut fixture = Fixture::new();
    let yesterday = now() - Duration::days(1);
    let tomorrow = now() + Duration::days(1);

    let current = fixture.attach(record("current", Adjustment::Fixed(dec!(-1))), yesterday, true);
    fixture.attach(record("not yet", Adjustment::Override(dec!(1))), tomorrow, true);
    fixture.attach(record("inactive", Adjustment::Override(dec!(2))), yesterday, false);
    let also_current = fixture.attach(record("also current", Adjustment::Multiplier(dec!(0.5))), now(), true);

    let product = fixture.store().find_product(fixture.product_id, now()).await.unwrap();

    let ids: Vec<_> = product.pricing_option.modifiers.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![current, also_current]);
    assert_eq!(product.base_price(), dec!(10));
}

#[tokio::test]
async fn test_expired_attachment_is_excluded() {
    let mut fixture = Fixture::new();
    fixture.attach(record("old", Adjustment::Override(dec!(1))), now() - Duration::days(30), true);
    fixture.dataset.attachments[0].valid_to = Some(now() - Duration::days(1));

    let product = fixture.store().find_product(fixture.product_id, now()).await.unwrap();

    assert!(product.pricing_option.modifiers.is_empty());
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let store = Fixture::new().store();

    let err = store.find_product(Uuid::new_v4(), now()).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "Product", .. }));

    let err = store.find_venue(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "Venue", .. }));

    let err = store.find_member(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "Member", .. }));
}

#[tokio::test]
async fn test_random_selection_from_empty_dataset() {
    let store = InMemoryStore::new(Dataset::default());

    assert!(matches!(store.random_product(now()).await, Err(CoreError::Empty("product"))));
    assert!(matches!(store.random_venue().await, Err(CoreError::Empty("venue"))));
    assert!(matches!(store.random_member().await, Err(CoreError::Empty("member"))));
}

#[tokio::test]
async fn test_random_selection_returns_existing_records() {
    let fixture = Fixture::new();
    let store = fixture.store();

    assert_eq!(store.random_product(now()).await.unwrap().id, fixture.product_id);
    assert_eq!(store.random_venue().await.unwrap().id, fixture.dataset.venues[0].id);
    assert_eq!(store.random_member().await.unwrap().id, fixture.dataset.members[0].id);
}

#[tokio::test]
async fn test_unrecognized_condition_kind_fails_the_lookup() {
    let mut fixture = Fixture::new();
    fixture.attach(record("fine", Adjustment::Fixed(dec!(-1))), now(), true);
    let broken: ModifierRecord = serde_json::from_value(json!({
        "id": Uuid::new_v4(),
        "name": "Weekday special",
        "conditions": { "weekday": ["monday"] },
        "adjustment_type": "fixed",
        "adjustment_value": -2,
    }))
    .unwrap();
    fixture.attach(broken, now(), true);

    let err = fixture.store().find_product(fixture.product_id, now()).await.unwrap_err();

    match err {
        CoreError::InvalidModifier { source, .. } => assert_eq!(
            source,
            tariff_catalog::ModifierError::UnrecognizedConditionKind("weekday".to_string())
        ),
        other => panic!("expected invalid modifier, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unrecognized_adjustment_type_fails_the_lookup() {
    let mut fixture = Fixture::new();
    let mut broken = record("bogus", Adjustment::Fixed(dec!(1)));
    broken.adjustment_type = "percentage".to_string();
    fixture.attach(broken, now(), true);

    let err = fixture.store().find_product(fixture.product_id, now()).await.unwrap_err();

    assert!(err.to_string().contains("percentage"));
}

#[tokio::test]
async fn test_broken_modifier_outside_window_is_ignored() {
    let mut fixture = Fixture::new();
    let mut broken = record("future", Adjustment::Fixed(dec!(1)));
    broken.adjustment_type = "percentage".to_string();
    fixture.attach(broken, now() + Duration::days(7), true);

    assert!(fixture.store().find_product(fixture.product_id, now()).await.is_ok());
}

#[tokio::test]
async fn test_dangling_attachment_is_a_storage_error() {
    let mut fixture = Fixture::new();
    fixture.dataset.attachments.push(ModifierAttachment {
        pricing_option_id: fixture.option_id,
        pricing_modifier_id: Uuid::new_v4(),
        valid_from: now() - Duration::days(1),
        valid_to: None,
        active: true,
    });

    let err = fixture.store().find_product(fixture.product_id, now()).await.unwrap_err();

    assert!(matches!(err, CoreError::Storage(_)));
}

#[tokio::test]
async fn test_best_price_through_the_store() {
    let mut fixture = Fixture::new();
    let under_25 = PricingModifier::new("Under 25s", Adjustment::Multiplier(dec!(0.8)))
        .with_condition(Condition::AgeRange(tariff_catalog::AgeRange { from: None, to: Some(25) }));
    fixture.attach(ModifierRecord::from(under_25), now() - Duration::days(1), true);
    let store = fixture.store();

    let product = store.find_product(fixture.product_id, now()).await.unwrap();
    let venue = store.random_venue().await.unwrap();
    let member = store.random_member().await.unwrap();
    let quote = Calculator::new()
        .get_best_price(&product, &PricingContext::new(&venue, &member, now()))
        .unwrap();

    assert_eq!(quote.best_price, dec!(8.00));
    assert_eq!(quote.eligible.len(), 1);
}

#[tokio::test]
async fn test_dataset_file_round_trip_feeds_the_store() {
    let mut fixture = Fixture::new();
    fixture.attach(record("half", Adjustment::Multiplier(dec!(0.5))), now(), true);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("dataset.json");

    fixture.dataset.save(&path).unwrap();
    let store = InMemoryStore::new(Dataset::load(&path).unwrap());

    let product = store.find_product(fixture.product_id, now()).await.unwrap();
    assert_eq!(product.pricing_option.modifiers[0].adjustment, Adjustment::Multiplier(dec!(0.5)));
    let member = store.find_member(fixture.dataset.members[0].id).await.unwrap();
    assert_eq!(member.date_of_birth, fixture.dataset.members[0].date_of_birth);
}
