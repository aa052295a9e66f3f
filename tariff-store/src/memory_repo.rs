use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use tariff_catalog::{ModifierRecord, PricingModifier, PricingOption, Product};
use tariff_core::repository::{MemberRepository, ProductRepository, VenueRepository};
use tariff_core::{CoreError, CoreResult};
use tariff_shared::{Member, Venue};
use uuid::Uuid;

use crate::dataset::{Dataset, PricingOptionRecord, ProductRecord};

/// Read-only store over a loaded dataset.
///
/// Cheap to clone; clones share the same data.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    inner: Arc<Indexed>,
}

#[derive(Debug)]
struct Indexed {
    dataset: Dataset,
    pricing_options: HashMap<Uuid, usize>,
    pricing_modifiers: HashMap<Uuid, usize>,
}

impl InMemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        let pricing_options = index_by(&dataset.pricing_options, |o| o.id);
        let pricing_modifiers = index_by(&dataset.pricing_modifiers, |m| m.id);

        Self {
            inner: Arc::new(Indexed {
                dataset,
                pricing_options,
                pricing_modifiers,
            }),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.inner.dataset
    }

    fn pricing_option(&self, id: Uuid) -> CoreResult<&PricingOptionRecord> {
        self.inner
            .pricing_options
            .get(&id)
            .map(|&i| &self.inner.dataset.pricing_options[i])
            .ok_or_else(|| CoreError::Storage(format!("missing pricing option {}", id)))
    }

    fn modifier_record(&self, id: Uuid) -> CoreResult<&ModifierRecord> {
        self.inner
            .pricing_modifiers
            .get(&id)
            .map(|&i| &self.inner.dataset.pricing_modifiers[i])
            .ok_or_else(|| CoreError::Storage(format!("missing pricing modifier {}", id)))
    }

    /// Modifiers attached to an option and current at `at`, in attachment order.
    ///
    /// Any undecodable modifier fails the whole lookup.
    fn current_modifiers(&self, option_id: Uuid, at: DateTime<Utc>) -> CoreResult<Vec<PricingModifier>> {
        self.inner
            .dataset
            .attachments
            .iter()
            .filter(|a| a.pricing_option_id == option_id && a.is_current_at(at))
            .map(|a| {
                let record = self.modifier_record(a.pricing_modifier_id)?;
                PricingModifier::try_from(record.clone()).map_err(|source| {
                    tracing::error!(modifier_id = %record.id, error = %source, "stored modifier rejected");
                    CoreError::InvalidModifier {
                        id: record.id.to_string(),
                        source,
                    }
                })
            })
            .collect()
    }

    fn resolve_product(&self, record: &ProductRecord, at: DateTime<Utc>) -> CoreResult<Product> {
        let option = self.pricing_option(record.pricing_option_id)?;
        let modifiers = self.current_modifiers(option.id, at)?;

        tracing::debug!(
            product_id = %record.id,
            pricing_option_id = %option.id,
            current_modifiers = modifiers.len(),
            "product resolved"
        );

        Ok(Product {
            id: record.id,
            name: record.name.clone(),
            pricing_option: PricingOption {
                id: option.id,
                price: option.price,
                modifiers,
            },
        })
    }
}

fn index_by<T>(items: &[T], key: impl Fn(&T) -> Uuid) -> HashMap<Uuid, usize> {
    items.iter().enumerate().map(|(i, item)| (key(item), i)).collect()
}

fn pick<'a, T>(items: &'a [T], entity: &'static str) -> CoreResult<&'a T> {
    items
        .choose(&mut rand::thread_rng())
        .ok_or(CoreError::Empty(entity))
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn find_product(&self, id: Uuid, at: DateTime<Utc>) -> CoreResult<Product> {
        let record = self
            .inner
            .dataset
            .products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found("Product", id))?;
        self.resolve_product(record, at)
    }

    async fn random_product(&self, at: DateTime<Utc>) -> CoreResult<Product> {
        let record = pick(&self.inner.dataset.products, "product")?;
        self.resolve_product(record, at)
    }
}

#[async_trait]
impl VenueRepository for InMemoryStore {
    async fn find_venue(&self, id: Uuid) -> CoreResult<Venue> {
        self.inner
            .dataset
            .venues
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Venue", id))
    }

    async fn random_venue(&self) -> CoreResult<Venue> {
        pick(&self.inner.dataset.venues, "venue").cloned()
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn find_member(&self, id: Uuid) -> CoreResult<Member> {
        self.inner
            .dataset
            .members
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Member", id))
    }

    async fn random_member(&self) -> CoreResult<Member> {
        pick(&self.inner.dataset.members, "member").cloned()
    }
}
