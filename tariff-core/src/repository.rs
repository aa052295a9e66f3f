use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tariff_catalog::Product;
use tariff_shared::{Member, Venue};
use uuid::Uuid;

use crate::CoreResult;

/// Repository trait for product access.
///
/// Products come back with their pricing option resolved, carrying only the
/// modifiers that are current at `at`.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_product(&self, id: Uuid, at: DateTime<Utc>) -> CoreResult<Product>;

    async fn random_product(&self, at: DateTime<Utc>) -> CoreResult<Product>;
}

/// Repository trait for venue access
#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn find_venue(&self, id: Uuid) -> CoreResult<Venue>;

    async fn random_venue(&self) -> CoreResult<Venue>;
}

/// Repository trait for member access
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_member(&self, id: Uuid) -> CoreResult<Member>;

    async fn random_member(&self) -> CoreResult<Member>;
}
