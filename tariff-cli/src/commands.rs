use anyhow::Context;
use chrono::{DateTime, Utc};
use tariff_catalog::Product;
use tariff_core::repository::{MemberRepository, ProductRepository, VenueRepository};
use tariff_pricing::{Calculator, PriceQuote, PricingContext};
use tariff_shared::{Member, Venue};

use crate::cli::CalculateArgs;

/// Entities a price was computed for, and the result
#[derive(Debug, Clone)]
pub struct Calculation {
    pub product: Product,
    pub venue: Venue,
    pub member: Member,
    pub evaluated_at: DateTime<Utc>,
    pub quote: PriceQuote,
}

/// Resolves product, venue and member (by ID, or at random when no ID is given)
/// and prices the product at `now`.
pub async fn calculate<R>(repo: &R, args: &CalculateArgs, now: DateTime<Utc>) -> anyhow::Result<Calculation>
where
    R: ProductRepository + VenueRepository + MemberRepository,
{
    let product = match args.product {
        Some(id) => repo.find_product(id, now).await,
        None => repo.random_product(now).await,
    }
    .context("Failed to load product")?;

    let venue = match args.venue {
        Some(id) => repo.find_venue(id).await,
        None => repo.random_venue().await,
    }
    .context("Failed to load venue")?;

    let member = match args.member {
        Some(id) => repo.find_member(id).await,
        None => repo.random_member().await,
    }
    .context("Failed to load member")?;

    let quote = Calculator::new()
        .get_best_price(&product, &PricingContext::new(&venue, &member, now))
        .context("Failed to price product")?;

    Ok(Calculation {
        product,
        venue,
        member,
        evaluated_at: now,
        quote,
    })
}
