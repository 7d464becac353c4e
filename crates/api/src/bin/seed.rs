//! Standalone seeder: fills the configured persistent store with the
//! synthetic development data set.

use anyhow::Context;

use orderdash_api::app::services;
use orderdash_store::seed_store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    orderdash_observability::init();

    std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set; seeding an in-memory store has no effect")?;

    let store = services::build_store().await?;
    let summary = seed_store(&store, &mut rand::thread_rng()).await?;

    tracing::info!(
        products = summary.products,
        customers = summary.customers,
        orders = summary.orders,
        "seed run finished"
    );
    Ok(())
}
