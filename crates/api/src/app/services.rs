use std::sync::Arc;

use orderdash_store::{
    seed_store, DashboardStore, InMemoryStore, OrderQueryService, PostgresStore,
};

/// Services behind the HTTP handlers: one read-only query service over the
/// selected store backend.
pub struct AppServices {
    store: Arc<dyn DashboardStore>,
    orders: OrderQueryService<Arc<dyn DashboardStore>>,
}

impl AppServices {
    pub fn with_store(store: Arc<dyn DashboardStore>) -> Self {
        Self {
            orders: OrderQueryService::new(store.clone()),
            store,
        }
    }

    pub fn orders(&self) -> &OrderQueryService<Arc<dyn DashboardStore>> {
        &self.orders
    }

    pub fn store(&self) -> Arc<dyn DashboardStore> {
        self.store.clone()
    }
}

/// Pick the store backend from the environment.
///
/// `DATABASE_URL` set: Postgres (schema ensured on startup). Otherwise the
/// in-memory store, which is empty until seeded.
pub async fn build_store() -> anyhow::Result<Arc<dyn DashboardStore>> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let store = PostgresStore::connect(&url).await?;
            store.ensure_schema().await?;
            tracing::info!("using postgres store");
            Ok(Arc::new(store))
        }
        Err(_) => {
            tracing::info!("DATABASE_URL not set; using in-memory store");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

/// Build the services for `main`, honoring `SEED_ON_STARTUP`.
pub async fn build_services() -> anyhow::Result<AppServices> {
    let store = build_store().await?;

    let seed_on_startup = std::env::var("SEED_ON_STARTUP")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);
    if seed_on_startup {
        seed_store(&store, &mut rand::thread_rng()).await?;
    }

    Ok(AppServices::with_store(store))
}
