//! `orderdash-store` — storage backends and the order list-query service.
//!
//! Layout:
//! - `store`: the `DashboardStore` trait and storage error model
//! - `memory`: in-memory backend for dev, tests, and benches
//! - `postgres`: sqlx/Postgres backend
//! - `query`: the list-query service (filter builder, pagination, enrichment)
//! - `seed`: synthetic data generation

pub mod memory;
pub mod postgres;
pub mod query;
pub mod seed;
pub mod store;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use query::{
    CustomerSummary, LineItemRow, OrderFilter, OrderListRequest, OrderPage, OrderQueryService,
    OrderRow, QueryError, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
pub use seed::{seed_store, SeedError, SeedSummary};
pub use store::{DashboardStore, StoreError};
