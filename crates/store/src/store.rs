use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use orderdash_catalog::{Product, ProductId};
use orderdash_customers::{Customer, CustomerId};
use orderdash_orders::Order;

use crate::query::OrderFilter;

/// Storage operation error.
///
/// These are **infrastructure errors** (conflicts, dangling references,
/// backend failures) as opposed to domain errors (validation, invariants).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same id already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An insert referenced a customer or product that does not exist.
    #[error("missing reference: {0}")]
    MissingReference(String),

    /// A stored row could not be mapped back into a domain value.
    #[error("stored data could not be decoded: {0}")]
    Decode(String),

    /// Interior lock was poisoned (in-memory backend only).
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Underlying database failure.
    #[error("storage backend failure: {0}")]
    Backend(#[from] sqlx::Error),
}

impl StoreError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn missing_reference(msg: impl Into<String>) -> Self {
        Self::MissingReference(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

/// Insert-only store behind the dashboard.
///
/// Products and customers are written once by the seed path; orders are
/// written together with their line items. There is no update or delete.
/// Listings are returned in the base ordering `(placed_at ASC, id ASC)`,
/// which with time-ordered ids matches creation order, so pagination is
/// reproducible across backends.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    async fn insert_product(&self, product: Product) -> Result<(), StoreError>;

    async fn insert_customer(&self, customer: Customer) -> Result<(), StoreError>;

    /// Persist an order with its line items.
    ///
    /// Implementations must reject a duplicate order id and any reference
    /// to a customer or product that has not been inserted.
    async fn insert_order(&self, order: Order) -> Result<(), StoreError>;

    /// Count orders matching `filter`, unaffected by pagination.
    async fn count_orders(&self, filter: &OrderFilter) -> Result<u64, StoreError>;

    /// List orders matching `filter` in the base ordering, skipping
    /// `offset` rows and returning at most `limit`.
    async fn list_orders(
        &self,
        filter: &OrderFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Order>, StoreError>;

    /// Batched customer lookup keyed by id. Unknown ids are absent from
    /// the result, not an error.
    async fn customers_by_ids(
        &self,
        ids: &[CustomerId],
    ) -> Result<HashMap<CustomerId, Customer>, StoreError>;

    /// Batched product lookup keyed by id. Unknown ids are absent from
    /// the result, not an error.
    async fn products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Product>, StoreError>;
}

#[async_trait]
impl<S> DashboardStore for Arc<S>
where
    S: DashboardStore + ?Sized,
{
    async fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        (**self).insert_product(product).await
    }

    async fn insert_customer(&self, customer: Customer) -> Result<(), StoreError> {
        (**self).insert_customer(customer).await
    }

    async fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        (**self).insert_order(order).await
    }

    async fn count_orders(&self, filter: &OrderFilter) -> Result<u64, StoreError> {
        (**self).count_orders(filter).await
    }

    async fn list_orders(
        &self,
        filter: &OrderFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Order>, StoreError> {
        (**self).list_orders(filter, offset, limit).await
    }

    async fn customers_by_ids(
        &self,
        ids: &[CustomerId],
    ) -> Result<HashMap<CustomerId, Customer>, StoreError> {
        (**self).customers_by_ids(ids).await
    }

    async fn products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Product>, StoreError> {
        (**self).products_by_ids(ids).await
    }
}
