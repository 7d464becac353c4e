//! In-memory backend for dev, tests, and benches.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use orderdash_catalog::{Product, ProductId};
use orderdash_customers::{Customer, CustomerId};
use orderdash_orders::{Order, OrderId};

use crate::query::OrderFilter;
use crate::store::{DashboardStore, StoreError};

/// In-memory [`DashboardStore`].
///
/// Orders are kept in insertion order; listings re-sort by
/// `(placed_at, id)` so the contract matches the Postgres backend exactly.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    products: HashMap<ProductId, Product>,
    customers: HashMap<CustomerId, Customer>,
    orders: Vec<Order>,
    order_ids: HashSet<OrderId>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DashboardStore for InMemoryStore {
    async fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let id = product.id_typed();
        if inner.products.contains_key(&id) {
            return Err(StoreError::conflict(format!("product {id} already exists")));
        }
        inner.products.insert(id, product);
        Ok(())
    }

    async fn insert_customer(&self, customer: Customer) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let id = customer.id_typed();
        if inner.customers.contains_key(&id) {
            return Err(StoreError::conflict(format!("customer {id} already exists")));
        }
        inner.customers.insert(id, customer);
        Ok(())
    }

    async fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;

        let id = order.id_typed();
        if inner.order_ids.contains(&id) {
            return Err(StoreError::conflict(format!("order {id} already exists")));
        }
        if !inner.customers.contains_key(&order.customer_id()) {
            return Err(StoreError::missing_reference(format!(
                "order {id} references unknown customer {}",
                order.customer_id()
            )));
        }
        for line in order.line_items() {
            if !inner.products.contains_key(&line.product_id()) {
                return Err(StoreError::missing_reference(format!(
                    "order {id} references unknown product {}",
                    line.product_id()
                )));
            }
        }

        inner.order_ids.insert(id);
        inner.orders.push(order);
        Ok(())
    }

    async fn count_orders(&self, filter: &OrderFilter) -> Result<u64, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner
            .orders
            .iter()
            .filter(|o| filter.matches(o, inner.customer_name(o)))
            .count() as u64)
    }

    async fn list_orders(
        &self,
        filter: &OrderFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Order>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;

        let mut matching: Vec<&Order> = inner
            .orders
            .iter()
            .filter(|o| filter.matches(o, inner.customer_name(o)))
            .collect();
        matching.sort_by_key(|o| (o.placed_at(), *o.id_typed().0.as_uuid()));

        Ok(matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn customers_by_ids(
        &self,
        ids: &[CustomerId],
    ) -> Result<HashMap<CustomerId, Customer>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(ids
            .iter()
            .filter_map(|id| inner.customers.get(id).map(|c| (*id, c.clone())))
            .collect())
    }

    async fn products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Product>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(ids
            .iter()
            .filter_map(|id| inner.products.get(id).map(|p| (*id, p.clone())))
            .collect())
    }
}

impl Inner {
    /// Name of the order's customer; the insert path guarantees it exists,
    /// so a miss only happens on a filter probe against corrupt state and
    /// then simply never matches a search term.
    fn customer_name(&self, order: &Order) -> &str {
        self.customers
            .get(&order.customer_id())
            .map(|c| c.name())
            .unwrap_or("")
    }
}
