//! The order list-query service.
//!
//! One read path: validate the request, build a conjunctive filter from the
//! optional inputs, page through the matching orders in the base ordering,
//! and join each order with its customer and product names.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use orderdash_catalog::ProductId;
use orderdash_customers::CustomerId;
use orderdash_orders::{FulfillmentStatus, Order, OrderId};

use crate::store::{DashboardStore, StoreError};

/// Page size used by the dashboard when the caller does not choose one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Hard cap on the page size.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// List-query error.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Bad request input (page/limit out of range). Never reaches the store.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Storage failure, propagated unmodified. No retry.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Conjunctive filter over orders.
///
/// Starts from the always-true predicate; each `with_*` call adds one
/// clause. Absent clauses impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    status: Option<FulfillmentStatus>,
    customer_name_contains: Option<String>,
}

impl OrderFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `order.fulfillment_status == status`.
    pub fn with_status(mut self, status: FulfillmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Require the customer name to contain `term`, case-insensitively.
    ///
    /// The term is trimmed first; a blank term leaves the filter unchanged.
    pub fn with_customer_name(mut self, term: &str) -> Self {
        let term = term.trim();
        if !term.is_empty() {
            self.customer_name_contains = Some(term.to_string());
        }
        self
    }

    pub fn status(&self) -> Option<FulfillmentStatus> {
        self.status
    }

    pub fn customer_name_contains(&self) -> Option<&str> {
        self.customer_name_contains.as_deref()
    }

    /// True when no clause has been added (matches every order).
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.customer_name_contains.is_none()
    }

    /// Evaluate the filter against one order and its customer's name.
    ///
    /// Used by the in-memory backend; the Postgres backend translates the
    /// same clauses to SQL.
    pub fn matches(&self, order: &Order, customer_name: &str) -> bool {
        if let Some(status) = self.status {
            if order.fulfillment_status() != status {
                return false;
            }
        }
        if let Some(needle) = &self.customer_name_contains {
            if !customer_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Inputs of the list query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderListRequest {
    /// 1-based page number.
    pub page: u32,
    /// Maximum rows per page; capped at [`MAX_PAGE_LIMIT`].
    pub limit: u32,
    pub status: Option<FulfillmentStatus>,
    pub search: Option<String>,
}

impl Default for OrderListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            status: None,
            search: None,
        }
    }
}

impl OrderListRequest {
    fn validate(&self) -> Result<(), QueryError> {
        if self.page < 1 {
            return Err(QueryError::Validation("page must be at least 1".into()));
        }
        if self.limit < 1 {
            return Err(QueryError::Validation("limit must be at least 1".into()));
        }
        Ok(())
    }

    /// Build the typed filter from the optional inputs.
    pub fn filter(&self) -> OrderFilter {
        let mut filter = OrderFilter::new();
        if let Some(status) = self.status {
            filter = filter.with_status(status);
        }
        if let Some(search) = &self.search {
            filter = filter.with_customer_name(search);
        }
        filter
    }
}

/// Customer fields the table renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub name: String,
    pub address: String,
}

/// Line item joined with its product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItemRow {
    pub product_name: String,
    pub quantity: u32,
}

/// One enriched order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRow {
    pub id: OrderId,
    pub fulfillment_status: FulfillmentStatus,
    pub placed_at: DateTime<Utc>,
    pub customer: CustomerSummary,
    pub line_items: Vec<LineItemRow>,
}

/// One page of enriched orders plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPage {
    pub orders: Vec<OrderRow>,
    pub total_orders: u64,
    pub total_pages: u64,
}

/// Read-only query service over a [`DashboardStore`].
#[derive(Debug, Clone)]
pub struct OrderQueryService<S> {
    store: S,
}

impl<S: DashboardStore> OrderQueryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the list query.
    ///
    /// `total_orders` counts every order matching the filter regardless of
    /// pagination; `total_pages` is the ceiling division by the effective
    /// limit (0 when nothing matches). A page past the end returns an
    /// empty `orders` list, not an error.
    pub async fn list_orders(&self, request: &OrderListRequest) -> Result<OrderPage, QueryError> {
        request.validate()?;

        let limit = u64::from(request.limit.min(MAX_PAGE_LIMIT));
        let offset = (u64::from(request.page) - 1) * limit;
        let filter = request.filter();

        let total_orders = self.store.count_orders(&filter).await?;
        let orders = self.store.list_orders(&filter, offset, limit).await?;

        let rows = self.enrich(orders).await?;

        Ok(OrderPage {
            orders: rows,
            total_orders,
            total_pages: total_orders.div_ceil(limit),
        })
    }

    /// Join each order with its customer and product names via batched
    /// lookups keyed by foreign id.
    async fn enrich(&self, orders: Vec<Order>) -> Result<Vec<OrderRow>, QueryError> {
        let mut customer_ids: Vec<CustomerId> = orders.iter().map(|o| o.customer_id()).collect();
        customer_ids.sort_by_key(|c| *c.0.as_uuid());
        customer_ids.dedup();

        let mut product_ids: Vec<ProductId> =
            orders.iter().flat_map(|o| o.product_ids()).collect();
        product_ids.sort_by_key(|p| *p.0.as_uuid());
        product_ids.dedup();

        let customers = self.store.customers_by_ids(&customer_ids).await?;
        let products = self.store.products_by_ids(&product_ids).await?;

        let mut rows = Vec::with_capacity(orders.len());
        for order in orders {
            let customer = customers.get(&order.customer_id()).ok_or_else(|| {
                StoreError::missing_reference(format!(
                    "order {} references unknown customer {}",
                    order.id_typed(),
                    order.customer_id()
                ))
            })?;

            let mut line_items = Vec::with_capacity(order.line_items().len());
            for line in order.line_items() {
                let product = products.get(&line.product_id()).ok_or_else(|| {
                    StoreError::missing_reference(format!(
                        "order {} references unknown product {}",
                        order.id_typed(),
                        line.product_id()
                    ))
                })?;
                line_items.push(LineItemRow {
                    product_name: product.name().to_string(),
                    quantity: line.quantity(),
                });
            }

            rows.push(OrderRow {
                id: order.id_typed(),
                fulfillment_status: order.fulfillment_status(),
                placed_at: order.placed_at(),
                customer: CustomerSummary {
                    name: customer.name().to_string(),
                    address: customer.address().to_string(),
                },
                line_items,
            });
        }

        Ok(rows)
    }
}
