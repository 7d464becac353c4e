use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderdash_catalog::ProductId;
use orderdash_core::{DomainError, DomainResult, Entity, EntityId};
use orderdash_customers::CustomerId;

use crate::status::FulfillmentStatus;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl OrderId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Line item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(pub EntityId);

impl LineItemId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order line: product reference + quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    id: LineItemId,
    product_id: ProductId,
    quantity: u32,
}

impl OrderLineItem {
    /// Validating constructor: quantity must be positive.
    pub fn new(id: LineItemId, product_id: ProductId, quantity: u32) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        Ok(Self {
            id,
            product_id,
            quantity,
        })
    }

    pub fn id_typed(&self) -> LineItemId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Order: owned by one customer, carries its line items.
///
/// Orders are created together with their line items and never mutated
/// afterwards; there is no update or delete path. An order without line
/// items is tolerated on the read side but never produced by the seeder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    fulfillment_status: FulfillmentStatus,
    placed_at: DateTime<Utc>,
    line_items: Vec<OrderLineItem>,
}

impl Order {
    pub fn new(
        id: OrderId,
        customer_id: CustomerId,
        fulfillment_status: FulfillmentStatus,
        placed_at: DateTime<Utc>,
        line_items: Vec<OrderLineItem>,
    ) -> Self {
        Self {
            id,
            customer_id,
            fulfillment_status,
            placed_at,
            line_items,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn fulfillment_status(&self) -> FulfillmentStatus {
        self.fulfillment_status
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    pub fn line_items(&self) -> &[OrderLineItem] {
        &self.line_items
    }

    /// Distinct product ids referenced by this order's lines.
    pub fn product_ids(&self) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = self.line_items.iter().map(|l| l.product_id()).collect();
        ids.sort_by_key(|p| *p.0.as_uuid());
        ids.dedup();
        ids
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
