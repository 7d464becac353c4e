use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderdash_core::{DomainError, DomainResult, Entity, EntityId};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product: immutable reference data for the order flow.
///
/// Created once by the seed path and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    /// Price in smallest currency unit (e.g., cents).
    price_cents: u64,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Validating constructor: the name must be non-blank and the price positive.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price_cents: u64,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be blank"));
        }
        if price_cents == 0 {
            return Err(DomainError::validation("product price must be positive"));
        }

        Ok(Self {
            id,
            name,
            price_cents,
            created_at,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price_cents(&self) -> u64 {
        self.price_cents
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product_id() -> ProductId {
        ProductId::new(EntityId::new())
    }

    #[test]
    fn new_product_keeps_fields() {
        let id = test_product_id();
        let product = Product::new(id, "Laptop", 89_999, Utc::now()).unwrap();
        assert_eq!(product.id_typed(), id);
        assert_eq!(product.name(), "Laptop");
        assert_eq!(product.price_cents(), 89_999);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Product::new(test_product_id(), "   ", 100, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn zero_price_is_rejected() {
        let err = Product::new(test_product_id(), "Coffee Mug", 0, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
