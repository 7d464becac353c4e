use core::str::FromStr;
use serde::{Deserialize, Serialize};

use orderdash_core::DomainError;

/// Order fulfillment state.
///
/// Exactly these five values exist; anything else is rejected at the
/// boundary before it can reach storage. Wire form is SCREAMING_SNAKE_CASE
/// (`"PENDING"`, `"SHIPPED"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentStatus {
    Pending,
    Fulfilled,
    Cancelled,
    Shipped,
    Returned,
}

impl FulfillmentStatus {
    /// All values, in wire declaration order.
    pub const ALL: [FulfillmentStatus; 5] = [
        FulfillmentStatus::Pending,
        FulfillmentStatus::Fulfilled,
        FulfillmentStatus::Cancelled,
        FulfillmentStatus::Shipped,
        FulfillmentStatus::Returned,
    ];

    /// Canonical wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentStatus::Pending => "PENDING",
            FulfillmentStatus::Fulfilled => "FULFILLED",
            FulfillmentStatus::Cancelled => "CANCELLED",
            FulfillmentStatus::Shipped => "SHIPPED",
            FulfillmentStatus::Returned => "RETURNED",
        }
    }
}

impl core::fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FulfillmentStatus {
    type Err = DomainError;

    /// Case-insensitive parse; unknown labels fail validation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(FulfillmentStatus::Pending),
            "FULFILLED" => Ok(FulfillmentStatus::Fulfilled),
            "CANCELLED" => Ok(FulfillmentStatus::Cancelled),
            "SHIPPED" => Ok(FulfillmentStatus::Shipped),
            "RETURNED" => Ok(FulfillmentStatus::Returned),
            other => Err(DomainError::validation(format!(
                "status must be one of: PENDING, FULFILLED, CANCELLED, SHIPPED, RETURNED (got {other:?})"
            ))),
        }
    }
}
