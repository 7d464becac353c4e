//! `orderdash-orders` — orders, line items, and the fulfillment lifecycle.

pub mod order;
pub mod status;

pub use order::{LineItemId, Order, OrderId, OrderLineItem};
pub use status::FulfillmentStatus;
