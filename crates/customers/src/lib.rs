//! `orderdash-customers` — customer directory entities.

pub mod customer;

pub use customer::{Customer, CustomerId};
