//! `orderdash-catalog` — product reference data.

pub mod product;

pub use product::{Product, ProductId};
