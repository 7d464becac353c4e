//! `orderdash-dashboard` — presentation view-model for the orders table.
//!
//! No rendering happens here: this crate turns query responses into sorted,
//! display-ready rows and owns the interaction state the table needs
//! (page, filter, committed search term, debounce).

pub mod controller;
pub mod search;
pub mod table;

pub use controller::DashboardController;
pub use search::{SearchDebouncer, DEFAULT_DEBOUNCE};
pub use table::{sort_rows, Column, IndicatorColor, OrderRowView, Sort, SortDirection};
