//! Table columns, row flattening, and the status indicator mapping.

use orderdash_orders::FulfillmentStatus;
use orderdash_store::OrderRow;

/// Indicator color shown next to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorColor {
    Yellow,
    Green,
    Red,
    Blue,
    Fuchsia,
    /// Fallback for a wire label this build does not recognize.
    Gray,
}

impl IndicatorColor {
    pub fn for_status(status: FulfillmentStatus) -> Self {
        match status {
            FulfillmentStatus::Pending => IndicatorColor::Yellow,
            FulfillmentStatus::Fulfilled => IndicatorColor::Green,
            FulfillmentStatus::Cancelled => IndicatorColor::Red,
            FulfillmentStatus::Shipped => IndicatorColor::Blue,
            FulfillmentStatus::Returned => IndicatorColor::Fuchsia,
        }
    }

    /// Map a raw wire label; anything unparseable gets the gray fallback.
    pub fn for_label(label: &str) -> Self {
        label
            .parse::<FulfillmentStatus>()
            .map(Self::for_status)
            .unwrap_or(IndicatorColor::Gray)
    }
}

/// Capitalized display form of a status (`"Pending"`, not `"PENDING"`).
pub fn display_label(status: FulfillmentStatus) -> String {
    let wire = status.as_str();
    let mut label = String::with_capacity(wire.len());
    let mut chars = wire.chars();
    if let Some(first) = chars.next() {
        label.push(first);
        label.extend(chars.flat_map(char::to_lowercase));
    }
    label
}

/// Table columns, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    CustomerName,
    Address,
    Status,
    Products,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active client-side sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: Column,
    pub direction: SortDirection,
}

/// One display-ready table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRowView {
    pub customer_name: String,
    pub customer_address: String,
    pub status: FulfillmentStatus,
    pub status_label: String,
    pub status_color: IndicatorColor,
    /// Flattened product names, one per line item.
    pub products: Vec<String>,
}

impl OrderRowView {
    pub fn from_row(row: &OrderRow) -> Self {
        Self {
            customer_name: row.customer.name.clone(),
            customer_address: row.customer.address.clone(),
            status: row.fulfillment_status,
            status_label: display_label(row.fulfillment_status),
            status_color: IndicatorColor::for_status(row.fulfillment_status),
            products: row
                .line_items
                .iter()
                .map(|l| l.product_name.clone())
                .collect(),
        }
    }
}

/// Sort the currently loaded page in place. Stable, so rows that compare
/// equal keep their server order; never triggers a new request.
pub fn sort_rows(rows: &mut [OrderRowView], sort: Sort) {
    rows.sort_by(|a, b| {
        let ordering = match sort.column {
            Column::CustomerName => a.customer_name.cmp(&b.customer_name),
            Column::Address => a.customer_address.cmp(&b.customer_address),
            Column::Status => a.status_label.cmp(&b.status_label),
            Column::Products => a.products.cmp(&b.products),
        };
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
