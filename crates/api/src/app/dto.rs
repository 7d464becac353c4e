use serde::Deserialize;

use orderdash_store::{OrderPage, OrderRow};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ListOrdersParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub search: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn order_page_to_json(page: OrderPage) -> serde_json::Value {
    serde_json::json!({
        "orders": page.orders.into_iter().map(order_row_to_json).collect::<Vec<_>>(),
        "total_orders": page.total_orders,
        "total_pages": page.total_pages,
    })
}

fn order_row_to_json(row: OrderRow) -> serde_json::Value {
    serde_json::json!({
        "id": row.id.0.to_string(),
        "fulfillment_status": row.fulfillment_status.as_str(),
        "placed_at": row.placed_at.to_rfc3339(),
        "customer": {
            "name": row.customer.name,
            "address": row.customer.address,
        },
        "line_items": row.line_items.into_iter().map(|l| serde_json::json!({
            "product_name": l.product_name,
            "quantity": l.quantity,
        })).collect::<Vec<_>>(),
    })
}
