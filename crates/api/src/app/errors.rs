use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use orderdash_orders::FulfillmentStatus;
use orderdash_store::QueryError;

/// Map a query failure onto the HTTP error classes: bad input is the
/// caller's fault, everything the store throws is ours.
pub fn query_error_to_response(err: QueryError) -> axum::response::Response {
    match err {
        QueryError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        QueryError::Store(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Validate a status query parameter before it can reach the store.
pub fn parse_status(s: &str) -> Result<FulfillmentStatus, axum::response::Response> {
    s.parse().map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_status",
            "status must be one of: PENDING, FULFILLED, CANCELLED, SHIPPED, RETURNED",
        )
    })
}
