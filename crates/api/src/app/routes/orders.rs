use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use orderdash_store::{OrderListRequest, DEFAULT_PAGE_LIMIT};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(list_orders))
}

/// `GET /orders?page&limit&status&search`
///
/// Status validation happens here, before the request reaches the store;
/// page/limit validation lives in the query service.
pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListOrdersParams>,
) -> axum::response::Response {
    let status = match params.status.as_deref() {
        Some(raw) => match errors::parse_status(raw) {
            Ok(status) => Some(status),
            Err(resp) => return resp,
        },
        None => None,
    };

    let request = OrderListRequest {
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        status,
        search: params.search,
    };

    match services.orders().list_orders(&request).await {
        Ok(page) => (StatusCode::OK, Json(dto::order_page_to_json(page))).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}
