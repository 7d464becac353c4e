use std::sync::Arc;

use chrono::Utc;
use reqwest::StatusCode;

use orderdash_api::app::services::AppServices;
use orderdash_catalog::{Product, ProductId};
use orderdash_core::EntityId;
use orderdash_customers::{Customer, CustomerId};
use orderdash_orders::{FulfillmentStatus, LineItemId, Order, OrderId, OrderLineItem};
use orderdash_store::{DashboardStore, InMemoryStore};

struct TestServer {
    base_url: String,
    services: Arc<AppServices>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build the app (same router as prod) over an in-memory store, but
        // bind to an ephemeral port.
        let services = Arc::new(AppServices::with_store(Arc::new(InMemoryStore::new())));
        let app = orderdash_api::app::build_app(services.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            services,
            handle,
        }
    }

    /// Insert one product, then an order per `(customer_name, status)` pair.
    async fn populate(&self, orders: &[(&str, FulfillmentStatus)]) {
        let store = self.services.store();

        let product_id = ProductId::new(EntityId::new());
        store
            .insert_product(Product::new(product_id, "T-Shirt", 1_999, Utc::now()).unwrap())
            .await
            .unwrap();

        for (name, status) in orders {
            let customer_id = CustomerId::new(EntityId::new());
            store
                .insert_customer(
                    Customer::new(customer_id, *name, "4 Pier Lane", Utc::now()).unwrap(),
                )
                .await
                .unwrap();

            let line =
                OrderLineItem::new(LineItemId::new(EntityId::new()), product_id, 2).unwrap();
            store
                .insert_order(Order::new(
                    OrderId::new(EntityId::new()),
                    customer_id,
                    *status,
                    Utc::now(),
                    vec![line],
                ))
                .await
                .unwrap();
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn empty_store_returns_an_empty_page() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/orders?page=1&limit=10", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["orders"].as_array().unwrap().len(), 0);
    assert_eq!(body["total_orders"], 0);
    assert_eq!(body["total_pages"], 0);
}

#[tokio::test]
async fn pagination_splits_a_filtered_result_set() {
    let srv = TestServer::spawn().await;

    // 25 orders, 12 of them PENDING.
    let mut fixtures = Vec::new();
    for i in 0..25 {
        let status = if i < 12 {
            FulfillmentStatus::Pending
        } else {
            FulfillmentStatus::Shipped
        };
        fixtures.push(("Customer", status));
    }
    srv.populate(&fixtures).await;

    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/orders", srv.base_url))
        .query(&[("page", "1"), ("limit", "10"), ("status", "PENDING")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["orders"].as_array().unwrap().len(), 10);
    assert_eq!(body["total_orders"], 12);
    assert_eq!(body["total_pages"], 2);

    let res = client
        .get(format!("{}/orders", srv.base_url))
        .query(&[("page", "2"), ("limit", "10"), ("status", "PENDING")])
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["orders"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn search_matches_customer_names_case_insensitively() {
    let srv = TestServer::spawn().await;
    srv.populate(&[
        ("Annabel Lee", FulfillmentStatus::Pending),
        ("Joanne Ray", FulfillmentStatus::Shipped),
        ("Bob Stone", FulfillmentStatus::Pending),
    ])
    .await;

    let res = reqwest::get(format!("{}/orders?page=1&limit=10&search=ANN", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["total_orders"], 2);
    let names: Vec<&str> = body["orders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["customer"]["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Annabel Lee"));
    assert!(names.contains(&"Joanne Ray"));
}

#[tokio::test]
async fn status_and_search_filters_intersect() {
    let srv = TestServer::spawn().await;
    srv.populate(&[
        ("Annabel Lee", FulfillmentStatus::Shipped),
        ("Annabel Lee", FulfillmentStatus::Pending),
        ("Bob Stone", FulfillmentStatus::Shipped),
    ])
    .await;

    let res = reqwest::get(format!(
        "{}/orders?page=1&limit=10&status=SHIPPED&search=ann",
        srv.base_url
    ))
    .await
    .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["total_orders"], 1);
    let row = &body["orders"][0];
    assert_eq!(row["customer"]["name"], "Annabel Lee");
    assert_eq!(row["fulfillment_status"], "SHIPPED");
}

#[tokio::test]
async fn page_past_the_end_is_an_empty_success() {
    let srv = TestServer::spawn().await;
    srv.populate(&[("Ann", FulfillmentStatus::Pending)]).await;

    let res = reqwest::get(format!("{}/orders?page=9&limit=10", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["orders"].as_array().unwrap().len(), 0);
    assert_eq!(body["total_orders"], 1);
    assert_eq!(body["total_pages"], 1);
}

#[tokio::test]
async fn unknown_status_is_rejected_before_the_store() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/orders?page=1&limit=10&status=TELEPORTED", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_status");
}

#[tokio::test]
async fn non_positive_page_and_limit_are_rejected() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/orders?page=0&limit=10", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = reqwest::get(format!("{}/orders?page=1&limit=0", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn defaults_apply_when_parameters_are_absent() {
    let srv = TestServer::spawn().await;
    let fixtures: Vec<(&str, FulfillmentStatus)> =
        (0..15).map(|_| ("Ann", FulfillmentStatus::Pending)).collect();
    srv.populate(&fixtures).await;

    // No page/limit: page 1 at the default page size.
    let res = reqwest::get(format!("{}/orders", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["orders"].as_array().unwrap().len(), 10);
    assert_eq!(body["total_orders"], 15);
    assert_eq!(body["total_pages"], 2);
}

#[tokio::test]
async fn rows_carry_customer_and_product_enrichment() {
    let srv = TestServer::spawn().await;
    srv.populate(&[("Annabel Lee", FulfillmentStatus::Fulfilled)]).await;

    let res = reqwest::get(format!("{}/orders?page=1&limit=10", srv.base_url))
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let row = &body["orders"][0];

    assert_eq!(row["customer"]["name"], "Annabel Lee");
    assert_eq!(row["customer"]["address"], "4 Pier Lane");
    assert_eq!(row["fulfillment_status"], "FULFILLED");
    assert_eq!(row["line_items"][0]["product_name"], "T-Shirt");
    assert_eq!(row["line_items"][0]["quantity"], 2);
    assert!(row["placed_at"].as_str().is_some());
}
