//! Postgres-backed store implementation.
//!
//! Uses the sqlx runtime query API throughout; the conditional parts of the
//! list/count queries are assembled with `QueryBuilder` so each optional
//! clause is only present when its input is.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, Postgres};
use sqlx::{QueryBuilder, Row};
use uuid::Uuid;

use orderdash_catalog::{Product, ProductId};
use orderdash_core::EntityId;
use orderdash_customers::{Customer, CustomerId};
use orderdash_orders::{FulfillmentStatus, LineItemId, Order, OrderId, OrderLineItem};

use crate::query::OrderFilter;
use crate::store::{DashboardStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          UUID PRIMARY KEY,
    name        TEXT NOT NULL,
    price_cents BIGINT NOT NULL CHECK (price_cents > 0),
    created_at  TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS customers (
    id         UUID PRIMARY KEY,
    name       TEXT NOT NULL,
    address    TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS orders (
    id                 UUID PRIMARY KEY,
    customer_id        UUID NOT NULL REFERENCES customers (id),
    fulfillment_status TEXT NOT NULL,
    placed_at          TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS order_line_items (
    id         UUID PRIMARY KEY,
    order_id   UUID NOT NULL REFERENCES orders (id),
    product_id UUID NOT NULL REFERENCES products (id),
    quantity   INTEGER NOT NULL CHECK (quantity > 0)
);

CREATE INDEX IF NOT EXISTS idx_orders_placed_at ON orders (placed_at, id);
CREATE INDEX IF NOT EXISTS idx_line_items_order ON order_line_items (order_id);
"#;

/// Postgres-backed [`DashboardStore`].
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and return a store over a fresh pool.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Create the four tables (idempotent).
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        tracing::debug!("dashboard schema ensured");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Translate constraint violations into the store error taxonomy.
fn map_insert_err(err: sqlx::Error, what: &str) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        match db.kind() {
            sqlx::error::ErrorKind::UniqueViolation => {
                return StoreError::conflict(format!("{what} already exists"));
            }
            sqlx::error::ErrorKind::ForeignKeyViolation => {
                return StoreError::missing_reference(format!(
                    "{what} references a missing record"
                ));
            }
            _ => {}
        }
    }
    StoreError::Backend(err)
}

/// Escape LIKE metacharacters so a search term is matched literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Append the filter's clauses. The base queries alias `orders` as `o`
/// and join `customers` as `c`.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &OrderFilter) {
    if let Some(status) = filter.status() {
        qb.push(" AND o.fulfillment_status = ");
        qb.push_bind(status.as_str());
    }
    if let Some(needle) = filter.customer_name_contains() {
        qb.push(" AND c.name ILIKE ");
        qb.push_bind(format!("%{}%", escape_like(needle)));
    }
}

fn decode_status(label: &str) -> Result<FulfillmentStatus, StoreError> {
    label
        .parse()
        .map_err(|_| StoreError::decode(format!("unknown fulfillment status {label:?}")))
}

#[async_trait]
impl DashboardStore for PostgresStore {
    async fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO products (id, name, price_cents, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(product.id_typed().0.as_uuid())
        .bind(product.name())
        .bind(product.price_cents() as i64)
        .bind(product.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "product"))?;
        Ok(())
    }

    async fn insert_customer(&self, customer: Customer) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO customers (id, name, address, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(customer.id_typed().0.as_uuid())
        .bind(customer.name())
        .bind(customer.address())
        .bind(customer.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "customer"))?;
        Ok(())
    }

    async fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders (id, customer_id, fulfillment_status, placed_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(order.id_typed().0.as_uuid())
        .bind(order.customer_id().0.as_uuid())
        .bind(order.fulfillment_status().as_str())
        .bind(order.placed_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_err(e, "order"))?;

        for line in order.line_items() {
            sqlx::query(
                "INSERT INTO order_line_items (id, order_id, product_id, quantity) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(line.id_typed().0.as_uuid())
            .bind(order.id_typed().0.as_uuid())
            .bind(line.product_id().0.as_uuid())
            .bind(line.quantity() as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_insert_err(e, "order line item"))?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn count_orders(&self, filter: &OrderFilter) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) AS total FROM orders o \
             JOIN customers c ON c.id = o.customer_id WHERE TRUE",
        );
        push_filter(&mut qb, filter);

        let row = qb.build().fetch_one(&self.pool).await?;
        let total: i64 = row.try_get("total")?;
        Ok(total as u64)
    }

    async fn list_orders(
        &self,
        filter: &OrderFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Order>, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT o.id, o.customer_id, o.fulfillment_status, o.placed_at FROM orders o \
             JOIN customers c ON c.id = o.customer_id WHERE TRUE",
        );
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY o.placed_at ASC, o.id ASC LIMIT ");
        qb.push_bind(limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(offset as i64);

        let rows = qb.build().fetch_all(&self.pool).await?;

        let order_ids: Vec<Uuid> = rows
            .iter()
            .map(|r| r.try_get::<Uuid, _>("id"))
            .collect::<Result<_, _>>()?;
        let mut lines_by_order = self.load_line_items(&order_ids).await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id")?;
            let customer_id: Uuid = row.try_get("customer_id")?;
            let status_label: String = row.try_get("fulfillment_status")?;
            let placed_at: DateTime<Utc> = row.try_get("placed_at")?;

            orders.push(Order::new(
                OrderId::new(EntityId::from_uuid(id)),
                CustomerId::new(EntityId::from_uuid(customer_id)),
                decode_status(&status_label)?,
                placed_at,
                lines_by_order.remove(&id).unwrap_or_default(),
            ));
        }

        Ok(orders)
    }

    async fn customers_by_ids(
        &self,
        ids: &[CustomerId],
    ) -> Result<HashMap<CustomerId, Customer>, StoreError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.0.as_uuid()).collect();
        let rows = sqlx::query(
            "SELECT id, name, address, created_at FROM customers WHERE id = ANY($1)",
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await?;

        let mut customers = HashMap::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id")?;
            let name: String = row.try_get("name")?;
            let address: String = row.try_get("address")?;
            let created_at: DateTime<Utc> = row.try_get("created_at")?;

            let customer_id = CustomerId::new(EntityId::from_uuid(id));
            let customer = Customer::new(customer_id, name, address, created_at)
                .map_err(|e| StoreError::decode(e.to_string()))?;
            customers.insert(customer_id, customer);
        }
        Ok(customers)
    }

    async fn products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Product>, StoreError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.0.as_uuid()).collect();
        let rows = sqlx::query(
            "SELECT id, name, price_cents, created_at FROM products WHERE id = ANY($1)",
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await?;

        let mut products = HashMap::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id")?;
            let name: String = row.try_get("name")?;
            let price_cents: i64 = row.try_get("price_cents")?;
            let created_at: DateTime<Utc> = row.try_get("created_at")?;

            let product_id = ProductId::new(EntityId::from_uuid(id));
            let price = u64::try_from(price_cents)
                .map_err(|_| StoreError::decode(format!("negative price for product {id}")))?;
            let product = Product::new(product_id, name, price, created_at)
                .map_err(|e| StoreError::decode(e.to_string()))?;
            products.insert(product_id, product);
        }
        Ok(products)
    }
}

impl PostgresStore {
    /// One batched fetch for the line items of every listed order.
    async fn load_line_items(
        &self,
        order_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<OrderLineItem>>, StoreError> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query(
            "SELECT id, order_id, product_id, quantity FROM order_line_items \
             WHERE order_id = ANY($1) ORDER BY id ASC",
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut lines_by_order: HashMap<Uuid, Vec<OrderLineItem>> = HashMap::new();
        for row in rows {
            let id: Uuid = row.try_get("id")?;
            let order_id: Uuid = row.try_get("order_id")?;
            let product_id: Uuid = row.try_get("product_id")?;
            let quantity: i32 = row.try_get("quantity")?;

            let quantity = u32::try_from(quantity).map_err(|_| {
                StoreError::decode(format!("non-positive quantity on line item {id}"))
            })?;
            let line = OrderLineItem::new(
                LineItemId::new(EntityId::from_uuid(id)),
                ProductId::new(EntityId::from_uuid(product_id)),
                quantity,
            )
            .map_err(|e| StoreError::decode(e.to_string()))?;
            lines_by_order.entry(order_id).or_default().push(line);
        }
        Ok(lines_by_order)
    }
}
