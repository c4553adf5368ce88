//! Order repository for database operations.
//!
//! Orders span two tables: the `orders` row holds the customer and totals,
//! `order_items` the priced lines. Reads always return fully assembled
//! [`Order`] values.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use sqlx::types::Json;

use lina_optic_core::{Email, OrderId, OrderItemId, OrderStatus, ProductId};

use super::RepositoryError;
use crate::models::order::{NewOrder, Order, OrderAddress, OrderItem};

/// Columns selected for every order read, in `OrderRow` order.
const ORDER_COLUMNS: &str =
    "id, name, email, phone, address, total, status, created_at, updated_at";

/// Columns selected for every line-item read, in `ItemRow` order.
const ITEM_COLUMNS: &str = "id, order_id, product_id, color_name, quantity, unit_price";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    name: String,
    email: Email,
    phone: String,
    address: Option<Json<OrderAddress>>,
    total: Decimal,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: OrderItemId,
    order_id: OrderId,
    product_id: Option<ProductId>,
    color_name: Option<String>,
    quantity: i32,
    unit_price: Decimal,
}

impl ItemRow {
    fn into_item(self) -> OrderItem {
        OrderItem {
            id: self.id,
            product_id: self.product_id,
            color_name: self.color_name,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

fn assemble(row: OrderRow, items: Vec<OrderItem>) -> Order {
    Order {
        id: row.id,
        name: row.name,
        email: row.email,
        phone: row.phone,
        address: row.address.map(|a| a.0),
        items,
        total: row.total,
        status: row.status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// One month of sales for the dashboard chart.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    /// Month key, `YYYY-MM`.
    pub month: String,
    /// Number of orders placed that month.
    pub orders: i64,
    /// Sum of order totals that month.
    pub sales: Decimal,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its line items in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create(&self, new_order: &NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders (name, email, phone, address, total) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(&new_order.name)
        .bind(&new_order.email)
        .bind(&new_order.phone)
        .bind(new_order.address.as_ref().map(Json))
        .bind(new_order.total())
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(new_order.items.len());
        for item in &new_order.items {
            let item_row = sqlx::query_as::<_, ItemRow>(&format!(
                "INSERT INTO order_items (order_id, product_id, color_name, quantity, unit_price) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING {ITEM_COLUMNS}"
            ))
            .bind(row.id)
            .bind(item.product_id)
            .bind(&item.color_name)
            .bind(item.quantity)
            .bind(item.unit_price)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item_row.into_item());
        }

        tx.commit().await?;

        Ok(assemble(row, items))
    }

    /// Get an order by id, with items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut items_by_order = self.items_for(&[row.id]).await?;
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                Ok(Some(assemble(row, items)))
            }
            None => Ok(None),
        }
    }

    /// All orders placed with this email, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_email(&self, email: &Email) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE email = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(email)
        .fetch_all(self.pool)
        .await?;

        self.with_items(rows).await
    }

    /// All orders, newest first, optionally narrowed to one status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders WHERE status = $1 \
                     ORDER BY created_at DESC, id DESC"
                ))
                .bind(status)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        self.with_items(rows).await
    }

    /// Update an order's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $1 WHERE id = $2 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let mut items_by_order = self.items_for(&[row.id]).await?;
        let items = items_by_order.remove(&row.id).unwrap_or_default();
        Ok(assemble(row, items))
    }

    /// Delete an order (line items cascade).
    ///
    /// # Returns
    ///
    /// Returns `true` if the order was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Total number of orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Sum of all order totals.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn sales_total(&self) -> Result<Decimal, RepositoryError> {
        let total =
            sqlx::query_scalar::<_, Decimal>("SELECT COALESCE(SUM(total), 0) FROM orders")
                .fetch_one(self.pool)
                .await?;
        Ok(total)
    }

    /// Order count and sales grouped per calendar month, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn monthly_sales(&self) -> Result<Vec<MonthlySales>, RepositoryError> {
        let rows = sqlx::query_as::<_, MonthlySales>(
            "SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month, \
                    COUNT(*) AS orders, \
                    COALESCE(SUM(total), 0) AS sales \
             FROM orders \
             GROUP BY month \
             ORDER BY month",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Attach line items to a batch of order rows.
    async fn with_items(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, RepositoryError> {
        let ids: Vec<OrderId> = rows.iter().map(|r| r.id).collect();
        let mut items_by_order = self.items_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                assemble(row, items)
            })
            .collect())
    }

    /// Fetch the items of the given orders, grouped by order id.
    async fn items_for(
        &self,
        ids: &[OrderId],
    ) -> Result<HashMap<OrderId, Vec<OrderItem>>, RepositoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw_ids: Vec<i32> = ids.iter().map(OrderId::as_i32).collect();
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ANY($1) ORDER BY id"
        ))
        .bind(&raw_ids)
        .fetch_all(self.pool)
        .await?;

        let mut grouped: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            grouped.entry(row.order_id).or_default().push(row.into_item());
        }
        Ok(grouped)
    }
}
