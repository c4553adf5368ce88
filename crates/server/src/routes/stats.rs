//! Admin dashboard statistics.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use crate::db::{MonthlySales, OrderRepository, ProductRepository};
use crate::error::Result;
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

/// Aggregates shown on the dashboard landing page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_orders: i64,
    pub total_sales: Decimal,
    pub trending_products: i64,
    pub total_products: i64,
    pub monthly_sales: Vec<MonthlySales>,
}

/// Compute the dashboard aggregates.
///
/// # Errors
///
/// Returns 401 without a valid admin token, 500 on database failure.
#[instrument(skip(state))]
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<AdminStats>> {
    let orders = OrderRepository::new(state.pool());
    let products = ProductRepository::new(state.pool());

    let total_orders = orders.count().await?;
    let total_sales = orders.sales_total().await?;
    let monthly_sales = orders.monthly_sales().await?;
    let total_products = products.count().await?;
    let trending_products = products.count_trending().await?;

    Ok(Json(AdminStats {
        total_orders,
        total_sales,
        trending_products,
        total_products,
        monthly_sales,
    }))
}
