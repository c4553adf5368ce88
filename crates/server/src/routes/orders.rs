//! Order route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use lina_optic_core::{Email, OrderId, OrderStatus};

use super::MessageResponse;
use crate::db::{OrderRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdmin;
use crate::models::order::{CreateOrder, NewOrder, NewOrderItem, Order};
use crate::state::AppState;

/// Filters accepted by the admin order listing.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Body for updating an order's status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Place an order.
///
/// Line items are priced from the catalog at the moment of ordering; the
/// client never sends prices or totals.
///
/// # Errors
///
/// Returns 400 for an empty order, bad quantities, an invalid email, or an
/// unknown product reference.
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateOrder>,
) -> Result<(StatusCode, Json<Order>)> {
    request.validate().map_err(AppError::BadRequest)?;

    let email = Email::parse(request.email.trim())
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let products = ProductRepository::new(state.pool());
    let mut items = Vec::with_capacity(request.items.len());
    for item in &request.items {
        let product = products
            .get(item.product_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("unknown product {}", item.product_id)))?;

        items.push(NewOrderItem {
            product_id: product.id,
            color_name: item.color_name.clone(),
            quantity: item.quantity,
            unit_price: product.new_price,
        });
    }

    let new_order = NewOrder {
        name: request.name,
        email,
        phone: request.phone,
        address: request.address,
        items,
    };

    let order = OrderRepository::new(state.pool()).create(&new_order).await?;
    tracing::info!(order_id = %order.id, total = %order.total, "Order placed");

    Ok((StatusCode::CREATED, Json(order)))
}

/// Orders placed with the given email, newest first.
///
/// # Errors
///
/// Returns 400 if the path segment is not a valid email.
pub async fn by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Order>>> {
    let email = Email::parse(email.trim())
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let orders = OrderRepository::new(state.pool())
        .list_by_email(&email)
        .await?;
    Ok(Json(orders))
}

/// All orders, newest first (dashboard view).
///
/// # Errors
///
/// Returns 401 without a valid admin token.
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_all(query.status)
        .await?;
    Ok(Json(orders))
}

/// Update an order's status.
///
/// # Errors
///
/// Returns 404 if the order doesn't exist, 401 without a valid admin token.
#[instrument(skip(state, request))]
pub async fn update_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update_status(OrderId::new(id), request.status)
        .await?;
    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");

    Ok(Json(order))
}

/// Delete an order.
///
/// # Errors
///
/// Returns 404 if the order doesn't exist, 401 without a valid admin token.
#[instrument(skip(state))]
pub async fn destroy(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>> {
    let deleted = OrderRepository::new(state.pool())
        .delete(OrderId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("order {id}")));
    }

    tracing::info!(order_id = id, "Order deleted");
    Ok(Json(MessageResponse::new("Order deleted successfully")))
}
