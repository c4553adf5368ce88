//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use lina_optic_core::ProductId;

use super::MessageResponse;
use crate::db::{ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdmin;
use crate::models::product::{Product, ProductInput};
use crate::state::AppState;

/// List products, newest first.
///
/// Accepts the dashboard search (`?q=`) and the catalog filters
/// (`?mainCategory=`, `?brand=`, `?trending=`, price range, paging).
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(products))
}

/// Fetch a single product.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(product))
}

/// Create a product.
///
/// # Errors
///
/// Returns 400 if the payload fails validation, 401 without a valid
/// admin token.
#[instrument(skip(state, input), fields(title = %input.title))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    input.validate().map_err(AppError::BadRequest)?;

    let product = ProductRepository::new(state.pool()).create(&input).await?;
    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's fields.
///
/// # Errors
///
/// Returns 400 if the payload fails validation, 404 if the product
/// doesn't exist, 401 without a valid admin token.
#[instrument(skip(state, input))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    input.validate().map_err(AppError::BadRequest)?;

    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &input)
        .await?;
    tracing::info!(product_id = %product.id, "Product updated");

    Ok(Json(product))
}

/// Delete a product.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist, 401 without a valid admin token.
#[instrument(skip(state))]
pub async fn destroy(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>> {
    let deleted = ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    tracing::info!(product_id = id, "Product deleted");
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
