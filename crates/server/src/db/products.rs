//! Product repository for database operations.
//!
//! Scalar product fields are columns; the per-color stock/image variants
//! live in a JSONB `colors` column and are read and written as one unit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::postgres::Postgres;
use sqlx::types::Json;
use sqlx::{PgPool, QueryBuilder};

use lina_optic_core::ProductId;

use super::RepositoryError;
use crate::models::product::{Product, ProductColor, ProductInput};

/// Columns selected for every product read, in `ProductRow` order.
const PRODUCT_COLUMNS: &str = "id, title, description, brand, main_category, sub_category, \
     frame_shape, trending, old_price, new_price, cover_image, colors, created_at, updated_at";

/// Filters accepted by the product listing endpoint.
///
/// `q` matches the title or the id as text, which is what the dashboard
/// search box sends. Everything else narrows the public catalog view.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub main_category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub trending: Option<bool>,
    #[serde(default)]
    pub min_price: Option<Decimal>,
    #[serde(default)]
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    title: String,
    description: String,
    brand: String,
    main_category: String,
    sub_category: String,
    frame_shape: Option<String>,
    trending: bool,
    old_price: Option<Decimal>,
    new_price: Decimal,
    cover_image: Option<String>,
    colors: Json<Vec<ProductColor>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            brand: row.brand,
            main_category: row.main_category,
            sub_category: row.sub_category,
            frame_shape: row.frame_shape,
            trending: row.trending,
            old_price: row.old_price,
            new_price: row.new_price,
            cover_image: row.cover_image,
            colors: row.colors.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, newest first, narrowed by `filter`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"
        ));

        if let Some(q) = filter.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{q}%");
            qb.push(" AND (title ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR CAST(id AS TEXT) ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
        if let Some(main_category) = &filter.main_category {
            qb.push(" AND main_category = ");
            qb.push_bind(main_category);
        }
        if let Some(sub_category) = &filter.sub_category {
            qb.push(" AND sub_category = ");
            qb.push_bind(sub_category);
        }
        if let Some(brand) = &filter.brand {
            qb.push(" AND brand = ");
            qb.push_bind(brand);
        }
        if let Some(trending) = filter.trending {
            qb.push(" AND trending = ");
            qb.push_bind(trending);
        }
        if let Some(min_price) = filter.min_price {
            qb.push(" AND new_price >= ");
            qb.push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            qb.push(" AND new_price <= ");
            qb.push_bind(max_price);
        }

        qb.push(" ORDER BY created_at DESC, id DESC");

        if let Some(limit) = filter.limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit.max(0));
        }
        if let Some(offset) = filter.offset {
            qb.push(" OFFSET ");
            qb.push_bind(offset.max(0));
        }

        let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products \
                 (title, description, brand, main_category, sub_category, frame_shape, \
                  trending, old_price, new_price, cover_image, colors) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.brand)
        .bind(&input.main_category)
        .bind(&input.sub_category)
        .bind(&input.frame_shape)
        .bind(input.trending)
        .bind(input.old_price)
        .bind(input.new_price)
        .bind(&input.cover_image)
        .bind(Json(&input.colors))
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products SET \
                 title = $1, description = $2, brand = $3, main_category = $4, \
                 sub_category = $5, frame_shape = $6, trending = $7, old_price = $8, \
                 new_price = $9, cover_image = $10, colors = $11 \
             WHERE id = $12 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.brand)
        .bind(&input.main_category)
        .bind(&input.sub_category)
        .bind(&input.frame_shape)
        .bind(input.trending)
        .bind(input.old_price)
        .bind(input.new_price)
        .bind(&input.cover_image)
        .bind(Json(&input.colors))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    /// Line items referencing it keep their snapshot and lose the reference.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Total number of products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Number of products flagged as trending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_trending(&self) -> Result<i64, RepositoryError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE trending")
                .fetch_one(self.pool)
                .await?;
        Ok(count)
    }
}
