//! Product catalog repository.

use sqlx::PgPool;
use uuid::Uuid;

use shophub_core::error::{AppError, ErrorKind};
use shophub_core::result::AppResult;
use shophub_entity::product::Product;

/// Fields for a product insert.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Category reference.
    pub category_id: i32,
    /// Brand name.
    pub brand: String,
    /// Current price.
    pub price: f64,
    /// Optional pre-discount price.
    pub original_price: Option<f64>,
    /// Units in stock.
    pub stock: i32,
    /// Main image URL.
    pub main_image: String,
    /// Full description.
    pub description: String,
    /// Short description for listings.
    pub short_description: String,
    /// Whether the product is visible.
    pub is_active: bool,
}

/// Fields for a product update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    /// Display name.
    pub name: Option<String>,
    /// Category reference.
    pub category_id: Option<i32>,
    /// Brand name.
    pub brand: Option<String>,
    /// Current price.
    pub price: Option<f64>,
    /// Pre-discount price.
    pub original_price: Option<f64>,
    /// Units in stock.
    pub stock: Option<i32>,
    /// Main image URL.
    pub main_image: Option<String>,
    /// Full description.
    pub description: Option<String>,
    /// Short description.
    pub short_description: Option<String>,
    /// Storefront visibility.
    pub is_active: Option<bool>,
}

/// Repository for catalog products.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a product by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find product", e))
    }

    /// Insert a product, stamping the creating administrator.
    pub async fn create(&self, data: &NewProduct, created_by: Uuid) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, category_id, brand, price, original_price, stock, \
             main_image, description, short_description, is_active, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.category_id)
        .bind(&data.brand)
        .bind(data.price)
        .bind(data.original_price)
        .bind(data.stock)
        .bind(&data.main_image)
        .bind(&data.description)
        .bind(&data.short_description)
        .bind(data.is_active)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create product", e))
    }

    /// Apply a partial update, stamping the updating administrator.
    ///
    /// COALESCE keeps columns whose patch field is `None` unchanged.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &ProductPatch,
        updated_by: Uuid,
    ) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET \
             name = COALESCE($2, name), \
             category_id = COALESCE($3, category_id), \
             brand = COALESCE($4, brand), \
             price = COALESCE($5, price), \
             original_price = COALESCE($6, original_price), \
             stock = COALESCE($7, stock), \
             main_image = COALESCE($8, main_image), \
             description = COALESCE($9, description), \
             short_description = COALESCE($10, short_description), \
             is_active = COALESCE($11, is_active), \
             updated_by = $12, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.category_id)
        .bind(&patch.brand)
        .bind(patch.price)
        .bind(patch.original_price)
        .bind(patch.stock)
        .bind(&patch.main_image)
        .bind(&patch.description)
        .bind(&patch.short_description)
        .bind(patch.is_active)
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update product", e))
    }

    /// Set a product's stock level, stamping the updating administrator.
    pub async fn update_stock(
        &self,
        id: Uuid,
        stock: i32,
        updated_by: Uuid,
    ) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET stock = $2, updated_by = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(stock)
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update stock", e))
    }

    /// Hard-delete a product. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete product", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
