//! Product catalog management for administrators.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_database::repositories::product::{NewProduct, ProductPatch, ProductRepository};
use shophub_entity::product::Product;

use crate::context::RequestContext;

/// Handles product create, update, stock, and delete operations. Every
/// mutation is stamped with the acting administrator's id.
#[derive(Debug, Clone)]
pub struct CatalogService {
    products: Arc<ProductRepository>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(products: Arc<ProductRepository>) -> Self {
        Self { products }
    }

    /// Create a product stamped with the actor.
    pub async fn create_product(
        &self,
        ctx: &RequestContext,
        data: NewProduct,
    ) -> AppResult<Product> {
        validate_name(&data.name)?;
        validate_price(data.price)?;
        if let Some(original) = data.original_price {
            validate_price(original)?;
        }
        validate_stock(data.stock)?;
        validate_image_url(&data.main_image)?;

        let product = self.products.create(&data, ctx.user_id).await?;
        info!(actor = %ctx.user_id, product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// Apply a partial update to a product.
    pub async fn update_product(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
        patch: ProductPatch,
    ) -> AppResult<Product> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        if let Some(original) = patch.original_price {
            validate_price(original)?;
        }
        if let Some(stock) = patch.stock {
            validate_stock(stock)?;
        }
        if let Some(image) = &patch.main_image {
            validate_image_url(image)?;
        }

        let product = self
            .products
            .update(product_id, &patch, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        info!(actor = %ctx.user_id, product_id = %product.id, "product updated");
        Ok(product)
    }

    /// Set a product's stock level.
    pub async fn update_stock(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
        stock: i32,
    ) -> AppResult<Product> {
        validate_stock(stock)?;

        let product = self
            .products
            .update_stock(product_id, stock, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        info!(actor = %ctx.user_id, product_id = %product.id, stock, "stock updated");
        Ok(product)
    }

    /// Delete a product.
    pub async fn delete_product(&self, ctx: &RequestContext, product_id: Uuid) -> AppResult<()> {
        let removed = self.products.delete(product_id).await?;
        if !removed {
            return Err(AppError::not_found("Product not found"));
        }
        info!(actor = %ctx.user_id, %product_id, "product deleted");
        Ok(())
    }
}

const MAX_NAME_LENGTH: usize = 255;
const MAX_STOCK: i32 = 999_999;

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Product name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Product name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price <= 0.0 {
        Err(AppError::validation("Price must be a positive number"))
    } else {
        Ok(())
    }
}

fn validate_stock(stock: i32) -> AppResult<()> {
    if !(0..=MAX_STOCK).contains(&stock) {
        Err(AppError::validation(format!(
            "Stock must be between 0 and {MAX_STOCK}"
        )))
    } else {
        Ok(())
    }
}

fn validate_image_url(url: &str) -> AppResult<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(AppError::validation(
            "Image must be an http(s) URL",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shophub_core::error::ErrorKind;

    #[test]
    fn test_name_guard() {
        assert!(validate_name("Wireless Mouse").is_ok());
        assert!(validate_name("  ").is_err());
        assert!(validate_name(&"x".repeat(256)).is_err());
    }

    #[test]
    fn test_price_guard() {
        assert!(validate_price(19.99).is_ok());
        assert_eq!(validate_price(0.0).unwrap_err().kind, ErrorKind::Validation);
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_stock_guard() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(999_999).is_ok());
        assert_eq!(validate_stock(-1).unwrap_err().kind, ErrorKind::Validation);
        assert!(validate_stock(1_000_000).is_err());
    }

    #[test]
    fn test_image_url_guard() {
        assert!(validate_image_url("https://cdn.example.com/p.jpg").is_ok());
        assert!(validate_image_url("http://cdn.example.com/p.jpg").is_ok());
        assert!(validate_image_url("ftp://cdn.example.com/p.jpg").is_err());
        assert!(validate_image_url("/relative/p.jpg").is_err());
    }
}
