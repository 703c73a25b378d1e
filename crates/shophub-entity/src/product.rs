//! Product catalog entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product row.
///
/// `created_by`/`updated_by` record the administrator who performed the
/// mutation; every privileged write stamps them for traceability.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Product id.
    pub id: Uuid,
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
    /// Whether the product is visible in the storefront.
    pub is_active: bool,
    /// Administrator who created the row.
    pub created_by: Option<Uuid>,
    /// Administrator who last updated the row.
    pub updated_by: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}
