//! Request DTOs with validation rules.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sign-in request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Account email.
    #[validate(email)]
    pub email: String,
    /// Account password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password, proven against the auth provider.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// Desired new password; the full complexity policy applies.
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// Role change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetRoleRequest {
    /// The role to assign (1 = user, 2 = admin).
    pub role_id: i16,
    /// Optional justification recorded in the history.
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// Product creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Category reference.
    pub category_id: i32,
    /// Brand name.
    #[validate(length(min = 1, max = 255))]
    pub brand: String,
    /// Current price; must be positive.
    pub price: f64,
    /// Optional pre-discount price.
    pub original_price: Option<f64>,
    /// Units in stock.
    #[validate(range(min = 0, max = 999_999))]
    pub stock: i32,
    /// Main image URL; must be http(s).
    #[validate(url)]
    pub main_image: String,
    /// Full description.
    pub description: String,
    /// Short description for listings.
    #[validate(length(max = 500))]
    pub short_description: String,
    /// Storefront visibility.
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

/// Partial product update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// Category reference.
    pub category_id: Option<i32>,
    /// Brand name.
    #[validate(length(min = 1, max = 255))]
    pub brand: Option<String>,
    /// Current price.
    pub price: Option<f64>,
    /// Pre-discount price.
    pub original_price: Option<f64>,
    /// Units in stock.
    #[validate(range(min = 0, max = 999_999))]
    pub stock: Option<i32>,
    /// Main image URL.
    #[validate(url)]
    pub main_image: Option<String>,
    /// Full description.
    pub description: Option<String>,
    /// Short description.
    #[validate(length(max = 500))]
    pub short_description: Option<String>,
    /// Storefront visibility.
    pub is_active: Option<bool>,
}

/// Stock update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStockRequest {
    /// New stock level.
    #[validate(range(min = 0, max = 999_999))]
    pub stock: i32,
}
