//! Product catalog handlers (Admin and above).

use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;
use validator::Validate;

use shophub_core::error::AppError;
use shophub_database::repositories::product::{NewProduct, ProductPatch};
use shophub_entity::product::Product;
use shophub_service::RequestContext;

use crate::error::ApiError;
use crate::dto::request::{CreateProductRequest, UpdateProductRequest, UpdateStockRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let product = state
        .catalog_service
        .create_product(
            &ctx,
            NewProduct {
                name: req.name,
                category_id: req.category_id,
                brand: req.brand,
                price: req.price,
                original_price: req.original_price,
                stock: req.stock,
                main_image: req.main_image,
                description: req.description,
                short_description: req.short_description,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(product)))
}

/// PUT /api/products/:id
pub async fn update_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let product = state
        .catalog_service
        .update_product(
            &ctx,
            id,
            ProductPatch {
                name: req.name,
                category_id: req.category_id,
                brand: req.brand,
                price: req.price,
                original_price: req.original_price,
                stock: req.stock,
                main_image: req.main_image,
                description: req.description,
                short_description: req.short_description,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(product)))
}

/// PUT /api/products/:id/stock
pub async fn update_stock(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStockRequest>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let product = state.catalog_service.update_stock(&ctx, id, req.stock).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.catalog_service.delete_product(&ctx, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Product deleted".to_string(),
    })))
}
