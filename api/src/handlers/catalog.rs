//! Catalog handlers
//!
//! Public browse/search endpoints and staff CRUD over collections,
//! categories and products.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::{
    CatalogTree, Category, CategoryId, Collection, CollectionId, Product, ProductId, StaffUser,
};
use crate::domain::ports::{
    NewCategory, NewCollection, NewProduct, UpdateCategory, UpdateCollection, UpdateProduct,
};
use crate::error::AppError;
use crate::handlers::{envelope, ApiResponse};
use crate::AppState;

/// GET /catalog
pub async fn browse_catalog(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CatalogTree>>, AppError> {
    let tree = state.catalog_service.browse().await?;
    Ok(envelope("Catalog loaded.", tree))
}

/// GET /catalog/navbar
pub async fn get_navbar(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let navbar = state
        .catalog_service
        .navbar()
        .await?
        .and_then(|c| c.hierarchical_json)
        .unwrap_or_else(|| serde_json::json!([]));
    Ok(envelope("Navbar loaded.", navbar))
}

/// GET /catalog/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Category>>>, AppError> {
    let categories = state.catalog_service.list_categories().await?;
    Ok(envelope("Categories loaded.", categories))
}

#[derive(Debug, Deserialize)]
pub struct ProductSearchQuery {
    pub q: Option<String>,
    pub is_new: Option<bool>,
}

/// GET /products/search?q=...&is_new=...
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<ProductSearchQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>, AppError> {
    let products = state
        .catalog_service
        .search_products(query.q.as_deref(), query.is_new)
        .await?;
    Ok(envelope("Products loaded.", products))
}

/// POST /admin/collections
pub async fn create_collection(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Json(request): Json<NewCollection>,
) -> Result<Json<ApiResponse<Collection>>, AppError> {
    let collection = state
        .catalog_service
        .create_collection(request, &user.username)
        .await?;
    Ok(envelope("Collection created.", collection))
}

/// PATCH /admin/collections/:id
pub async fn update_collection(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCollection>,
) -> Result<Json<ApiResponse<Collection>>, AppError> {
    let collection = state
        .catalog_service
        .update_collection(&CollectionId(id), request, &user.username)
        .await?;
    Ok(envelope("Collection updated.", collection))
}

/// POST /admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Json(request): Json<NewCategory>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let category = state
        .catalog_service
        .create_category(request, &user.username)
        .await?;
    Ok(envelope("Category created.", category))
}

/// PATCH /admin/categories/:id
pub async fn update_category(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategory>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let category = state
        .catalog_service
        .update_category(&CategoryId(id), request, &user.username)
        .await?;
    Ok(envelope("Category updated.", category))
}

/// POST /admin/products
pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Json(request): Json<NewProduct>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let product = state
        .catalog_service
        .create_product(request, &user.username)
        .await?;
    Ok(envelope("Product created.", product))
}

/// PATCH /admin/products/:id
pub async fn update_product(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProduct>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let product = state
        .catalog_service
        .update_product(&ProductId(id), request, &user.username)
        .await?;
    Ok(envelope("Product updated.", product))
}

/// POST /admin/navbar/rebuild
pub async fn rebuild_navbar(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let content = state.catalog_service.rebuild_navbar(&user.username).await?;
    Ok(envelope(
        "Navbar rebuilt.",
        content.hierarchical_json.unwrap_or_default(),
    ))
}
