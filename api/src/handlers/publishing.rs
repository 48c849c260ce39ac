//! Publishing handlers
//!
//! Public blog, policy and deal listings plus their staff management
//! endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::domain::entities::{
    BlogPost, Deal, NewBlogPost, NewDeal, NewPolicy, Policy, StaffUser, UpdatePolicy,
};
use crate::error::AppError;
use crate::handlers::{envelope, ApiResponse};
use crate::AppState;

/// GET /blog/posts
pub async fn list_blog_posts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BlogPost>>>, AppError> {
    let posts = state.publishing_service.published_posts().await?;
    Ok(envelope("Blog posts loaded.", posts))
}

/// GET /blog/posts/:id
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BlogPost>>, AppError> {
    let post = state.publishing_service.get_post(&id).await?;
    Ok(envelope("Blog post loaded.", post))
}

/// POST /admin/blog/posts
pub async fn create_blog_post(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Json(request): Json<NewBlogPost>,
) -> Result<Json<ApiResponse<BlogPost>>, AppError> {
    let post = state
        .publishing_service
        .create_post(request, &user.username)
        .await?;
    Ok(envelope("Blog post created. Pending approval.", post))
}

/// POST /admin/blog/posts/:id/approve
pub async fn approve_blog_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BlogPost>>, AppError> {
    let post = state.publishing_service.approve_post(&id).await?;
    Ok(envelope("Blog post approved.", post))
}

/// GET /policies
pub async fn list_policies(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Policy>>>, AppError> {
    let policies = state.publishing_service.active_policies().await?;
    Ok(envelope("Policies loaded.", policies))
}

/// POST /admin/policies
pub async fn create_policy(
    State(state): State<AppState>,
    Json(request): Json<NewPolicy>,
) -> Result<Json<ApiResponse<Policy>>, AppError> {
    let policy = state.publishing_service.create_policy(request).await?;
    Ok(envelope("Policy created.", policy))
}

/// PATCH /admin/policies/:id
pub async fn update_policy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePolicy>,
) -> Result<Json<ApiResponse<Policy>>, AppError> {
    let policy = state.publishing_service.update_policy(&id, request).await?;
    Ok(envelope("Policy updated.", policy))
}

/// GET /deals
pub async fn list_deals(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Deal>>>, AppError> {
    let deals = state.publishing_service.active_deals().await?;
    Ok(envelope("Deals loaded.", deals))
}

/// GET /admin/deals
pub async fn list_all_deals(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Deal>>>, AppError> {
    let deals = state.publishing_service.all_deals().await?;
    Ok(envelope("Deals loaded.", deals))
}

/// POST /admin/deals
pub async fn create_deal(
    State(state): State<AppState>,
    Json(request): Json<NewDeal>,
) -> Result<Json<ApiResponse<Deal>>, AppError> {
    let deal = state.publishing_service.create_deal(request).await?;
    Ok(envelope("Deal created.", deal))
}

/// DELETE /admin/deals/:id
pub async fn delete_deal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    state.publishing_service.delete_deal(&id).await?;
    Ok(envelope("Deal deleted.", serde_json::json!({"id": id})))
}
