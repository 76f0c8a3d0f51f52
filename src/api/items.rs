//! Item directory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::item::{CreateItem, Item, ItemDetails, ItemQuery, UpdateItem},
};

use super::AuthenticatedUser;

/// Paginated item directory response
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemListResponse {
    pub success: bool,
    pub items: Vec<ItemDetails>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: i64,
}

/// Single item with owner contact fields
#[derive(Serialize, ToSchema)]
pub struct ItemDetailsResponse {
    pub success: bool,
    pub item: ItemDetails,
}

/// Item mutation response
#[derive(Serialize, ToSchema)]
pub struct ItemResponse {
    pub success: bool,
    pub message: String,
    pub item: Item,
}

/// Caller's own listings
#[derive(Serialize, ToSchema)]
pub struct MyItemsResponse {
    pub success: bool,
    pub items: Vec<Item>,
}

/// Deletion confirmation
#[derive(Serialize, ToSchema)]
pub struct DeletedResponse {
    pub success: bool,
    pub message: String,
}

/// List available items with search and pagination
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(ItemQuery),
    responses(
        (status = 200, description = "Available listings", body = ItemListResponse)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<ItemListResponse>> {
    let (items, total) = state.services.listings.search_items(&query).await?;

    let limit = query.limit.unwrap_or(12).max(1);
    let total_pages = (total + limit - 1) / limit;

    Ok(Json(ItemListResponse {
        success: true,
        items,
        total_pages,
        current_page: query.page.unwrap_or(1),
        total,
    }))
}

/// Get item details by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item details", body = ItemDetailsResponse),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ItemDetailsResponse>> {
    let item = state.services.listings.get_item(id).await?;

    Ok(Json(ItemDetailsResponse { success: true, item }))
}

/// Create a new listing
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    security(("bearer_auth" = [])),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(item): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<ItemResponse>)> {
    let created = state
        .services
        .listings
        .create_item(claims.user_id, item)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            success: true,
            message: "Item created successfully".to_string(),
            item: created,
        }),
    ))
}

/// Update an existing listing
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(item): Json<UpdateItem>,
) -> AppResult<Json<ItemResponse>> {
    let updated = state
        .services
        .listings
        .update_item(id, &claims, item)
        .await?;

    Ok(Json(ItemResponse {
        success: true,
        message: "Item updated successfully".to_string(),
        item: updated,
    }))
}

/// Delete a listing
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = DeletedResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<DeletedResponse>> {
    state.services.listings.delete_item(id, &claims).await?;

    Ok(Json(DeletedResponse {
        success: true,
        message: "Item deleted successfully".to_string(),
    }))
}

/// List the caller's own items
#[utoipa::path(
    get,
    path = "/items/owner/me",
    tag = "items",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's listings", body = MyItemsResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_items(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<MyItemsResponse>> {
    let items = state.services.listings.my_items(claims.user_id).await?;

    Ok(Json(MyItemsResponse { success: true, items }))
}
