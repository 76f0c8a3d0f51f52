//! Item directory service

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        item::{CreateItem, Item, ItemDetails, ItemQuery, UpdateItem},
        user::UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ListingsService {
    repository: Repository,
}

impl ListingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search available items with filters and pagination
    pub async fn search_items(&self, query: &ItemQuery) -> AppResult<(Vec<ItemDetails>, i64)> {
        self.repository.items.search(query).await
    }

    /// Get a single item with owner contact fields, regardless of availability
    pub async fn get_item(&self, id: i32) -> AppResult<ItemDetails> {
        self.repository.items.get_details(id).await
    }

    /// Create a new listing owned by the caller
    pub async fn create_item(&self, owner_id: i32, item: CreateItem) -> AppResult<Item> {
        item.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if item.price < Decimal::ZERO {
            return Err(AppError::Validation("Price must be non-negative".to_string()));
        }
        if item.deposit.unwrap_or(Decimal::ZERO) < Decimal::ZERO {
            return Err(AppError::Validation("Deposit must be non-negative".to_string()));
        }

        self.repository.items.create(owner_id, &item).await
    }

    /// Update a listing. Only the owner or an admin may update.
    pub async fn update_item(
        &self,
        id: i32,
        caller: &UserClaims,
        item: UpdateItem,
    ) -> AppResult<Item> {
        item.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if item.price.map_or(false, |p| p < Decimal::ZERO) {
            return Err(AppError::Validation("Price must be non-negative".to_string()));
        }
        if item.deposit.map_or(false, |d| d < Decimal::ZERO) {
            return Err(AppError::Validation("Deposit must be non-negative".to_string()));
        }

        let existing = self.repository.items.get_by_id(id).await?;
        caller.require_self_or_admin(existing.owner_id, "update this item")?;

        self.repository.items.update(id, &item).await
    }

    /// Delete a listing. Only the owner or an admin may delete.
    /// Bookings referencing the item are left in place.
    pub async fn delete_item(&self, id: i32, caller: &UserClaims) -> AppResult<()> {
        let existing = self.repository.items.get_by_id(id).await?;
        caller.require_self_or_admin(existing.owner_id, "delete this item")?;

        self.repository.items.delete(id).await
    }

    /// List the caller's own items, newest first, unfiltered by availability
    pub async fn my_items(&self, owner_id: i32) -> AppResult<Vec<Item>> {
        self.repository.items.get_by_owner(owner_id).await
    }
}
