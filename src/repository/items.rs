//! Items repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        item::{CreateItem, Item, ItemDetails, ItemQuery, UpdateItem},
        user::UserSummary,
    },
};

/// Columns selected for an item joined with its owner's display fields
const ITEM_WITH_OWNER_COLUMNS: &str = r#"
    i.id, i.title, i.description, i.category, i.price, i.deposit, i.image,
    i.location, i.available, i.features, i.condition, i.terms,
    i.created_at, i.updated_at,
    o.id as owner_id, o.name as owner_name, o.email as owner_email,
    o.phone as owner_phone, o.avatar as owner_avatar
"#;

fn item_details_from_row(row: &sqlx::postgres::PgRow) -> ItemDetails {
    ItemDetails {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category: row.get("category"),
        price: row.get("price"),
        deposit: row.get("deposit"),
        image: row.get("image"),
        location: row.get("location"),
        available: row.get("available"),
        features: row.get("features"),
        condition: row.get("condition"),
        terms: row.get("terms"),
        owner: UserSummary {
            id: row.get("owner_id"),
            name: row.get("owner_name"),
            email: row.get("owner_email"),
            phone: row.get("owner_phone"),
            avatar: row.get("owner_avatar"),
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get item by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Item> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Get item by ID with owner display fields, regardless of availability
    pub async fn get_details(&self, id: i32) -> AppResult<ItemDetails> {
        let query = format!(
            "SELECT {} FROM items i JOIN users o ON i.owner_id = o.id WHERE i.id = $1",
            ITEM_WITH_OWNER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))?;

        Ok(item_details_from_row(&row))
    }

    /// Search available items with filters and pagination.
    /// Only listings with available = TRUE are returned.
    pub async fn search(&self, query: &ItemQuery) -> AppResult<(Vec<ItemDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(12).max(1);
        let offset = (page - 1) * limit;

        let category: Option<String> = query.category.map(|c| c.as_str().to_string());
        let search: Option<&str> = query.search.as_deref();

        const FILTER: &str = r#"
            i.available = TRUE
            AND ($1::text IS NULL OR i.category = $1)
            AND ($2::numeric IS NULL OR i.price >= $2)
            AND ($3::numeric IS NULL OR i.price <= $3)
            AND ($4::text IS NULL
                 OR i.title ILIKE '%' || $4 || '%'
                 OR i.description ILIKE '%' || $4 || '%')
        "#;

        let count_query = format!("SELECT COUNT(*) FROM items i WHERE {}", FILTER);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&category)
            .bind(query.min_price)
            .bind(query.max_price)
            .bind(search)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            r#"
            SELECT {}
            FROM items i
            JOIN users o ON i.owner_id = o.id
            WHERE {}
            ORDER BY i.created_at DESC
            LIMIT $5 OFFSET $6
            "#,
            ITEM_WITH_OWNER_COLUMNS, FILTER
        );

        let rows = sqlx::query(&select_query)
            .bind(&category)
            .bind(query.min_price)
            .bind(query.max_price)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let items = rows.iter().map(item_details_from_row).collect();

        Ok((items, total))
    }

    /// List all items owned by a user, newest first, unfiltered by availability
    pub async fn get_by_owner(&self, owner_id: i32) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Create a new item
    pub async fn create(&self, owner_id: i32, item: &CreateItem) -> AppResult<Item> {
        let created = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (
                title, description, category, price, deposit, image,
                owner_id, location, available, features, condition, terms
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.category.unwrap_or_default())
        .bind(item.price)
        .bind(item.deposit.unwrap_or(Decimal::ZERO))
        .bind(
            item.image
                .as_deref()
                .unwrap_or("https://via.placeholder.com/400x300"),
        )
        .bind(owner_id)
        .bind(&item.location)
        .bind(item.available.unwrap_or(true))
        .bind(item.features.clone().unwrap_or_default())
        .bind(item.condition.unwrap_or_default())
        .bind(item.terms.as_deref().unwrap_or("Standard rental terms apply"))
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Partially update an item; absent fields keep their current value
    pub async fn update(&self, id: i32, item: &UpdateItem) -> AppResult<Item> {
        let updated = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                price = COALESCE($5, price),
                deposit = COALESCE($6, deposit),
                image = COALESCE($7, image),
                location = COALESCE($8, location),
                available = COALESCE($9, available),
                features = COALESCE($10, features),
                condition = COALESCE($11, condition),
                terms = COALESCE($12, terms),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.category)
        .bind(item.price)
        .bind(item.deposit)
        .bind(&item.image)
        .bind(&item.location)
        .bind(item.available)
        .bind(&item.features)
        .bind(item.condition)
        .bind(&item.terms)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))?;

        Ok(updated)
    }

    /// Delete an item. Existing bookings keep their snapshot and are not
    /// touched; references to the deleted item become dangling.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Item with id {} not found", id)));
        }

        Ok(())
    }
}
