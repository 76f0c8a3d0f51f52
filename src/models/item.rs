//! Item (rental listing) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::user::UserSummary;

/// Listing category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Electronics,
    Vehicles,
    Equipment,
    Sports,
    Tools,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Vehicles => "Vehicles",
            Category::Equipment => "Equipment",
            Category::Sports => "Sports",
            Category::Tools => "Tools",
            Category::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Electronics" => Ok(Category::Electronics),
            "Vehicles" => Ok(Category::Vehicles),
            "Equipment" => Ok(Category::Equipment),
            "Sports" => Ok(Category::Sports),
            "Tools" => Ok(Category::Tools),
            "Other" => Ok(Category::Other),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

// SQLx conversion for Category (stored as TEXT)
impl sqlx::Type<Postgres> for Category {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Category {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Category {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Physical condition of a listed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Condition {
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    Good,
    Fair,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "Like New",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Good
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Condition::New),
            "Like New" => Ok(Condition::LikeNew),
            "Good" => Ok(Condition::Good),
            "Fair" => Ok(Condition::Fair),
            _ => Err(format!("Invalid condition: {}", s)),
        }
    }
}

// SQLx conversion for Condition (stored as TEXT)
impl sqlx::Type<Postgres> for Condition {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Condition {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Condition {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Item model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: Decimal,
    pub deposit: Decimal,
    pub image: String,
    pub owner_id: i32,
    pub location: String,
    pub available: bool,
    pub features: Vec<String>,
    pub condition: Condition,
    pub terms: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item with owner display fields, as returned by the public directory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: Decimal,
    pub deposit: Decimal,
    pub image: String,
    pub location: String,
    pub available: bool,
    pub features: Vec<String>,
    pub condition: Condition,
    pub terms: String,
    pub owner: UserSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create listing request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub category: Option<Category>,
    pub price: Decimal,
    pub deposit: Option<Decimal>,
    pub image: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub available: Option<bool>,
    pub features: Option<Vec<String>>,
    pub condition: Option<Condition>,
    pub terms: Option<String>,
}

/// Update listing request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub category: Option<Category>,
    pub price: Option<Decimal>,
    pub deposit: Option<Decimal>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub available: Option<bool>,
    pub features: Option<Vec<String>>,
    pub condition: Option<Condition>,
    pub terms: Option<String>,
}

/// Item directory query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codec_round_trip() {
        for c in [
            Category::Electronics,
            Category::Vehicles,
            Category::Equipment,
            Category::Sports,
            Category::Tools,
            Category::Other,
        ] {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        assert!("Furniture".parse::<Category>().is_err());
    }

    #[test]
    fn condition_uses_spaced_label() {
        assert_eq!(Condition::LikeNew.as_str(), "Like New");
        assert_eq!("Like New".parse::<Condition>().unwrap(), Condition::LikeNew);

        let json = serde_json::to_string(&Condition::LikeNew).unwrap();
        assert_eq!(json, "\"Like New\"");
    }
}
