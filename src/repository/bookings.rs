//! Bookings repository for database operations

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{
            BookedItemSummary, Booking, BookingDetails, BookingRole, BookingStatus, NewBooking,
        },
        user::UserSummary,
    },
};

/// Booking columns joined with item and party display fields.
/// The item join is LEFT: bookings outlive deleted listings.
const BOOKING_DETAILS_QUERY: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.total_hours,
           b.rental_price, b.deposit, b.total_amount,
           b.status, b.payment_status,
           b.pickup_location, b.return_location, b.notes, b.created_at,
           i.id as joined_item_id, i.title as item_title, i.image as item_image,
           i.price as item_price, i.category as item_category,
           r.id as renter_id, r.name as renter_name, r.email as renter_email,
           r.phone as renter_phone, r.avatar as renter_avatar,
           o.id as owner_id, o.name as owner_name, o.email as owner_email,
           o.phone as owner_phone, o.avatar as owner_avatar
    FROM bookings b
    LEFT JOIN items i ON b.item_id = i.id
    JOIN users r ON b.renter_id = r.id
    JOIN users o ON b.owner_id = o.id
"#;

fn booking_details_from_row(row: &sqlx::postgres::PgRow) -> BookingDetails {
    let item = row
        .get::<Option<i32>, _>("joined_item_id")
        .map(|id| BookedItemSummary {
            id,
            title: row.get("item_title"),
            image: row.get("item_image"),
            price: row.get("item_price"),
            category: row.get("item_category"),
        });

    BookingDetails {
        id: row.get("id"),
        item,
        renter: UserSummary {
            id: row.get("renter_id"),
            name: row.get("renter_name"),
            email: row.get("renter_email"),
            phone: row.get("renter_phone"),
            avatar: row.get("renter_avatar"),
        },
        owner: UserSummary {
            id: row.get("owner_id"),
            name: row.get("owner_name"),
            email: row.get("owner_email"),
            phone: row.get("owner_phone"),
            avatar: row.get("owner_avatar"),
        },
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        total_hours: row.get("total_hours"),
        rental_price: row.get("rental_price"),
        deposit: row.get("deposit"),
        total_amount: row.get("total_amount"),
        status: row.get("status"),
        payment_status: row.get("payment_status"),
        pickup_location: row.get("pickup_location"),
        return_location: row.get("return_location"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
    }
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Get booking by ID with joined display fields
    pub async fn get_details(&self, id: i32) -> AppResult<BookingDetails> {
        let query = format!("{} WHERE b.id = $1", BOOKING_DETAILS_QUERY);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;

        Ok(booking_details_from_row(&row))
    }

    /// List bookings where the user is the given party, newest first
    pub async fn list_for_user(
        &self,
        user_id: i32,
        role: BookingRole,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<BookingDetails>> {
        let party_column = match role {
            BookingRole::Owner => "b.owner_id",
            BookingRole::Renter => "b.renter_id",
        };

        let query = format!(
            "{} WHERE {} = $1 AND ($2::text IS NULL OR b.status = $2) ORDER BY b.created_at DESC",
            BOOKING_DETAILS_QUERY, party_column
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .bind(status.map(|s| s.as_str().to_string()))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(booking_details_from_row).collect())
    }

    /// Insert a new booking and return its ID.
    /// All pricing fields are snapshots assembled by the service.
    pub async fn create(&self, booking: &NewBooking) -> AppResult<i32> {
        let booking_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO bookings (
                item_id, renter_id, owner_id, start_date, end_date, total_hours,
                rental_price, deposit, total_amount, status, payment_status,
                pickup_location, return_location, notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending', 'pending', $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(booking.item_id)
        .bind(booking.renter_id)
        .bind(booking.owner_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.total_hours)
        .bind(booking.rental_price)
        .bind(booking.deposit)
        .bind(booking.total_amount)
        .bind(&booking.pickup_location)
        .bind(&booking.return_location)
        .bind(&booking.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking_id)
    }

    /// Set a booking's status unconditionally
    pub async fn set_status(&self, id: i32, status: BookingStatus) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE bookings SET status = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Booking with id {} not found", id)));
        }

        Ok(())
    }
}
