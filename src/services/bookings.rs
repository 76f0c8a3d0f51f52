//! Booking lifecycle service

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{
            BookingDetails, BookingQuery, BookingRole, BookingStatus, CreateBooking, NewBooking,
        },
        user::UserClaims,
    },
    repository::Repository,
};

/// Every rental runs for exactly one fixed 24-hour window
pub const RENTAL_PERIOD_HOURS: i64 = 24;

/// Compute the rental window for a requested start
pub fn rental_window(start: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (start, start + Duration::hours(RENTAL_PERIOD_HOURS))
}

/// Amount due at creation: rental price plus deposit, snapshotted from the
/// item and never recomputed
pub fn total_amount(rental_price: Decimal, deposit: Decimal) -> Decimal {
    rental_price + deposit
}

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new booking for an available item.
    ///
    /// The availability read and the insert are two independent statements:
    /// two concurrent requests for the same item can both succeed. The item
    /// flag is not flipped by booking.
    pub async fn create_booking(
        &self,
        renter_id: i32,
        request: CreateBooking,
    ) -> AppResult<BookingDetails> {
        let item = self.repository.items.get_by_id(request.item).await?;

        if !item.available {
            return Err(AppError::BusinessRule(
                "Item is not available for booking".to_string(),
            ));
        }

        let (start_date, end_date) = rental_window(request.start_date);

        let booking = NewBooking {
            item_id: item.id,
            renter_id,
            owner_id: item.owner_id,
            start_date,
            end_date,
            total_hours: RENTAL_PERIOD_HOURS as i32,
            rental_price: item.price,
            deposit: item.deposit,
            total_amount: total_amount(item.price, item.deposit),
            pickup_location: request.pickup_location.or_else(|| Some(item.location.clone())),
            return_location: request.return_location.or(Some(item.location)),
            notes: request.notes,
        };

        let booking_id = self.repository.bookings.create(&booking).await?;
        self.repository.bookings.get_details(booking_id).await
    }

    /// List the caller's bookings as renter (default) or owner, newest first
    pub async fn list_bookings(
        &self,
        user_id: i32,
        query: &BookingQuery,
    ) -> AppResult<Vec<BookingDetails>> {
        let role = query.role.unwrap_or(BookingRole::Renter);
        self.repository
            .bookings
            .list_for_user(user_id, role, query.status)
            .await
    }

    /// Get a single booking; visible to renter, owner, or admin
    pub async fn get_booking(&self, id: i32, caller: &UserClaims) -> AppResult<BookingDetails> {
        let details = self.repository.bookings.get_details(id).await?;

        if details.renter.id != caller.user_id
            && details.owner.id != caller.user_id
            && !caller.is_admin()
        {
            return Err(AppError::Authorization(
                "Not authorized to view this booking".to_string(),
            ));
        }

        Ok(details)
    }

    /// Confirm a booking. Owner only; the current status is not checked.
    pub async fn confirm_booking(&self, id: i32, caller: &UserClaims) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(id).await?;

        if booking.owner_id != caller.user_id {
            return Err(AppError::Authorization(
                "Only the owner can confirm bookings".to_string(),
            ));
        }

        self.repository
            .bookings
            .set_status(id, BookingStatus::Confirmed)
            .await?;
        self.repository.bookings.get_details(id).await
    }

    /// Cancel a booking. Either party may cancel, from any status.
    pub async fn cancel_booking(&self, id: i32, caller: &UserClaims) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(id).await?;

        if booking.renter_id != caller.user_id && booking.owner_id != caller.user_id {
            return Err(AppError::Authorization(
                "Not authorized to cancel this booking".to_string(),
            ));
        }

        self.repository
            .bookings
            .set_status(id, BookingStatus::Cancelled)
            .await?;
        self.repository.bookings.get_details(id).await
    }

    /// Complete a booking. Owner only; the current status is not checked.
    pub async fn complete_booking(&self, id: i32, caller: &UserClaims) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(id).await?;

        if booking.owner_id != caller.user_id {
            return Err(AppError::Authorization(
                "Only the owner can complete bookings".to_string(),
            ));
        }

        self.repository
            .bookings
            .set_status(id, BookingStatus::Completed)
            .await?;
        self.repository.bookings.get_details(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_is_exactly_twenty_four_hours() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap();
        let (s, e) = rental_window(start);

        assert_eq!(s, start);
        assert_eq!(e - s, Duration::hours(24));
        assert_eq!(e, Utc.with_ymd_and_hms(2025, 6, 2, 14, 30, 0).unwrap());
    }

    #[test]
    fn total_is_price_plus_deposit() {
        let total = total_amount(Decimal::from(100), Decimal::from(20));
        assert_eq!(total, Decimal::from(120));
    }

    #[test]
    fn zero_deposit_total_equals_price() {
        // 45.50 + 0.00
        let price = Decimal::new(4550, 2);
        assert_eq!(total_amount(price, Decimal::ZERO), price);
    }
}
