//! Booking lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::booking::{BookingDetails, BookingQuery, CreateBooking},
};

use super::AuthenticatedUser;

/// Single booking response
#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub booking: BookingDetails,
}

/// Booking list response
#[derive(Serialize, ToSchema)]
pub struct BookingListResponse {
    pub success: bool,
    pub bookings: Vec<BookingDetails>,
}

/// Create a new booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Item is not available"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let booking = state
        .services
        .bookings
        .create_booking(claims.user_id, request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            message: Some("Booking created successfully".to_string()),
            booking,
        }),
    ))
}

/// List the caller's bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(BookingQuery),
    responses(
        (status = 200, description = "Caller's bookings, newest first", body = BookingListResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<BookingListResponse>> {
    let bookings = state
        .services
        .bookings
        .list_bookings(claims.user_id, &query)
        .await?;

    Ok(Json(BookingListResponse {
        success: true,
        bookings,
    }))
}

/// Get a single booking
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingResponse),
        (status = 403, description = "Not a party to this booking"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.services.bookings.get_booking(id, &claims).await?;

    Ok(Json(BookingResponse {
        success: true,
        message: None,
        booking,
    }))
}

/// Confirm a booking (owner)
#[utoipa::path(
    put,
    path = "/bookings/{id}/confirm",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking confirmed", body = BookingResponse),
        (status = 403, description = "Only the owner can confirm"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn confirm_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.services.bookings.confirm_booking(id, &claims).await?;

    Ok(Json(BookingResponse {
        success: true,
        message: Some("Booking confirmed successfully".to_string()),
        booking,
    }))
}

/// Cancel a booking (either party)
#[utoipa::path(
    put,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResponse),
        (status = 403, description = "Not a party to this booking"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.services.bookings.cancel_booking(id, &claims).await?;

    Ok(Json(BookingResponse {
        success: true,
        message: Some("Booking cancelled successfully".to_string()),
        booking,
    }))
}

/// Complete a booking (owner)
#[utoipa::path(
    put,
    path = "/bookings/{id}/complete",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking completed", body = BookingResponse),
        (status = 403, description = "Only the owner can complete"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn complete_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.services.bookings.complete_booking(id, &claims).await?;

    Ok(Json(BookingResponse {
        success: true,
        message: Some("Booking completed successfully".to_string()),
        booking,
    }))
}
