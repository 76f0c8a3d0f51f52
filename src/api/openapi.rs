//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, bookings, health, items};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lendora API",
        version = "0.3.0",
        description = "Peer-to-Peer Rental Marketplace REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Lendora Team", email = "dev@lendora.app")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    modifiers(&SecurityAddon),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Items
        items::list_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item,
        items::my_items,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::confirm_booking,
        bookings::cancel_booking,
        bookings::complete_booking,
    ),
    components(
        schemas(
            // Auth
            auth::AuthResponse,
            auth::MeResponse,
            crate::models::user::User,
            crate::models::user::UserSummary,
            crate::models::user::Role,
            crate::models::user::RegisterRequest,
            crate::models::user::LoginRequest,
            // Items
            crate::models::item::Item,
            crate::models::item::ItemDetails,
            crate::models::item::ItemQuery,
            crate::models::item::CreateItem,
            crate::models::item::UpdateItem,
            crate::models::item::Category,
            crate::models::item::Condition,
            items::ItemListResponse,
            items::ItemDetailsResponse,
            items::ItemResponse,
            items::MyItemsResponse,
            items::DeletedResponse,
            // Bookings
            crate::models::booking::BookingDetails,
            crate::models::booking::BookedItemSummary,
            crate::models::booking::BookingQuery,
            crate::models::booking::CreateBooking,
            crate::models::booking::BookingStatus,
            crate::models::booking::PaymentStatus,
            crate::models::booking::BookingRole,
            bookings::BookingResponse,
            bookings::BookingListResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "items", description = "Rental listing directory"),
        (name = "bookings", description = "Booking lifecycle management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
