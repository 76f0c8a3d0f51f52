//! Business logic services

pub mod auth;
pub mod bookings;
pub mod listings;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub listings: listings::ListingsService,
    pub bookings: bookings::BookingsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            listings: listings::ListingsService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository),
        }
    }
}
