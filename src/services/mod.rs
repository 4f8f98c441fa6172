//! Services module
//!
//! This module contains the clients for the event platform API and the
//! payment gateway.

pub mod api;
pub mod events;
pub mod favorites;
pub mod gateway;
pub mod payments;
pub mod reviews;

// Re-export commonly used services
pub use api::ApiClient;
pub use events::EventService;
pub use favorites::FavoriteService;
pub use gateway::{PaymentGateway, StripeGateway, intent_id_from_secret};
pub use payments::PaymentService;
pub use reviews::ReviewService;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::models::user::Session;
use crate::utils::errors::Result;

/// Service factory for creating and sharing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub events: EventService,
    pub payments: PaymentService,
    pub favorites: FavoriteService,
    pub reviews: ReviewService,
    pub gateway: Arc<dyn PaymentGateway>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with the Stripe gateway
    pub fn new(settings: &Settings, session: Option<&Session>) -> Result<Self> {
        let gateway = StripeGateway::shared(&settings.payment)?;
        Self::with_gateway(settings, session, gateway)
    }

    /// Create a ServiceFactory around a caller-supplied gateway
    pub fn with_gateway(
        settings: &Settings,
        session: Option<&Session>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Result<Self> {
        let api = ApiClient::new(&settings.api, session)?;

        Ok(Self {
            events: EventService::new(api.clone()),
            payments: PaymentService::new(api.clone()),
            favorites: FavoriteService::new(api.clone()),
            reviews: ReviewService::new(api),
            gateway,
        })
    }
}

impl std::fmt::Debug for ServiceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceFactory")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
