//! Application and viewer context
//!
//! Every participation component is built from an [`AppContext`]. It carries
//! the settings, the shared services and the [`ViewerContext`] naming who is
//! looking at the page, so identity is an explicit dependency rather than
//! something read from ambient state.

use std::sync::Arc;
use serde::Serialize;
use crate::config::Settings;
use crate::models::user::{Session, Viewer};
use crate::schedule::ViewerClock;
use crate::services::{PaymentGateway, ServiceFactory};
use crate::utils::errors::{EventHubError, Result};

/// Application-wide context containing services and settings
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub services: Arc<ServiceFactory>,
    pub viewer: ViewerContext,
}

impl AppContext {
    pub fn new(settings: Settings, services: ServiceFactory, viewer: ViewerContext) -> Self {
        Self {
            settings,
            services: Arc::new(services),
            viewer,
        }
    }

    /// Build services for the given session and the configured clock
    pub fn from_settings(settings: Settings, session: Option<&Session>, viewer: Option<Viewer>) -> Result<Self> {
        let services = ServiceFactory::new(&settings, session)?;
        let clock = ViewerClock::from_config(&settings.schedule)?;
        Ok(Self::new(settings, services, ViewerContext::new(viewer, clock)))
    }

    /// Same as [`AppContext::from_settings`] with a caller-supplied payment gateway
    pub fn with_gateway(
        settings: Settings,
        session: Option<&Session>,
        viewer: Option<Viewer>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Result<Self> {
        let services = ServiceFactory::with_gateway(&settings, session, gateway)?;
        let clock = ViewerClock::from_config(&settings.schedule)?;
        Ok(Self::new(settings, services, ViewerContext::new(viewer, clock)))
    }

    /// Replace the clock, keeping everything else
    pub fn with_clock(mut self, clock: ViewerClock) -> Self {
        self.viewer.clock = clock;
        self
    }
}

/// Who is viewing, and what time it is for them
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerContext {
    pub viewer: Option<Viewer>,
    pub clock: ViewerClock,
}

impl ViewerContext {
    pub fn new(viewer: Option<Viewer>, clock: ViewerClock) -> Self {
        Self { viewer, clock }
    }

    pub fn anonymous(clock: ViewerClock) -> Self {
        Self { viewer: None, clock }
    }

    pub fn is_authenticated(&self) -> bool {
        self.viewer.is_some()
    }

    pub fn viewer_id(&self) -> Option<&str> {
        self.viewer.as_ref().map(|v| v.id.as_str())
    }

    /// The signed-in viewer, or an error naming the action that needs one
    pub fn require_viewer(&self, action: &str) -> Result<&Viewer> {
        self.viewer
            .as_ref()
            .ok_or_else(|| EventHubError::Unauthenticated(format!("Please log in to {}", action)))
    }

    /// Create a summary of the context for logging
    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            user_id: self.viewer_id().map(str::to_string),
            timezone: self.clock.zone().map(|tz| tz.name().to_string()),
            now_local: self.clock.now_local().to_string(),
        }
    }
}

/// Context summary for logging and debugging
#[derive(Debug, Clone, Serialize)]
pub struct ContextSummary {
    pub user_id: Option<String>,
    pub timezone: Option<String>,
    pub now_local: String,
}
