//! EventHub participation client
//!
//! Client-side workflow for joining events on the EventHub platform: deciding
//! whether an event can be joined right now, running the free or paid join
//! flow, saving favorites and gating host reviews.

#![allow(non_snake_case)]

pub mod config;
pub mod models;
pub mod participation;
pub mod schedule;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventHubError, GatewayError, JoinFailure, Result};

// Re-export main components for easy access
pub use participation::{FavoriteToggle, GateReason, GateVerdict, JoinFlow, JoinPhase, JoinState, ReviewEligibility, ReviewGate};
pub use schedule::ViewerClock;
pub use services::ServiceFactory;
pub use state::{AppContext, EventView, ViewerContext};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
