//! Data models module
//!
//! This module contains all data structures exchanged with the event platform

pub mod api;
pub mod user;
pub mod event;
pub mod payment;
pub mod review;

// Re-export commonly used models
pub use api::ApiResponse;
pub use user::{Viewer, Session, UserRole};
pub use event::{EventRecord, EventStatus, HostSummary, ParticipationRecord};
pub use payment::{PaymentIntent, PaymentVerification};
pub use review::{Review, ReviewAuthor, NewReview, FavoriteRecord};
