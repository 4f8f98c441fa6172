//! Participation workflow
//!
//! Gatekeeping, the join/payment flow, favorites and review eligibility for
//! a single event page.

pub mod favorites;
pub mod gate;
pub mod join_flow;
pub mod review_gate;

pub use favorites::FavoriteToggle;
pub use gate::{evaluate, GateReason, GateVerdict};
pub use join_flow::{JoinFlow, JoinPhase, JoinState, ParticipationRefetch};
pub use review_gate::{ReviewEligibility, ReviewGate};
