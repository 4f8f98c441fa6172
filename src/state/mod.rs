//! State management module
//!
//! This module holds the application and viewer context and the per-page
//! event state built on top of it.

pub mod context;
pub mod event_view;

// Re-export commonly used state components
pub use context::{AppContext, ContextSummary, ViewerContext};
pub use event_view::EventView;
