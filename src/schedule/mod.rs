//! Temporal eligibility
//!
//! Reconstructs when an event starts, and until when it is still relevant,
//! from its loosely-typed date and free-text time fields.

pub mod clock;
pub mod time;

pub use clock::ViewerClock;
pub use time::{parse_time_string, event_start_local, end_of_day_local, EventWindow, ParsedTime};
