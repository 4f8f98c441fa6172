//! Helper functions and utilities
//!
//! This module contains display helpers used when presenting an event.

use chrono::NaiveDateTime;
use crate::models::event::EventRecord;

/// Format a joining fee for display
pub fn format_fee(amount: f64) -> String {
    if amount <= 0.0 {
        "Free".to_string()
    } else if amount.fract() == 0.0 {
        format!("${}", amount as u64)
    } else {
        format!("${:.2}", amount)
    }
}

/// Remaining spots, never negative
pub fn spots_left(event: &EventRecord) -> u32 {
    event.max_participants.saturating_sub(event.current_participants)
}

/// Human readable spots line
pub fn format_spots_left(event: &EventRecord) -> String {
    match spots_left(event) {
        0 => "No spots left".to_string(),
        1 => "1 spot left".to_string(),
        n => format!("{} spots left", n),
    }
}

/// Long display date, e.g. "Sunday, June 1, 2025"
pub fn format_event_date(start: NaiveDateTime) -> String {
    start.format("%A, %B %-d, %Y").to_string()
}

/// Prefer the host-entered time string, else derive one from the resolved start
pub fn format_event_time(raw: Option<&str>, start: NaiveDateTime) -> String {
    match raw.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => t.to_string(),
        None => start.format("%-I:%M %p").to_string(),
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
