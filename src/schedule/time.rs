//! Free-text start time parsing and the end-of-day cutoff
//!
//! Hosts enter event times as free text. Two grammars are admitted:
//! 24-hour (`18:00`, `1800`, `7:05`) and 12-hour with a meridiem
//! (`6:00 PM`, `6PM`, `12am`). Anything else is [`ParsedTime::Unparseable`];
//! nothing here panics or returns an error.

use std::sync::OnceLock;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

const PATTERN_24H: &str = r"^([0-9]{1,2}):?([0-9]{2})$";
const PATTERN_12H: &str = r"(?i)^([0-9]{1,2})(?::([0-9]{2}))?\s*(AM|PM)$";

/// Result of reading a host-entered time string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTime {
    Parsed { hour: u32, minute: u32 },
    Unparseable,
}

impl ParsedTime {
    pub fn is_parsed(self) -> bool {
        matches!(self, ParsedTime::Parsed { .. })
    }

    fn checked(hour: u32, minute: u32) -> Self {
        if hour <= 23 && minute <= 59 {
            ParsedTime::Parsed { hour, minute }
        } else {
            ParsedTime::Unparseable
        }
    }
}

fn grammars() -> Option<&'static (Regex, Regex)> {
    static GRAMMARS: OnceLock<Option<(Regex, Regex)>> = OnceLock::new();
    GRAMMARS
        .get_or_init(|| Some((Regex::new(PATTERN_24H).ok()?, Regex::new(PATTERN_12H).ok()?)))
        .as_ref()
}

fn capture_u32(caps: &regex::Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index).and_then(|m| m.as_str().parse().ok())
}

/// Parse a host-entered time string
pub fn parse_time_string(raw: &str) -> ParsedTime {
    let Some((re24, re12)) = grammars() else {
        return ParsedTime::Unparseable;
    };
    let text = raw.trim();

    if let Some(caps) = re24.captures(text) {
        if let (Some(hour), Some(minute)) = (capture_u32(&caps, 1), capture_u32(&caps, 2)) {
            if let parsed @ ParsedTime::Parsed { .. } = ParsedTime::checked(hour, minute) {
                return parsed;
            }
        }
    }

    if let Some(caps) = re12.captures(text) {
        let Some(hour) = capture_u32(&caps, 1) else {
            return ParsedTime::Unparseable;
        };
        let minute = match caps.get(2) {
            Some(m) => match m.as_str().parse() {
                Ok(minute) => minute,
                Err(_) => return ParsedTime::Unparseable,
            },
            None => 0,
        };
        let is_pm = caps
            .get(3)
            .map(|m| m.as_str().eq_ignore_ascii_case("PM"))
            .unwrap_or(false);

        let hour = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
        return ParsedTime::checked(hour, minute);
    }

    ParsedTime::Unparseable
}

/// Combine a calendar date with a time string into a local start, or `None`
/// when the time string matches neither grammar
pub fn event_start_local(date: NaiveDate, time: Option<&str>) -> Option<NaiveDateTime> {
    match parse_time_string(time.unwrap_or_default()) {
        ParsedTime::Parsed { hour, minute } => {
            NaiveTime::from_hms_opt(hour, minute, 0).map(|t| date.and_time(t))
        }
        ParsedTime::Unparseable => None,
    }
}

/// Same calendar day at 23:59:59.999
pub fn end_of_day_local(at: NaiveDateTime) -> NaiveDateTime {
    match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
        Some(t) => at.date().and_time(t),
        None => at,
    }
}

/// Resolved start and relevance cutoff for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// False when the time string was unparseable and `start` is midnight
    pub time_precise: bool,
}

impl EventWindow {
    /// Resolve a window, degrading to midnight of `date` when the time is unreadable
    pub fn resolve(date: NaiveDate, time: Option<&str>) -> Self {
        let (start, time_precise) = match event_start_local(date, time) {
            Some(start) => (start, true),
            None => (date.and_time(NaiveTime::default()), false),
        };

        Self {
            start,
            end: end_of_day_local(start),
            time_precise,
        }
    }

    pub fn has_ended(&self, now: NaiveDateTime) -> bool {
        now > self.end
    }
}
