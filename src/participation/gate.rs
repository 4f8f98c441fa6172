//! Capacity and status gatekeeper
//!
//! Folds the event's status, its spot count, the temporal window and the
//! viewer's participation into one verdict. Rules are evaluated in order and
//! the first match wins:
//!
//! 1. a participation record exists: `already-joined`
//! 2. now is past the end of the event's day: `ended`
//! 3. no spots left by count: `full`
//! 4. status is neither `OPEN` nor `ONGOING`: `not-open`
//! 5. otherwise `joinable`
//!
//! Status and spot count are written by different backend paths and can
//! disagree, so both must say "not full" before the join control is enabled.

use chrono::NaiveDateTime;
use serde::Serialize;
use crate::models::event::{EventRecord, ParticipationRecord};
use crate::schedule::EventWindow;

/// Why joining is or is not currently permitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GateReason {
    AlreadyJoined,
    Ended,
    Full,
    NotOpen,
    Joinable,
}

impl GateReason {
    pub fn code(self) -> &'static str {
        match self {
            GateReason::AlreadyJoined => "already-joined",
            GateReason::Ended => "ended",
            GateReason::Full => "full",
            GateReason::NotOpen => "not-open",
            GateReason::Joinable => "joinable",
        }
    }

    /// Text for the join control
    pub fn message(self) -> &'static str {
        match self {
            GateReason::AlreadyJoined => "You have joined this event",
            GateReason::Ended => "This event has ended",
            GateReason::Full => "This event is full",
            GateReason::NotOpen => "This event is not open for joining",
            GateReason::Joinable => "Join this event",
        }
    }
}

impl std::fmt::Display for GateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateVerdict {
    pub join_enabled: bool,
    pub reason: GateReason,
}

impl GateVerdict {
    fn of(reason: GateReason) -> Self {
        Self {
            join_enabled: reason == GateReason::Joinable,
            reason,
        }
    }
}

/// Decide whether the viewer may join right now
///
/// `window` is `None` when the event's date could not be read; such an event
/// is never reported joinable.
pub fn evaluate(
    event: &EventRecord,
    participation: Option<&ParticipationRecord>,
    window: Option<&EventWindow>,
    now: NaiveDateTime,
) -> GateVerdict {
    if participation.is_some() {
        return GateVerdict::of(GateReason::AlreadyJoined);
    }

    if window.is_some_and(|w| w.has_ended(now)) {
        return GateVerdict::of(GateReason::Ended);
    }

    if event.current_participants >= event.max_participants {
        return GateVerdict::of(GateReason::Full);
    }

    if !event.status.accepts_participants() || window.is_none() {
        return GateVerdict::of(GateReason::NotOpen);
    }

    GateVerdict::of(GateReason::Joinable)
}
