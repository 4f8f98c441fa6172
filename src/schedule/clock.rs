//! Viewer clock
//!
//! Event dates arrive either as UTC instants or as bare calendar dates. The
//! calendar day an instant falls on depends on where the viewer is, so every
//! date and "now" reading goes through a [`ViewerClock`] bound to one timezone.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;
use crate::config::ScheduleConfig;
use crate::models::event::EventRecord;
use crate::utils::errors::{EventHubError, Result};
use super::time::EventWindow;

/// Timezone plus an optional frozen instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerClock {
    zone: Option<Tz>,
    frozen_at: Option<DateTime<Utc>>,
}

impl Default for ViewerClock {
    fn default() -> Self {
        Self::system()
    }
}

impl ViewerClock {
    /// Host timezone, wall-clock time
    pub fn system() -> Self {
        Self { zone: None, frozen_at: None }
    }

    /// Named timezone, wall-clock time
    pub fn in_zone(zone: Tz) -> Self {
        Self { zone: Some(zone), frozen_at: None }
    }

    /// Clock stuck at `now`; used by tests and replays
    pub fn fixed(now: DateTime<Utc>, zone: Option<Tz>) -> Self {
        Self { zone, frozen_at: Some(now) }
    }

    pub fn from_config(config: &ScheduleConfig) -> Result<Self> {
        match &config.timezone {
            Some(name) => {
                let zone = name
                    .parse::<Tz>()
                    .map_err(|_| EventHubError::Config(format!("Unknown timezone: {}", name)))?;
                Ok(Self::in_zone(zone))
            }
            None => Ok(Self::system()),
        }
    }

    pub fn zone(&self) -> Option<Tz> {
        self.zone
    }

    /// Wall-clock reading of an instant in the viewer's timezone
    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self.zone {
            Some(tz) => tz.from_utc_datetime(&instant.naive_utc()).naive_local(),
            None => Local.from_utc_datetime(&instant.naive_utc()).naive_local(),
        }
    }

    pub fn now_local(&self) -> NaiveDateTime {
        self.to_local(self.frozen_at.unwrap_or_else(Utc::now))
    }

    /// Calendar date of an event's `date` field as seen by the viewer
    pub fn event_date(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();

        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(self.to_local(instant.with_timezone(&Utc)).date());
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }

        // Offset-less timestamps are taken as already local
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.date())
    }

    /// Resolve the joinable window of an event; `None` when its date is unreadable
    pub fn event_window(&self, event: &EventRecord) -> Option<EventWindow> {
        match self.event_date(&event.date) {
            Some(date) => Some(EventWindow::resolve(date, event.time.as_deref())),
            None => {
                warn!(event_id = %event.id, date = %event.date, "Event date could not be parsed");
                None
            }
        }
    }
}
