//! Event and participation models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Lifecycle status as written by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Pending,
    Open,
    Upcoming,
    Ongoing,
    Full,
    Completed,
    Cancelled,
    Closed,
    #[serde(other)]
    Unknown,
}

impl EventStatus {
    /// Statuses under which the backend accepts new participants
    pub fn accepts_participants(self) -> bool {
        matches!(self, EventStatus::Open | EventStatus::Ongoing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Pending => "PENDING",
            EventStatus::Open => "OPEN",
            EventStatus::Upcoming => "UPCOMING",
            EventStatus::Ongoing => "ONGOING",
            EventStatus::Full => "FULL",
            EventStatus::Completed => "COMPLETED",
            EventStatus::Cancelled => "CANCELLED",
            EventStatus::Closed => "CLOSED",
            EventStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host summary embedded in an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSummary {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Server-owned event record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_category: Option<String>,
    /// RFC 3339 instant or plain `YYYY-MM-DD`
    pub date: String,
    /// Free-text start time, e.g. "18:00" or "6:00 PM"
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub status: EventStatus,
    #[serde(default)]
    pub min_participants: u32,
    #[serde(default)]
    pub max_participants: u32,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default)]
    pub joining_fee: f64,
    #[serde(rename = "userId", alias = "hostId")]
    pub host_id: String,
    #[serde(default, rename = "user")]
    pub host: Option<HostSummary>,
}

impl EventRecord {
    pub fn is_free(&self) -> bool {
        self.joining_fee <= 0.0
    }

    pub fn host_name(&self) -> Option<&str> {
        self.host.as_ref().map(|h| h.full_name.as_str())
    }
}

/// Durable proof that the viewer joined an event
///
/// The backend returns loosely-shaped data for this lookup; every field is optional
/// and existence of the record is what matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
