//! Test data helpers for creating platform payloads
//!
//! JSON builders shaped like the platform's responses plus typed records
//! for tests that bypass the HTTP layer.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use EventHub::models::event::EventRecord;
use EventHub::models::user::{UserRole, Viewer};

pub const TEST_USER_ID: &str = "user-1";
pub const TEST_HOST_ID: &str = "host-1";
pub const TEST_SESSION_TOKEN: &str = "test-session-token";

/// The instant every test clock is frozen at (a Sunday morning, UTC)
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

pub fn test_viewer() -> Viewer {
    let mut viewer = Viewer::new(TEST_USER_ID, "Ada Dancer", UserRole::User);
    viewer.email = Some("ada@example.com".to_string());
    viewer
}

/// Builder for event payloads
#[derive(Debug, Clone)]
pub struct EventJson {
    pub id: String,
    pub status: String,
    pub date: String,
    pub time: Option<String>,
    pub current: u32,
    pub max: u32,
    pub fee: f64,
}

impl EventJson {
    /// An open free event ten days after [`test_now`] with plenty of room
    pub fn open(id: &str) -> Self {
        Self {
            id: id.to_string(),
            status: "OPEN".to_string(),
            date: "2025-06-10T00:00:00.000Z".to_string(),
            time: Some("7:00 PM".to_string()),
            current: 4,
            max: 20,
            fee: 0.0,
        }
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    pub fn time(mut self, time: Option<&str>) -> Self {
        self.time = time.map(str::to_string);
        self
    }

    pub fn spots(mut self, current: u32, max: u32) -> Self {
        self.current = current;
        self.max = max;
        self
    }

    pub fn fee(mut self, fee: f64) -> Self {
        self.fee = fee;
        self
    }

    pub fn build(&self) -> Value {
        json!({
            "id": self.id,
            "title": "Lindy Hop Social",
            "description": "Social dancing with a live band",
            "eventCategory": "DANCE",
            "date": self.date,
            "time": self.time,
            "location": "Studio 5, Dhaka",
            "status": self.status,
            "minParticipants": 2,
            "maxParticipants": self.max,
            "currentParticipants": self.current,
            "joiningFee": self.fee,
            "userId": TEST_HOST_ID,
            "user": {
                "id": TEST_HOST_ID,
                "fullName": "Harper Host",
                "email": "host@example.com"
            }
        })
    }

    pub fn record(&self) -> EventRecord {
        serde_json::from_value(self.build()).unwrap()
    }
}

pub fn participation_json(event_id: &str) -> Value {
    json!({
        "id": format!("part-{event_id}"),
        "eventId": event_id,
        "userId": TEST_USER_ID,
        "createdAt": "2025-05-20T10:00:00.000Z"
    })
}

pub fn review_json(id: &str, event_id: &str, user_id: &str, rating: u8, comment: &str) -> Value {
    json!({
        "id": id,
        "eventId": event_id,
        "userId": user_id,
        "hostId": TEST_HOST_ID,
        "rating": rating,
        "comment": comment,
        "createdAt": "2025-05-21T10:00:00.000Z",
        "user": { "id": user_id, "fullName": "Reviewer" }
    })
}
