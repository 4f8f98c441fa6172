//! Event service
//!
//! Fetches event records, checks the viewer's participation and performs
//! free joins.

use tracing::{debug, info};
use crate::models::api::Ignored;
use crate::models::event::{EventRecord, ParticipationRecord};
use crate::utils::errors::{EventHubError, Result};
use super::api::ApiClient;

/// Event service for reading events and joining free ones
#[derive(Clone, Debug)]
pub struct EventService {
    api: ApiClient,
}

impl EventService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch an event by id
    pub async fn fetch_event(&self, event_id: &str) -> Result<EventRecord> {
        debug!(event_id = event_id, "Fetching event");

        match self.api.get::<EventRecord>(&["event", event_id], &[]).await {
            Ok(Some(event)) => Ok(event),
            Ok(None) | Err(EventHubError::Rejected { status: 404, .. }) => Err(EventHubError::NotFound {
                resource: "Event",
                id: event_id.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Look up the viewer's participation record
    ///
    /// A 404, or a 2xx envelope with `success: false`, is the "not joined"
    /// answer, not an error. Any other failure propagates.
    pub async fn check_participation(&self, event_id: &str) -> Result<Option<ParticipationRecord>> {
        debug!(event_id = event_id, "Checking participation");

        match self
            .api
            .get::<serde_json::Value>(&["event", "my-participated-events", event_id], &[])
            .await
        {
            // The payload shape varies across backend versions; presence is what counts
            Ok(data) => Ok(Some(
                data.and_then(|v| serde_json::from_value::<ParticipationRecord>(v).ok())
                    .unwrap_or_default(),
            )),
            Err(EventHubError::Rejected { status: 404 | 200..=299, message }) => {
                debug!(event_id = event_id, message = %message, "No participation record");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Join a free event
    pub async fn participate(&self, event_id: &str) -> Result<()> {
        self.api
            .post::<(), Ignored>(&["event", event_id, "participate"], None)
            .await?;

        info!(event_id = event_id, "Participation created");
        Ok(())
    }
}
