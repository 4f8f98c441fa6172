//! Event page state
//!
//! [`EventView`] holds everything one event page shows to one viewer: the
//! event snapshot, the viewer's participation, the favorite toggle, review
//! eligibility and the host's reviews. The join verdict is derived on demand
//! from the snapshot and the viewer's clock.

use std::sync::Arc;
use chrono::NaiveDateTime;
use tracing::{debug, info, warn};
use crate::models::event::{EventRecord, ParticipationRecord};
use crate::models::review::Review;
use crate::participation::gate::{self, GateReason, GateVerdict};
use crate::participation::join_flow::{JoinFlow, JoinState, ParticipationRefetch};
use crate::participation::{FavoriteToggle, ReviewEligibility, ReviewGate};
use crate::schedule::EventWindow;
use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers;
use super::context::AppContext;

#[derive(Debug)]
pub struct EventView {
    context: AppContext,
    event: EventRecord,
    window: Option<EventWindow>,
    participation: Option<ParticipationRecord>,
    /// A join made from this page was acknowledged by the server
    join_acknowledged: bool,
    favorite: Option<FavoriteToggle>,
    review_gate: Option<ReviewGate>,
    host_reviews: Vec<Review>,
}

impl EventView {
    /// Load an event page
    ///
    /// Only the event itself and the participation lookup are required.
    /// Favorites, review eligibility and host reviews degrade to their empty
    /// states when their calls fail.
    pub async fn load(context: AppContext, event_id: &str) -> Result<Self> {
        let services = Arc::clone(&context.services);

        let (event, host_reviews) = tokio::join!(
            services.events.fetch_event(event_id),
            services.reviews.host_reviews_for_event(event_id),
        );
        let event = event?;
        let host_reviews = host_reviews.unwrap_or_else(|e| {
            warn!(event_id = event_id, error = %e, "Host reviews unavailable");
            Vec::new()
        });

        let participation = if context.viewer.is_authenticated() {
            services.events.check_participation(event_id).await?
        } else {
            None
        };

        let window = context.viewer.clock.event_window(&event);

        let mut favorite = context
            .settings
            .features
            .favorites
            .then(|| FavoriteToggle::new(&context, event_id));
        let mut review_gate = context
            .settings
            .features
            .reviews
            .then(|| ReviewGate::new(&context, event_id));

        tokio::join!(
            async {
                if let Some(favorite) = favorite.as_mut() {
                    if let Err(e) = favorite.load().await {
                        warn!(event_id = event_id, error = %e, "Favorite state unavailable");
                    }
                }
            },
            async {
                if let Some(gate) = review_gate.as_mut() {
                    // Failure leaves the gate at Unknown, which hides the control
                    let _ = gate.refresh(participation.as_ref()).await;
                }
            },
        );

        info!(
            event_id = event_id,
            joined = participation.is_some(),
            viewer = ?context.viewer.viewer_id(),
            "Event view loaded"
        );

        Ok(Self {
            context,
            event,
            window,
            participation,
            join_acknowledged: false,
            favorite,
            review_gate,
            host_reviews,
        })
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn event(&self) -> &EventRecord {
        &self.event
    }

    pub fn window(&self) -> Option<&EventWindow> {
        self.window.as_ref()
    }

    /// The server's participation record, if it reported one
    pub fn participation(&self) -> Option<&ParticipationRecord> {
        self.participation.as_ref()
    }

    /// Joined per the server's record or a join acknowledged on this page
    pub fn has_joined(&self) -> bool {
        self.participation.is_some() || self.join_acknowledged
    }

    pub fn host_reviews(&self) -> &[Review] {
        &self.host_reviews
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite.as_ref().is_some_and(FavoriteToggle::is_favorite)
    }

    pub fn review_eligibility(&self) -> ReviewEligibility {
        self.review_gate
            .as_ref()
            .map_or(ReviewEligibility::NotParticipant, ReviewGate::eligibility)
    }

    pub fn review_control_visible(&self) -> bool {
        self.review_gate.as_ref().is_some_and(ReviewGate::show_control)
    }

    /// Join verdict as of the viewer's current time
    pub fn verdict(&self) -> GateVerdict {
        self.verdict_at(self.context.viewer.clock.now_local())
    }

    pub fn verdict_at(&self, now: NaiveDateTime) -> GateVerdict {
        if self.join_acknowledged && self.participation.is_none() {
            return GateVerdict { join_enabled: false, reason: GateReason::AlreadyJoined };
        }
        gate::evaluate(&self.event, self.participation.as_ref(), self.window.as_ref(), now)
    }

    /// Open a join flow on the current snapshot and press the join control
    pub fn begin_join(&self) -> Result<JoinFlow> {
        let mut flow = JoinFlow::new(&self.context, self.event.clone());
        flow.request_join(&self.verdict())?;
        Ok(flow)
    }

    /// Take over the refetched event and participation of a finished flow
    ///
    /// The participation record stays whatever the server last reported, so
    /// review eligibility only opens once the server has the record. Returns
    /// whether anything changed; flows that are not `Joined` are ignored.
    pub async fn apply_join(&mut self, flow: &JoinFlow) -> bool {
        let JoinState::Joined { event, participation, .. } = flow.state() else {
            return false;
        };

        if let Some(event) = event {
            self.set_event(event.clone());
        }

        self.join_acknowledged = true;
        match participation {
            ParticipationRefetch::Found(record) => self.participation = Some(record.clone()),
            ParticipationRefetch::NotFound => self.participation = None,
            // Keep the last answer the server gave
            ParticipationRefetch::Failed => {}
        }

        self.refresh_review_gate().await;
        true
    }

    /// Refetch the event and the viewer's participation
    pub async fn refresh(&mut self) -> Result<()> {
        let services = Arc::clone(&self.context.services);
        let event = services.events.fetch_event(&self.event.id).await?;
        self.set_event(event);

        if self.context.viewer.is_authenticated() {
            self.participation = services.events.check_participation(&self.event.id).await?;
        }

        self.refresh_review_gate().await;
        debug!(event_id = %self.event.id, "Event view refreshed");
        Ok(())
    }

    /// Flip the favorite state; unchanged on failure
    pub async fn toggle_favorite(&mut self) -> Result<bool> {
        match self.favorite.as_mut() {
            Some(favorite) => favorite.toggle().await,
            None => Err(EventHubError::InvalidInput("Favorites are disabled".to_string())),
        }
    }

    /// Submit a review and reload the host's reviews for display
    pub async fn submit_review(&mut self, rating: u8, comment: &str) -> Result<()> {
        let gate = self
            .review_gate
            .as_mut()
            .ok_or_else(|| EventHubError::InvalidInput("Reviews are disabled".to_string()))?;
        gate.submit(rating, comment).await?;

        match self.context.services.reviews.host_reviews_for_event(&self.event.id).await {
            Ok(reviews) => self.host_reviews = reviews,
            Err(e) => warn!(event_id = %self.event.id, error = %e, "Host reviews refetch failed"),
        }
        Ok(())
    }

    /// One-line description for listings and logs
    pub fn summary(&self) -> String {
        let when = self
            .window
            .as_ref()
            .map(|w| {
                format!(
                    "{} at {}",
                    helpers::format_event_date(w.start),
                    helpers::format_event_time(self.event.time.as_deref(), w.start)
                )
            })
            .unwrap_or_else(|| "Date to be announced".to_string());

        format!(
            "{} | {} | {} | {}",
            helpers::truncate_text(&self.event.title, 60),
            when,
            helpers::format_fee(self.event.joining_fee),
            helpers::format_spots_left(&self.event)
        )
    }

    fn set_event(&mut self, event: EventRecord) {
        self.window = self.context.viewer.clock.event_window(&event);
        self.event = event;
    }

    async fn refresh_review_gate(&mut self) {
        if let Some(gate) = self.review_gate.as_mut() {
            let _ = gate.refresh(self.participation.as_ref()).await;
        }
    }
}
