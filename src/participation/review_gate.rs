//! Review eligibility gate
//!
//! A viewer may review an event's host once, and only after joining. The
//! review control is shown for [`ReviewEligibility::Eligible`] alone; an
//! unknown answer keeps it hidden.

use serde::Serialize;
use tracing::{debug, warn};
use crate::config::ReviewConfig;
use crate::models::event::ParticipationRecord;
use crate::models::review::{NewReview, Review};
use crate::services::ReviewService;
use crate::state::context::{AppContext, ViewerContext};
use crate::utils::errors::{EventHubError, Result};
use crate::utils::logging::log_viewer_action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewEligibility {
    /// Anonymous, or no participation record
    NotParticipant,
    /// The review lookup failed
    Unknown,
    Eligible,
    AlreadyReviewed,
}

#[derive(Debug, Clone)]
pub struct ReviewGate {
    viewer: ViewerContext,
    service: ReviewService,
    config: ReviewConfig,
    event_id: String,
    eligibility: ReviewEligibility,
}

impl ReviewGate {
    pub fn new(context: &AppContext, event_id: impl Into<String>) -> Self {
        Self {
            viewer: context.viewer.clone(),
            service: context.services.reviews.clone(),
            config: context.settings.review.clone(),
            event_id: event_id.into(),
            eligibility: ReviewEligibility::NotParticipant,
        }
    }

    pub fn eligibility(&self) -> ReviewEligibility {
        self.eligibility
    }

    pub fn show_control(&self) -> bool {
        self.eligibility == ReviewEligibility::Eligible
    }

    /// Recompute eligibility for the viewer's current participation
    pub async fn refresh(&mut self, participation: Option<&ParticipationRecord>) -> Result<ReviewEligibility> {
        let user_id = match (self.viewer.viewer_id(), participation) {
            (Some(user_id), Some(_)) => user_id.to_string(),
            _ => {
                self.eligibility = ReviewEligibility::NotParticipant;
                return Ok(self.eligibility);
            }
        };

        match self.service.find_by_event_and_user(&self.event_id, &user_id).await {
            Ok(reviews) => {
                let reviewed = reviews.iter().any(|r| r.is_by(&user_id, &self.event_id));
                self.eligibility = if reviewed {
                    ReviewEligibility::AlreadyReviewed
                } else {
                    ReviewEligibility::Eligible
                };
                debug!(event_id = %self.event_id, eligibility = ?self.eligibility, "Review eligibility resolved");
                Ok(self.eligibility)
            }
            Err(e) => {
                warn!(event_id = %self.event_id, error = %e, "Review lookup failed, hiding review control");
                self.eligibility = ReviewEligibility::Unknown;
                Err(e)
            }
        }
    }

    /// Check the form before anything is sent
    pub fn validate(&self, rating: u8, comment: &str) -> Result<NewReview> {
        if rating == 0 || rating > self.config.max_rating {
            return Err(EventHubError::InvalidInput(format!(
                "Please select a rating between 1 and {}",
                self.config.max_rating
            )));
        }

        let comment = comment.trim();
        if comment.chars().count() < self.config.min_comment_length {
            return Err(EventHubError::InvalidInput(format!(
                "Review must be at least {} characters",
                self.config.min_comment_length
            )));
        }

        Ok(NewReview {
            event_id: self.event_id.clone(),
            rating,
            comment: comment.to_string(),
        })
    }

    /// Submit the viewer's review and hide the control afterwards
    pub async fn submit(&mut self, rating: u8, comment: &str) -> Result<Option<Review>> {
        let viewer = self.viewer.require_viewer("review events")?;
        if self.eligibility != ReviewEligibility::Eligible {
            return Err(EventHubError::InvalidStateTransition {
                from: format!("{:?}", self.eligibility),
                to: "review_submitted".to_string(),
            });
        }

        let review = self.validate(rating, comment)?;
        let created = self.service.create(&review).await?;

        log_viewer_action(&viewer.id, "review_submit", &self.event_id, None);
        self.eligibility = ReviewEligibility::AlreadyReviewed;
        Ok(created)
    }
}
