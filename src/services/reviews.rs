//! Review service

use tracing::{debug, info};
use crate::models::review::{NewReview, Review};
use crate::utils::errors::Result;
use super::api::ApiClient;

#[derive(Clone, Debug)]
pub struct ReviewService {
    api: ApiClient,
}

impl ReviewService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Reviews filtered by event and author
    pub async fn find_by_event_and_user(&self, event_id: &str, user_id: &str) -> Result<Vec<Review>> {
        debug!(event_id = event_id, user_id = user_id, "Looking up viewer reviews");

        Ok(self
            .api
            .get::<Vec<Review>>(&["review"], &[("eventId", event_id), ("userId", user_id)])
            .await?
            .unwrap_or_default())
    }

    /// Reviews of the host shown on an event page
    pub async fn host_reviews_for_event(&self, event_id: &str) -> Result<Vec<Review>> {
        Ok(self
            .api
            .get::<Vec<Review>>(&["review", "host-reviews", event_id], &[])
            .await?
            .unwrap_or_default())
    }

    /// Submit a review; the server rejects duplicates per (user, event, host)
    pub async fn create(&self, review: &NewReview) -> Result<Option<Review>> {
        let created = self
            .api
            .post::<_, serde_json::Value>(&["review"], Some(review))
            .await?
            .and_then(|data| serde_json::from_value::<Review>(data).ok());
        info!(event_id = %review.event_id, rating = review.rating, "Review submitted");
        Ok(created)
    }
}
