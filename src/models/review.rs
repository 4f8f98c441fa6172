//! Review and favorite models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Author details embedded in a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAuthor {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
}

/// A rating of an event's host by a participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    #[serde(default)]
    pub host_id: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<ReviewAuthor>,
}

impl Review {
    pub fn is_by(&self, user_id: &str, event_id: &str) -> bool {
        self.user_id == user_id && self.event_id == event_id
    }
}

/// `POST /review` body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub event_id: String,
    pub rating: u8,
    pub comment: String,
}

/// Membership of an event in the viewer's saved list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub event_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// `POST /favourite-events` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest<'a> {
    pub event_id: &'a str,
}
