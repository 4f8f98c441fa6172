//! Favorite events service

use tracing::debug;
use crate::models::api::Ignored;
use crate::models::review::{AddFavoriteRequest, FavoriteRecord};
use crate::utils::errors::Result;
use super::api::ApiClient;

#[derive(Clone, Debug)]
pub struct FavoriteService {
    api: ApiClient,
}

impl FavoriteService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The viewer's saved events
    pub async fn list(&self) -> Result<Vec<FavoriteRecord>> {
        Ok(self
            .api
            .get::<Vec<FavoriteRecord>>(&["favourite-events"], &[])
            .await?
            .unwrap_or_default())
    }

    /// Membership check against the viewer's saved list
    pub async fn contains(&self, event_id: &str) -> Result<bool> {
        let favorites = self.list().await?;
        let found = favorites.iter().any(|f| f.event_id == event_id);
        debug!(event_id = event_id, favorite = found, "Favorite membership checked");
        Ok(found)
    }

    pub async fn add(&self, event_id: &str) -> Result<()> {
        let body = AddFavoriteRequest { event_id };
        self.api
            .post::<_, Ignored>(&["favourite-events"], Some(&body))
            .await?;
        Ok(())
    }

    pub async fn remove(&self, event_id: &str) -> Result<()> {
        self.api
            .delete::<Ignored>(&["favourite-events", event_id])
            .await?;
        Ok(())
    }
}
