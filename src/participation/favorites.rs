//! Favorite toggle
//!
//! The displayed state only changes after the server confirmed the add or
//! remove. A failed call leaves it where it was.

use tracing::{debug, warn};
use crate::services::FavoriteService;
use crate::state::context::{AppContext, ViewerContext};
use crate::utils::errors::Result;
use crate::utils::logging::log_viewer_action;

#[derive(Debug, Clone)]
pub struct FavoriteToggle {
    viewer: ViewerContext,
    service: FavoriteService,
    event_id: String,
    is_favorite: bool,
}

impl FavoriteToggle {
    pub fn new(context: &AppContext, event_id: impl Into<String>) -> Self {
        Self {
            viewer: context.viewer.clone(),
            service: context.services.favorites.clone(),
            event_id: event_id.into(),
            is_favorite: false,
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Read membership from the viewer's saved list
    ///
    /// Anonymous viewers have no saved list and always read `false`.
    pub async fn load(&mut self) -> Result<bool> {
        if !self.viewer.is_authenticated() {
            self.is_favorite = false;
            return Ok(false);
        }

        self.is_favorite = self.service.contains(&self.event_id).await?;
        Ok(self.is_favorite)
    }

    /// Add or remove the event, flipping the state once the server agreed
    pub async fn toggle(&mut self) -> Result<bool> {
        let viewer = self.viewer.require_viewer("save events")?;
        let adding = !self.is_favorite;
        let action = if adding { "favorite_add" } else { "favorite_remove" };

        let outcome = if adding {
            self.service.add(&self.event_id).await
        } else {
            self.service.remove(&self.event_id).await
        };

        match outcome {
            Ok(()) => {
                log_viewer_action(&viewer.id, action, &self.event_id, None);
                self.is_favorite = adding;
                debug!(event_id = %self.event_id, favorite = self.is_favorite, "Favorite toggled");
                Ok(self.is_favorite)
            }
            Err(e) => {
                warn!(event_id = %self.event_id, action = action, error = %e, "Favorite toggle failed");
                Err(e)
            }
        }
    }
}
