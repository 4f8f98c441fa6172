//! Test context setup
//!
//! Bundles the mock platform, the scripted gateway and settings pointing at
//! them, and builds [`AppContext`]s for signed-in or anonymous viewers.

use std::sync::Arc;
use EventHub::config::Settings;
use EventHub::models::user::{Session, Viewer};
use EventHub::schedule::ViewerClock;
use EventHub::services::PaymentGateway;
use EventHub::state::AppContext;

use super::api_mock::ApiMockServer;
use super::gateway::ScriptedGateway;
use super::test_data::{test_now, test_viewer, TEST_SESSION_TOKEN};

/// Test context containing all necessary test infrastructure
pub struct TestContext {
    pub api: ApiMockServer,
    pub gateway: Arc<ScriptedGateway>,
    pub settings: Settings,
}

impl TestContext {
    pub async fn new() -> Self {
        let api = ApiMockServer::new().await;

        let mut settings = Settings::default();
        settings.api.base_url = api.base_url.clone();
        settings.api.timeout_seconds = 1;
        settings.schedule.timezone = Some("UTC".to_string());

        Self {
            api,
            gateway: Arc::new(ScriptedGateway::new()),
            settings,
        }
    }

    pub fn clock(&self) -> ViewerClock {
        ViewerClock::fixed(test_now(), Some(chrono_tz::UTC))
    }

    /// Context for a given viewer; a session is attached when one is signed in
    pub fn app_context_for(&self, viewer: Option<Viewer>) -> AppContext {
        let session = viewer.as_ref().map(|_| Session::new(TEST_SESSION_TOKEN));
        let gateway: Arc<dyn PaymentGateway> = self.gateway.clone();

        AppContext::with_gateway(self.settings.clone(), session.as_ref(), viewer, gateway)
            .expect("Failed to build app context")
            .with_clock(self.clock())
    }

    pub fn signed_in(&self) -> AppContext {
        self.app_context_for(Some(test_viewer()))
    }

    pub fn anonymous(&self) -> AppContext {
        self.app_context_for(None)
    }
}
