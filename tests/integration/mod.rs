//! Integration tests module
//!
//! This module contains the integration tests for EventHub, organized by
//! component and end-to-end scenarios.

pub mod gateway_test;
pub mod review_gate_test;
pub mod scenarios;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Common setup function for integration tests
pub async fn setup_integration_test() -> crate::helpers::TestContext {
    init_test_logging();
    crate::helpers::TestContext::new().await
}
