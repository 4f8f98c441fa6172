//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the EventHub application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{EventHubError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file appender on drop and must be held
/// for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let stdout_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "eventhub.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(non_blocking).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.level))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| EventHubError::Config(format!("Failed to install tracing subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log viewer actions with structured data
pub fn log_viewer_action(user_id: &str, action: &str, event_id: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        event_id = event_id,
        details = details,
        "Viewer action performed"
    );
}

/// Log a join flow phase change
pub fn log_join_transition(attempt_id: &str, event_id: &str, from: &str, to: &str) {
    debug!(
        attempt_id = attempt_id,
        event_id = event_id,
        from = from,
        to = to,
        "Join flow transition"
    );
}

/// Log payment steps; verification problems are always surfaced at warn level
pub fn log_payment_step(attempt_id: &str, event_id: &str, step: &str, success: bool, details: Option<&str>) {
    if success {
        info!(
            attempt_id = attempt_id,
            event_id = event_id,
            step = step,
            "Payment step completed"
        );
    } else {
        warn!(
            attempt_id = attempt_id,
            event_id = event_id,
            step = step,
            details = details,
            "Payment step failed"
        );
    }
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
