//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{EventHubError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_payment_config(&settings.payment)?;
    validate_schedule_config(&settings.schedule)?;
    validate_review_config(&settings.review)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(EventHubError::Config(
            "API base URL is required".to_string()
        ));
    }

    url::Url::parse(&config.base_url)
        .map_err(|e| EventHubError::Config(format!("Invalid API base URL: {}", e)))?;

    if config.timeout_seconds == 0 {
        return Err(EventHubError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate payment gateway configuration
fn validate_payment_config(config: &super::PaymentConfig) -> Result<()> {
    if config.gateway_url.is_empty() {
        return Err(EventHubError::Config(
            "Payment gateway URL is required".to_string()
        ));
    }

    url::Url::parse(&config.gateway_url)
        .map_err(|e| EventHubError::Config(format!("Invalid payment gateway URL: {}", e)))?;

    if config.timeout_seconds == 0 {
        return Err(EventHubError::Config(
            "Payment gateway timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate timezone configuration
fn validate_schedule_config(config: &super::ScheduleConfig) -> Result<()> {
    if let Some(ref name) = config.timezone {
        name.parse::<chrono_tz::Tz>()
            .map_err(|_| EventHubError::Config(format!("Unknown timezone: {}", name)))?;
    }

    Ok(())
}

/// Validate review form constraints
fn validate_review_config(config: &super::ReviewConfig) -> Result<()> {
    if config.min_comment_length == 0 {
        return Err(EventHubError::Config(
            "Minimum review comment length must be greater than 0".to_string()
        ));
    }

    if config.max_rating == 0 {
        return Err(EventHubError::Config(
            "Maximum rating must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventHubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventHubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
