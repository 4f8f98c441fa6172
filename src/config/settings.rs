//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub payment: PaymentConfig,
    pub schedule: ScheduleConfig,
    pub review: ReviewConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Event platform API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Payment gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub gateway_url: String,
    pub publishable_key: String,
    pub timeout_seconds: u64,
}

/// Timezone used to resolve event dates and the current time
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScheduleConfig {
    /// IANA timezone name; the host's local timezone when absent
    pub timezone: Option<String>,
}

/// Review form constraints
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub min_comment_length: usize,
    pub max_rating: u8,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub json: bool,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub favorites: bool,
    pub reviews: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings from a specific file (extension optional) layered under the environment
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("EVENTHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EventHubError> {
        super::validation::validate_settings(self)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_seconds: 15,
            user_agent: format!("EventHub/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            gateway_url: "https://api.stripe.com".to_string(),
            publishable_key: String::new(),
            timeout_seconds: 30,
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            min_comment_length: 10,
            max_rating: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            favorites: true,
            reviews: true,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            payment: PaymentConfig::default(),
            schedule: ScheduleConfig::default(),
            review: ReviewConfig::default(),
            logging: LoggingConfig::default(),
            features: FeaturesConfig::default(),
        }
    }
}
