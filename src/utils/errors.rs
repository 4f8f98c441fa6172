//! Error handling for EventHub
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Fallback shown when the server rejects a request without saying why
pub const GENERIC_REJECTION: &str = "Something went wrong. Please try again.";

/// Main error type for EventHub
#[derive(Error, Debug)]
pub enum EventHubError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Payment gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Join failed: {0}")]
    Join(#[from] JoinFailure),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Payment gateway specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Card-level failure reported by the gateway; the text is shown as-is
    #[error("{0}")]
    Card(String),

    #[error("Payment gateway timeout")]
    Timeout,

    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),

    #[error("Malformed client secret")]
    MalformedSecret,

    #[error("Payment gateway is not configured")]
    NotConfigured,
}

/// Shown when settlement could not be confirmed after the card was charged
pub const VERIFICATION_PENDING: &str =
    "We could not confirm your payment yet. Check My Events before trying to pay again.";

/// Why a join attempt stopped, in the terms shown to the viewer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoinFailure {
    /// The server answered and said no
    #[error("{0}")]
    Rejected(String),

    /// No server verdict was observed
    #[error("Network error. Please try again.")]
    Network,

    /// The gateway declined the card; text is the gateway's own
    #[error("{0}")]
    Card(String),

    /// The card was confirmed but settlement was not acknowledged
    #[error("{0}")]
    VerificationPending(String),
}

impl JoinFailure {
    /// Classify a failed step of a join attempt
    pub fn classify(error: &EventHubError) -> Self {
        match error {
            EventHubError::Join(failure) => failure.clone(),
            EventHubError::Rejected { message, .. } => JoinFailure::Rejected(message.clone()),
            EventHubError::Gateway(GatewayError::Card(message)) => JoinFailure::Card(message.clone()),
            EventHubError::Gateway(gateway @ (GatewayError::NotConfigured | GatewayError::InvalidResponse(_))) => {
                JoinFailure::Rejected(gateway.to_string())
            }
            e if e.is_transport() => JoinFailure::Network,
            EventHubError::NotFound { .. } | EventHubError::Unauthenticated(_) | EventHubError::InvalidInput(_) => {
                JoinFailure::Rejected(error.to_string())
            }
            _ => JoinFailure::Rejected(GENERIC_REJECTION.to_string()),
        }
    }

    /// Text for the viewer
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Result type alias for EventHub operations
pub type Result<T> = std::result::Result<T, EventHubError>;

/// Result type alias for payment gateway operations
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

impl EventHubError {
    /// Build a rejection, falling back to a generic message when the server sent none
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_REJECTION.to_string());
        EventHubError::Rejected { status, message }
    }

    /// True for failures where no server verdict was observed
    pub fn is_transport(&self) -> bool {
        matches!(self, EventHubError::Http(_))
            || matches!(
                self,
                EventHubError::Gateway(GatewayError::Timeout | GatewayError::Unavailable(_))
            )
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventHubError::Http(_) => true,
            EventHubError::Rejected { status, .. } => *status >= 500,
            EventHubError::Gateway(GatewayError::Card(_)) => true,
            EventHubError::Gateway(GatewayError::Timeout) => true,
            EventHubError::Gateway(GatewayError::Unavailable(_)) => true,
            EventHubError::Gateway(_) => false,
            EventHubError::Join(failure) => !matches!(failure, JoinFailure::VerificationPending(_)),
            EventHubError::Config(_) => false,
            EventHubError::NotFound { .. } => false,
            EventHubError::Unauthenticated(_) => false,
            EventHubError::InvalidStateTransition { .. } => false,
            EventHubError::Serialization(_) => false,
            EventHubError::Io(_) => true,
            EventHubError::UrlParse(_) => false,
            EventHubError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventHubError::Config(_) => ErrorSeverity::Critical,
            EventHubError::Unauthenticated(_) => ErrorSeverity::Warning,
            EventHubError::Rejected { .. } => ErrorSeverity::Warning,
            EventHubError::Gateway(GatewayError::Card(_)) => ErrorSeverity::Warning,
            EventHubError::Join(JoinFailure::VerificationPending(_)) => ErrorSeverity::Error,
            EventHubError::Join(_) => ErrorSeverity::Warning,
            EventHubError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
