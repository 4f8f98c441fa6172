//! Response envelope shared by every platform endpoint

use serde::{Deserialize, Serialize};

/// `{ success, message?, data? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Payload type for endpoints whose `data` is not used
pub type Ignored = serde::de::IgnoredAny;
