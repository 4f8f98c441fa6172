//! Viewer model

use serde::{Deserialize, Serialize};

/// Platform roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Host,
    Admin,
}

/// The signed-in person looking at an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: UserRole,
}

impl Viewer {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            email: None,
            role,
        }
    }
}

/// Session credentials issued by the platform's auth flow
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into() }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("access_token", &"<redacted>").finish()
    }
}
