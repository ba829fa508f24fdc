//! Types that mirror the status service's JSON schema.

use serde::Deserialize;

/// Reported service state. Anything the server sends that we don't
/// recognize maps to `Unknown` instead of failing the whole payload.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Active,
    Offline,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ServiceState {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceState::Active => "active",
            ServiceState::Offline => "offline",
            ServiceState::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SystemStatus {
    #[serde(default)]
    pub status: ServiceState,
    // The server's own notion of its last sync; the dashboard displays the
    // locally persisted record instead (see store.rs).
    #[serde(rename = "lastSync", default = "never")]
    pub last_sync: String,
}

impl SystemStatus {
    /// Sentinel returned whenever the status endpoint is unreachable or its
    /// payload cannot be parsed.
    pub fn offline() -> Self {
        Self {
            status: ServiceState::Offline,
            last_sync: never(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Activity {
    pub id: String,
    pub progress: f64,
    pub time: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SyncOutcome {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl SyncOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

pub(crate) fn never() -> String {
    "Never".to_string()
}
