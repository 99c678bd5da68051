//! Connectivity status and health classification.

use serde::Serialize;

use crate::api::HealthReport;

/// Tri-state backend reachability shown in the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityStatus {
    Connected,
    Limited,
    Error,
}

impl ConnectivityStatus {
    /// Indicator marker class. Exactly one is applied at a time.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Connected => "text-success",
            Self::Limited => "text-warning",
            Self::Error => "text-danger",
        }
    }

    /// Every marker class, for clearing before a new one is applied.
    pub const ALL_CLASSES: [&'static str; 3] = ["text-success", "text-warning", "text-danger"];
}

/// A status together with the text shown next to the indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub status: ConnectivityStatus,
    pub label: String,
}

impl StatusUpdate {
    pub fn new(status: ConnectivityStatus, label: impl Into<String>) -> Self {
        Self {
            status,
            label: label.into(),
        }
    }

    pub fn connected() -> Self {
        Self::new(ConnectivityStatus::Connected, "Connected")
    }

    pub fn limited() -> Self {
        Self::new(ConnectivityStatus::Limited, "Limited functionality")
    }

    pub fn unavailable() -> Self {
        Self::new(ConnectivityStatus::Error, "Service unavailable")
    }

    pub fn connection_error() -> Self {
        Self::new(ConnectivityStatus::Error, "Connection error")
    }

    pub fn offline() -> Self {
        Self::new(ConnectivityStatus::Error, "Offline")
    }
}

/// Map a health report body to a status.
///
/// A `healthy` backend is only fully connected when none of its component
/// flags report `false`. A component flag reporting `true` without that is
/// `limited`. Otherwise the service is unavailable, even if it says `healthy`.
pub fn classify_health(report: &HealthReport) -> StatusUpdate {
    let healthy = report.status == "healthy";
    let flags = [report.ai_components, report.openai_configured];
    let any_down = flags.iter().any(|f| *f == Some(false));
    let any_up = flags.iter().any(|f| *f == Some(true));

    if healthy && !any_down {
        StatusUpdate::connected()
    } else if any_up {
        StatusUpdate::limited()
    } else {
        StatusUpdate::unavailable()
    }
}
