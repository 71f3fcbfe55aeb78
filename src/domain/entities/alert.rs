use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::severity::Severity;

/// A rendered alert, ready for the console and the transports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    /// Hostname of the monitored machine
    pub host: String,
}

impl AlertRecord {
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>, host: impl Into<String>) -> Self {
        Self::at(Utc::now(), severity, message, host)
    }

    #[must_use]
    pub fn at(
        timestamp: DateTime<Utc>,
        severity: Severity,
        message: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            severity,
            timestamp,
            host: host.into(),
        }
    }
}
