use serde::{Deserialize, Serialize};

use super::severity::Severity;

/// Outcome of classifying one sample against the thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Ok,
    CpuHigh,
    MemHigh,
    /// Both CPU and memory are at or above their thresholds
    Critical,
}

impl Status {
    /// Severity of the alert raised for this status, `None` when healthy.
    #[must_use]
    pub const fn severity(&self) -> Option<Severity> {
        match self {
            Self::Ok => None,
            Self::CpuHigh | Self::MemHigh => Some(Severity::Warning),
            Self::Critical => Some(Severity::Critical),
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pad() so that width/alignment specifiers apply in table rows
        f.pad(match self {
            Self::Ok => "OK",
            Self::CpuHigh => "CPU HIGH",
            Self::MemHigh => "MEM HIGH",
            Self::Critical => "CRITICAL",
        })
    }
}
