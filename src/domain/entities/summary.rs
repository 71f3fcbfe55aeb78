use serde::{Deserialize, Serialize};

/// Totals accumulated over one monitoring run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of ticks whose status was not OK
    pub alert_count: u64,
    pub ticks_completed: u64,
    /// The run was cut short by a stop signal
    pub interrupted: bool,
}

impl RunSummary {
    /// Closing message emitted as the final INFO alert.
    #[must_use]
    pub fn message(&self) -> String {
        if self.alert_count > 0 {
            format!(
                "Monitoring complete. {} alerts triggered during this session.",
                self.alert_count
            )
        } else {
            "Monitoring complete. No alerts triggered during this session.".to_string()
        }
    }
}
