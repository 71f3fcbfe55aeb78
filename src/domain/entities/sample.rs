use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const BYTES_PER_GIB: f64 = 1_073_741_824.0;

/// CPU and memory utilization read at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    /// Average CPU usage over the last measurement window, 0-100
    pub cpu_percent: f64,
    /// Share of physical memory in use, 0-100
    pub memory_percent: f64,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
}

impl Sample {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn memory_used_gib(&self) -> f64 {
        self.memory_used_bytes as f64 / BYTES_PER_GIB
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn memory_total_gib(&self) -> f64 {
        self.memory_total_bytes as f64 / BYTES_PER_GIB
    }
}
