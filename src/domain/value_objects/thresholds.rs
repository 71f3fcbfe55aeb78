use serde::{Deserialize, Serialize};

/// Percentage boundaries at or above which a resource counts as high
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// CPU usage percentage that raises `CPU HIGH`
    pub cpu_percent: f64,
    /// Memory usage percentage that raises `MEM HIGH`
    pub memory_percent: f64,
}

impl Thresholds {
    #[must_use]
    pub const fn new(cpu_percent: f64, memory_percent: f64) -> Self {
        Self {
            cpu_percent,
            memory_percent,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(50.0, 80.0)
    }
}
