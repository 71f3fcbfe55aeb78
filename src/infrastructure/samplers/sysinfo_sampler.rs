use std::sync::Mutex;
use std::time::Instant;

use sysinfo::{System, MINIMUM_CPU_UPDATE_INTERVAL};

use crate::domain::entities::sample::Sample;
use crate::domain::ports::sampler::{Sampler, SamplingError};

/// Readings above 100% by less than this are rounding noise and get clamped.
const PERCENT_TOLERANCE: f64 = 0.5;

/// Returns `(numerator / denominator) * 100.0`, or `0.0` when `denominator` is zero.
#[allow(clippy::cast_precision_loss)]
fn safe_percent(numerator: u64, denominator: u64) -> f64 {
    if denominator > 0 {
        (numerator as f64 / denominator as f64) * 100.0
    } else {
        0.0
    }
}

/// Rejects NaN and out-of-range percentages instead of passing them on.
fn checked_percent(metric: &'static str, value: f64) -> Result<f64, SamplingError> {
    if value.is_finite() && (0.0..=100.0 + PERCENT_TOLERANCE).contains(&value) {
        Ok(value.min(100.0))
    } else {
        Err(SamplingError::InvalidReading { metric, value })
    }
}

struct SamplerState {
    sys: System,
    last_cpu_refresh: Instant,
}

/// Samples CPU and memory usage using the `sysinfo` crate.
///
/// CPU usage is averaged between two refreshes, so each sample covers the
/// time since the previous one. The very first sample waits until sysinfo's
/// minimum measurement window has elapsed since construction.
///
/// Uses `Mutex` for interior mutability since the `Sampler` trait takes
/// `&self` but `sysinfo::System` needs `&mut self` for refresh.
pub struct SysinfoSampler {
    state: Mutex<SamplerState>,
}

impl SysinfoSampler {
    #[must_use]
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        Self {
            state: Mutex::new(SamplerState {
                sys,
                last_cpu_refresh: Instant::now(),
            }),
        }
    }

    /// Hostname used to label alerts, `unknown-host` if the OS won't say.
    #[must_use]
    pub fn host_name() -> String {
        System::host_name().unwrap_or_else(|| "unknown-host".to_string())
    }
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for SysinfoSampler {
    fn sample(&self) -> Result<Sample, SamplingError> {
        let mut state = self.state.lock().map_err(|e| {
            SamplingError::MetricsUnavailable(format!("sampler lock poisoned: {e}"))
        })?;

        let since_last = state.last_cpu_refresh.elapsed();
        if since_last < MINIMUM_CPU_UPDATE_INTERVAL {
            std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL - since_last);
        }

        state.sys.refresh_cpu_usage();
        state.last_cpu_refresh = Instant::now();
        state.sys.refresh_memory();

        let sys = &state.sys;
        if sys.cpus().is_empty() {
            return Err(SamplingError::MetricsUnavailable(
                "no CPUs reported by the OS".to_string(),
            ));
        }

        let total = sys.total_memory();
        if total == 0 {
            return Err(SamplingError::MetricsUnavailable(
                "total memory reported as zero".to_string(),
            ));
        }
        let used = sys.used_memory();

        let cpu_percent = checked_percent("cpu", f64::from(sys.global_cpu_usage()))?;
        let memory_percent = checked_percent("memory", safe_percent(used, total))?;

        Ok(Sample {
            timestamp: chrono::Utc::now(),
            cpu_percent,
            memory_percent,
            memory_used_bytes: used,
            memory_total_bytes: total,
        })
    }
}
