use thiserror::Error;

use crate::domain::entities::sample::Sample;

#[derive(Error, Debug)]
pub enum SamplingError {
    #[error("failed to read system metrics: {0}")]
    MetricsUnavailable(String),
    #[error("implausible {metric} reading: {value}")]
    InvalidReading { metric: &'static str, value: f64 },
}

pub trait Sampler: Send + Sync {
    /// Take one CPU and memory sample.
    ///
    /// May block while the OS measures CPU usage over its window.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError` if the OS query fails or reports values
    /// that cannot be real.
    fn sample(&self) -> Result<Sample, SamplingError>;
}
