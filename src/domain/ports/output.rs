use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("output destination unavailable: {0}")]
    Unavailable(String),
}

/// A destination for rendered lines: console, log file, or a fan-out of both.
///
/// Lines may carry ANSI colour codes; each sink decides whether to keep them.
pub trait OutputSink: Send + Sync {
    /// Write one line (without trailing newline).
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if the destination cannot be written.
    fn write_line(&self, line: &str) -> Result<(), OutputError>;
}
