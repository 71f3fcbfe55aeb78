use std::io::Write;

use crate::domain::ports::output::{OutputError, OutputSink};

/// Writes lines to stdout, colour codes included.
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OutputSink for ConsoleOutput {
    fn write_line(&self, line: &str) -> Result<(), OutputError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()?;
        Ok(())
    }
}
