use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::ports::output::{OutputError, OutputSink};

pub const DEFAULT_LOG_PATH: &str = "~/.local/share/resmon/resmon.log";

/// Appends lines to a plain-text log file with ANSI escape sequences removed.
pub struct LogFileOutput {
    path: PathBuf,
}

impl LogFileOutput {
    /// Creates a sink for `path`, expanding a leading `~`.
    #[must_use]
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path);
        Self {
            path: PathBuf::from(expanded.as_ref()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for LogFileOutput {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

impl OutputSink for LogFileOutput {
    fn write_line(&self, line: &str) -> Result<(), OutputError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::Unavailable(format!(
                    "cannot create log directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(file, "{}", strip_ansi(line))?;
        Ok(())
    }
}

/// Removes ANSI escape sequences (CSI such as `\x1b[91m`, and two-byte
/// escapes) from a string. Clean strings are returned borrowed.
#[must_use]
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('[') => {
                chars.next();
                // Parameters and intermediates run until a final byte in @..=~
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(_) => {
                chars.next();
            }
            None => {}
        }
    }
    Cow::Owned(out)
}
