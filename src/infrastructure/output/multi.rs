use crate::domain::ports::output::{OutputError, OutputSink};

/// Fans every line out to a list of sinks.
///
/// Calls each sink in order. A failing sink does not stop the others;
/// the first error is returned after all sinks have been written.
#[derive(Default)]
pub struct MultiOutput {
    sinks: Vec<Box<dyn OutputSink>>,
}

impl MultiOutput {
    #[must_use]
    pub fn new(sinks: Vec<Box<dyn OutputSink>>) -> Self {
        Self { sinks }
    }

    /// Registers another destination.
    pub fn push(&mut self, sink: Box<dyn OutputSink>) {
        self.sinks.push(sink);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl OutputSink for MultiOutput {
    fn write_line(&self, line: &str) -> Result<(), OutputError> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.write_line(line) {
                tracing::warn!("Output sink failed: {e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
