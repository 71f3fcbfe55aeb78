pub mod notifier;
pub mod output;
pub mod renderer;
pub mod sampler;

pub use notifier::{Notifier, TransportError};
pub use output::{OutputError, OutputSink};
pub use renderer::LineRenderer;
pub use sampler::{Sampler, SamplingError};
