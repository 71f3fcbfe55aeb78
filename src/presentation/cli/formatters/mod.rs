pub mod alert_fmt;
pub mod renderer;
pub mod status_fmt;
pub mod table_fmt;

pub use renderer::TerminalRenderer;
