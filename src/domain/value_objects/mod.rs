pub mod severity;
pub mod smtp;
pub mod status;
pub mod thresholds;

pub use severity::Severity;
pub use smtp::{SmtpSecurity, SmtpSettings};
pub use status::Status;
pub use thresholds::Thresholds;
