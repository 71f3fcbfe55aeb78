use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Plain connection upgraded with STARTTLS (submission port 587)
    #[default]
    Starttls,
    /// Implicit TLS (port 465)
    Tls,
    /// Unencrypted, for local relays only
    None,
}

/// Everything needed to submit mail, already resolved from config and env.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub security: SmtpSecurity,
    pub sender: String,
    pub recipient: String,
    /// Login name, usually the sender address
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}
