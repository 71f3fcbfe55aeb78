use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::Thresholds;
use crate::domain::value_objects::smtp::{SmtpSecurity, SmtpSettings};

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Sampling cadence and run length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    /// Number of ticks in one run
    #[serde(default = "default_duration_ticks")]
    pub duration_ticks: u64,
    /// Host label for alerts; the OS hostname when unset
    #[serde(default)]
    pub host: Option<String>,
}

/// Alert thresholds, in percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_cpu_threshold")]
    pub cpu_percent: f64,
    #[serde(default = "default_memory_threshold")]
    pub memory_percent: f64,
}

/// Console and log-file mirroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Mirror every console line into this file, colour codes stripped
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_true")]
    pub color: bool,
    /// Ring the terminal bell on CRITICAL alerts
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// External transports for WARNING and CRITICAL alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_transport_timeout")]
    pub transport_timeout_secs: u64,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub webhook_min_severity: Option<Severity>,
    #[serde(default)]
    pub email: Option<EmailConfig>,
}

/// SMTP submission settings. The password is never stored here: it is read
/// from the environment variable named by `password_env`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub security: SmtpSecurity,
    pub sender: String,
    pub recipient: String,
    /// SMTP login; the sender address when unset
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

// --- Defaults ---

const fn default_interval() -> u64 {
    1
}

const fn default_duration_ticks() -> u64 {
    10
}

const fn default_cpu_threshold() -> f64 {
    50.0
}

const fn default_memory_threshold() -> f64 {
    80.0
}

const fn default_true() -> bool {
    true
}

const fn default_transport_timeout() -> u64 {
    10
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".into()
}

const fn default_smtp_port() -> u16 {
    587
}

fn default_password_env() -> String {
    "RESMON_SMTP_PASSWORD".into()
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            duration_ticks: default_duration_ticks(),
            host: None,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cpu_percent: default_cpu_threshold(),
            memory_percent: default_memory_threshold(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            color: default_true(),
            bell: default_true(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            transport_timeout_secs: default_transport_timeout(),
            webhook_url: None,
            webhook_min_severity: None,
            email: None,
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = self.to_toml()?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Render the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Default config location: `<config dir>/resmon/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory is unknown.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("resmon").join("config.toml"))
    }

    /// Check the values a run depends on before anything starts.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.general.interval_secs == 0 {
            bail!("general.interval_secs must be at least 1");
        }
        if self.general.duration_ticks == 0 {
            bail!("general.duration_ticks must be at least 1");
        }
        check_percent("thresholds.cpu_percent", self.thresholds.cpu_percent)?;
        check_percent("thresholds.memory_percent", self.thresholds.memory_percent)?;
        if self.notifications.transport_timeout_secs == 0 {
            bail!("notifications.transport_timeout_secs must be at least 1");
        }
        if let Some(url) = &self.notifications.webhook_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                bail!("notifications.webhook_url must be an http(s) URL, got '{url}'");
            }
        }
        if let Some(email) = self.active_email() {
            if email.sender.trim().is_empty() {
                bail!("notifications.email.sender is required");
            }
            if email.recipient.trim().is_empty() {
                bail!("notifications.email.recipient is required");
            }
            if email.password_env.trim().is_empty() {
                bail!("notifications.email.password_env is required");
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.general.interval_secs)
    }

    #[must_use]
    pub const fn transport_timeout(&self) -> Duration {
        Duration::from_secs(self.notifications.transport_timeout_secs)
    }

    /// Email settings when present and enabled.
    #[must_use]
    pub fn active_email(&self) -> Option<&EmailConfig> {
        self.notifications.email.as_ref().filter(|e| e.enabled)
    }
}

fn check_percent(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= 100.0 {
        Ok(())
    } else {
        bail!("{name} must be within (0, 100], got {value}")
    }
}

impl EmailConfig {
    /// Resolve into transport settings, reading the password from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the password variable is unset or empty.
    pub fn resolve(&self, timeout: Duration) -> Result<SmtpSettings> {
        let password = std::env::var(&self.password_env)
            .ok()
            .filter(|p| !p.is_empty())
            .with_context(|| {
                format!(
                    "SMTP password missing: set the {} environment variable",
                    self.password_env
                )
            })?;

        Ok(SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            security: self.security,
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
            username: self.username.clone().unwrap_or_else(|| self.sender.clone()),
            password,
            timeout,
        })
    }
}

impl From<&ThresholdConfig> for Thresholds {
    fn from(config: &ThresholdConfig) -> Self {
        Self::new(config.cpu_percent, config.memory_percent)
    }
}
