use std::time::Duration;

use serde_json::{json, Value};

use crate::domain::entities::alert::AlertRecord;
use crate::domain::ports::notifier::{Notifier, TransportError};
use crate::domain::value_objects::severity::Severity;

/// Webhook notification format, auto-detected from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WebhookFormat {
    Slack,
    Discord,
    Generic,
}

/// Sends alert notifications to an HTTP webhook endpoint.
///
/// Supports Slack (colored attachments), Discord (embeds), and generic JSON
/// payloads. The format is auto-detected from the webhook URL.
///
/// Only alerts at or above `min_severity` are dispatched, and `min_severity`
/// is never lower than `Warning`.
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
    min_severity: Severity,
}

impl WebhookNotifier {
    /// Creates a new webhook notifier targeting the given URL.
    ///
    /// `timeout` covers DNS resolution, connection, and response.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ChannelUnavailable` if the HTTP client
    /// cannot be initialized (e.g. TLS backend failure).
    pub fn new(
        url: String,
        min_severity: Severity,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                TransportError::ChannelUnavailable(format!("cannot create HTTP client: {e}"))
            })?;

        Ok(Self {
            url,
            client,
            min_severity: min_severity.max(Severity::Warning),
        })
    }

    fn detect_format(&self) -> WebhookFormat {
        // Extract host from URL (scheme://host/path) to avoid substring false positives
        let host = self
            .url
            .split("//")
            .nth(1)
            .and_then(|s| s.split('/').next())
            .and_then(|h| h.split(':').next())
            .unwrap_or("");

        if host == "hooks.slack.com" {
            WebhookFormat::Slack
        } else if host == "discord.com" || host == "discordapp.com" {
            WebhookFormat::Discord
        } else {
            WebhookFormat::Generic
        }
    }

    /// Posts a JSON payload to the webhook URL, driving the async client from
    /// the synchronous monitor loop.
    fn send_payload(&self, payload: &Value) -> Result<(), TransportError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| {
            TransportError::ChannelUnavailable("webhook requires a tokio runtime".to_string())
        })?;
        // block_in_place panics on a current-thread runtime
        if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::CurrentThread {
            return Err(TransportError::ChannelUnavailable(
                "webhook requires the multi-threaded tokio runtime".to_string(),
            ));
        }

        let result = tokio::task::block_in_place(|| {
            handle.block_on(self.client.post(&self.url).json(payload).send())
        });

        match result {
            Ok(resp) if resp.status().is_success() => Ok(()),
            Ok(resp) => Err(TransportError::SendFailed(format!(
                "webhook returned HTTP {}",
                resp.status()
            ))),
            Err(e) => Err(TransportError::SendFailed(format!("webhook error: {e}"))),
        }
    }

    // --- Color helpers ---

    const fn severity_color_hex(severity: Severity) -> &'static str {
        match severity {
            Severity::Info => "#3498DB",
            Severity::Warning => "#E67E22",
            Severity::Critical => "#FF0000",
        }
    }

    const fn severity_color_decimal(severity: Severity) -> u32 {
        match severity {
            Severity::Info => 0x00_34_98_DB,
            Severity::Warning => 0x00_E6_7E_22,
            Severity::Critical => 0x00_FF_00_00,
        }
    }

    // --- Alert formatting ---

    fn format_alert(&self, alert: &AlertRecord) -> Value {
        match self.detect_format() {
            WebhookFormat::Slack => Self::format_alert_slack(alert),
            WebhookFormat::Discord => Self::format_alert_discord(alert),
            WebhookFormat::Generic => Self::format_alert_generic(alert),
        }
    }

    fn format_alert_slack(alert: &AlertRecord) -> Value {
        json!({
            "attachments": [{
                "color": Self::severity_color_hex(alert.severity),
                "blocks": [
                    {
                        "type": "header",
                        "text": {
                            "type": "plain_text",
                            "text": format!("{} System Alert [{}]", alert.severity.emoji(), alert.severity)
                        }
                    },
                    {
                        "type": "section",
                        "fields": [
                            { "type": "mrkdwn", "text": format!("*Severity:*\n{}", alert.severity) },
                            { "type": "mrkdwn", "text": format!("*Host:*\n{}", alert.host) }
                        ]
                    },
                    {
                        "type": "section",
                        "text": { "type": "mrkdwn", "text": &alert.message }
                    }
                ]
            }]
        })
    }

    fn format_alert_discord(alert: &AlertRecord) -> Value {
        json!({
            "username": "resmon",
            "embeds": [{
                "title": format!("{} System Alert [{}]", alert.severity.emoji(), alert.severity),
                "description": &alert.message,
                "color": Self::severity_color_decimal(alert.severity),
                "fields": [
                    { "name": "Severity", "value": format!("{}", alert.severity), "inline": true },
                    { "name": "Host", "value": &alert.host, "inline": true }
                ],
                "timestamp": alert.timestamp.to_rfc3339()
            }]
        })
    }

    fn format_alert_generic(alert: &AlertRecord) -> Value {
        json!({
            "source": "resmon",
            "severity": format!("{}", alert.severity),
            "host": &alert.host,
            "message": &alert.message,
            "timestamp": alert.timestamp.to_rfc3339()
        })
    }
}

impl Notifier for WebhookNotifier {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn notify(&self, alert: &AlertRecord) -> Result<(), TransportError> {
        if alert.severity < self.min_severity {
            return Ok(());
        }
        let payload = self.format_alert(alert);
        self.send_payload(&payload)
    }
}
