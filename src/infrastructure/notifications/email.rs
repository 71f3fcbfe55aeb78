use chrono::Local;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};

use crate::domain::entities::alert::AlertRecord;
use crate::domain::ports::notifier::{Notifier, TransportError};
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::smtp::{SmtpSecurity, SmtpSettings};

/// Sends WARNING and CRITICAL alerts by email through authenticated SMTP.
pub struct EmailNotifier {
    mailer: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
    min_severity: Severity,
}

impl EmailNotifier {
    /// Builds the SMTP transport. No connection is made until the first send.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ChannelUnavailable` if an address does not
    /// parse or the TLS parameters for `host` cannot be built.
    pub fn new(settings: &SmtpSettings) -> Result<Self, TransportError> {
        let from = parse_mailbox("sender", &settings.sender)?;
        let to = parse_mailbox("recipient", &settings.recipient)?;

        let builder = match settings.security {
            SmtpSecurity::Starttls => SmtpTransport::starttls_relay(&settings.host),
            SmtpSecurity::Tls => SmtpTransport::relay(&settings.host),
            SmtpSecurity::None => Ok(SmtpTransport::builder_dangerous(&settings.host)),
        }
        .map_err(|e| {
            TransportError::ChannelUnavailable(format!(
                "cannot set up SMTP relay {}: {e}",
                settings.host
            ))
        })?;

        let mailer = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(settings.timeout))
            .build();

        Ok(Self {
            mailer,
            from,
            to,
            min_severity: Severity::Warning,
        })
    }

    #[must_use]
    pub fn subject(alert: &AlertRecord) -> String {
        format!("System Alert [{}] - {}", alert.severity, alert.host)
    }

    #[must_use]
    pub fn body(alert: &AlertRecord) -> String {
        let timestamp = alert
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S");
        format!(
            "Host: {}\nTime: {timestamp}\n\n{}",
            alert.host, alert.message
        )
    }

    fn compose(&self, alert: &AlertRecord) -> Result<Message, TransportError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(Self::subject(alert))
            .header(ContentType::TEXT_PLAIN)
            .body(Self::body(alert))
            .map_err(|e| TransportError::SendFailed(format!("cannot build message: {e}")))
    }
}

fn parse_mailbox(role: &str, address: &str) -> Result<Mailbox, TransportError> {
    address.parse().map_err(|e| {
        TransportError::ChannelUnavailable(format!("invalid {role} address '{address}': {e}"))
    })
}

impl Notifier for EmailNotifier {
    fn name(&self) -> &'static str {
        "email"
    }

    fn notify(&self, alert: &AlertRecord) -> Result<(), TransportError> {
        if alert.severity < self.min_severity {
            return Ok(());
        }

        let message = self.compose(alert)?;
        self.mailer
            .send(&message)
            .map_err(|e| TransportError::SendFailed(format!("SMTP delivery failed: {e}")))?;

        tracing::info!("Email alert sent to {}", self.to);
        Ok(())
    }
}
