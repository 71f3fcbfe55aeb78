use thiserror::Error;

use crate::domain::entities::alert::AlertRecord;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
    #[error("notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

/// An external channel that alerts are dispatched through (mail, webhook).
pub trait Notifier: Send + Sync {
    /// Short channel name used in logs.
    fn name(&self) -> &'static str;

    /// Send a notification for the given alert.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the notification fails to send
    /// or the channel is unavailable.
    fn notify(&self, alert: &AlertRecord) -> Result<(), TransportError>;
}
