pub mod composite;
pub mod email;
pub mod webhook;

pub use composite::CompositeNotifier;
pub use email::EmailNotifier;
pub use webhook::WebhookNotifier;
