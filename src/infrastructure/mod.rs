pub mod notifications;
pub mod output;
pub mod samplers;
