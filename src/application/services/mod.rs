pub mod alert_sink;
pub mod monitor;
