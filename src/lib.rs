pub mod configuration;
pub mod diagnostics;
pub mod error;
pub mod network;
pub mod request_handler;
pub mod scaler;
pub mod sensors;
pub mod server;
pub mod snapshot;

#[cfg(target_os = "espidf")]
pub mod board;
#[cfg(target_os = "espidf")]
pub mod wifi_helper;

pub use error::MonitorError;
