#[cfg(target_os = "espidf")]
pub mod nvs_configuration;

use std::time::Duration;

use mutually_exclusive_features::exactly_one_of;

use crate::{
    error::MonitorError,
    network::RetryPolicy,
    scaler::Bounds,
    sensors::{moisture_sensor, raindrop_sensor},
};

exactly_one_of!("wifi-ap", "wifi-station");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WifiMode {
    AccessPoint,
    Station,
}

#[cfg(feature = "wifi-ap")]
pub const WIFI_MODE: WifiMode = WifiMode::AccessPoint;

#[cfg(feature = "wifi-station")]
pub const WIFI_MODE: WifiMode = WifiMode::Station;

pub const DEFAULT_SSID: &str = "garden-node";
pub const DEFAULT_PASSPHRASE: &str = "garden-node-pass";
pub const DEFAULT_HTTP_PORT: u16 = 80;

pub const DEFAULT_TMP36_VREF: f32 = 3.3;

pub const ITERATION_INTERVAL: Duration = Duration::from_millis(1000);
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);
pub const READ_TIMEOUT: Duration = Duration::from_millis(5000);

const MAX_SSID_LEN: usize = 32;
const MIN_PASSPHRASE_LEN: usize = 8;
const MAX_PASSPHRASE_LEN: usize = 63;

#[derive(Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    pub ssid: String,
    pub passphrase: String,
    pub http_port: u16,

    pub raindrop_bounds: Bounds,
    pub moisture_bounds: Bounds,
    pub rain_threshold: i32,
    pub tmp36_vref: f32,

    pub iteration_interval: Duration,
    pub poll_interval: Duration,
    pub read_timeout: Duration,

    pub trace_readings: bool,
    pub retry: RetryPolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            ssid: DEFAULT_SSID.to_string(),
            passphrase: DEFAULT_PASSPHRASE.to_string(),
            http_port: DEFAULT_HTTP_PORT,

            raindrop_bounds: raindrop_sensor::DEFAULT_BOUNDS,
            moisture_bounds: moisture_sensor::DEFAULT_BOUNDS,
            rain_threshold: raindrop_sensor::DEFAULT_RAIN_THRESHOLD,
            tmp36_vref: DEFAULT_TMP36_VREF,

            iteration_interval: ITERATION_INTERVAL,
            poll_interval: POLL_INTERVAL,
            read_timeout: READ_TIMEOUT,

            trace_readings: false,
            retry: RetryPolicy::default(),
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.ssid.is_empty() || self.ssid.len() > MAX_SSID_LEN {
            return Err(MonitorError::InvalidConfig("SSID must be 1 to 32 bytes"));
        }

        let passphrase_len = self.passphrase.len();
        let open_station = WIFI_MODE == WifiMode::Station && passphrase_len == 0;
        if !open_station && !(MIN_PASSPHRASE_LEN..=MAX_PASSPHRASE_LEN).contains(&passphrase_len) {
            return Err(MonitorError::InvalidConfig(
                "Passphrase must be 8 to 63 characters",
            ));
        }

        if self.http_port == 0 {
            return Err(MonitorError::InvalidConfig("HTTP port must not be 0"));
        }

        if !(self.tmp36_vref.is_finite() && self.tmp36_vref > 0.0) {
            return Err(MonitorError::InvalidConfig("TMP36 reference voltage must be positive"));
        }

        if self.read_timeout.is_zero() {
            return Err(MonitorError::InvalidConfig("Read timeout must not be zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(MonitorError::InvalidConfig("At least one network attempt is required"));
        }

        Ok(())
    }
}
