use esp_idf_svc::nvs::{EspCustomNvsPartition, EspNvs, NvsCustom};
use log::{info, warn};

use crate::scaler::Bounds;

use super::MonitorConfig;

const PARTITION_NAME: &str = "config";
const NAMESPACE: &str = "config";

pub const KEY_SSID: &str = "SSID";
pub const KEY_PASSPHRASE: &str = "PASS";
pub const KEY_HTTP_PORT: &str = "PORT";
pub const KEY_RAIN_THRESHOLD: &str = "RAINTHR";
pub const KEY_MOIST_WET: &str = "MWET";
pub const KEY_MOIST_DRY: &str = "MDRY";
pub const KEY_TRACE: &str = "TRACE";

pub struct NvsConfiguration {
    nvs: EspNvs<NvsCustom>,
}

impl NvsConfiguration {
    pub fn new() -> anyhow::Result<Self> {
        let partition = EspCustomNvsPartition::take(PARTITION_NAME)?;

        Ok(Self {
            nvs: EspNvs::new(partition, NAMESPACE, false)?,
        })
    }

    pub fn apply(&self, mut config: MonitorConfig) -> MonitorConfig {
        if let Some(ssid) = self.read_string(KEY_SSID) {
            config.ssid = ssid;
        }

        if let Some(passphrase) = self.read_string(KEY_PASSPHRASE) {
            config.passphrase = passphrase;
        }

        if let Some(port) = self.nvs.get_u16(KEY_HTTP_PORT).unwrap_or(None) {
            config.http_port = port;
        }

        if let Some(threshold) = self.nvs.get_i32(KEY_RAIN_THRESHOLD).unwrap_or(None) {
            config.rain_threshold = threshold;
        }

        let wet = self.nvs.get_i32(KEY_MOIST_WET).unwrap_or(None);
        let dry = self.nvs.get_i32(KEY_MOIST_DRY).unwrap_or(None);
        if wet.is_some() || dry.is_some() {
            let wet = wet.unwrap_or(config.moisture_bounds.lower());
            let dry = dry.unwrap_or(config.moisture_bounds.upper());

            match Bounds::new(wet, dry) {
                Ok(bounds) => config.moisture_bounds = bounds,
                Err(e) => warn!("Ignoring stored moisture calibration: {e}"),
            }
        }

        if let Some(trace) = self.nvs.get_u8(KEY_TRACE).unwrap_or(None) {
            config.trace_readings = trace != 0;
        }

        info!("Configuration loaded from NVS partition '{PARTITION_NAME}'");
        config
    }

    fn read_string(&self, key: &str) -> Option<String> {
        let size = self.nvs.str_len(key).unwrap_or(None).unwrap_or(0);

        if size == 0 {
            return None;
        }

        let mut buf = vec![0; size];

        self.nvs
            .get_str(key, &mut buf)
            .unwrap_or(None)
            .map(|s| s.trim_end_matches('\0').to_owned())
    }
}
