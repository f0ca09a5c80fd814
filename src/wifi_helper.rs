use std::{net::Ipv4Addr, str::FromStr};

use anyhow::anyhow;
use embedded_svc::wifi::{AccessPointConfiguration, AuthMethod, ClientConfiguration, Configuration};
use esp_idf_svc::hal::{modem::Modem, peripheral::Peripheral};
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    ipv4::{self, Mask, Subnet},
    netif::{EspNetif, NetifConfiguration, NetifStack},
    nvs::EspDefaultNvsPartition,
    wifi::{BlockingWifi, EspWifi, WifiDriver},
};
use log::info;

use crate::{
    configuration::{MonitorConfig, WifiMode, WIFI_MODE},
    network::NetworkLayer,
};

const AP_GATEWAY: &str = "192.168.4.1";
const AP_CHANNEL: u8 = 1;
const AP_MAX_CONNECTIONS: u16 = 4;

pub struct EspWifiNetwork<'a> {
    wifi: BlockingWifi<EspWifi<'a>>,
    mode: WifiMode,
}

impl<'a> EspWifiNetwork<'a> {
    pub fn new(modem: impl Peripheral<P = Modem> + 'a, config: &MonitorConfig) -> anyhow::Result<Self> {
        let sys_loop = EspSystemEventLoop::take()?;
        let nvs = EspDefaultNvsPartition::take()?;

        let wifi_drv = WifiDriver::new(modem, sys_loop.clone(), Some(nvs))?;
        let wifi_esp = EspWifi::wrap_all(
            wifi_drv,
            EspNetif::new(NetifStack::Sta)?,
            EspNetif::new_with_conf(&NetifConfiguration {
                ip_configuration: ipv4::Configuration::Router(ipv4::RouterConfiguration {
                    subnet: Subnet {
                        gateway: Ipv4Addr::from_str(AP_GATEWAY)?,
                        mask: Mask(24),
                    },
                    ..Default::default()
                }),
                ..NetifConfiguration::wifi_default_router()
            })?,
        )?;

        let mut wifi = BlockingWifi::wrap(wifi_esp, sys_loop)?;

        info!("Set configuration");
        wifi.set_configuration(&wifi_configuration(config)?)?;

        Ok(Self {
            wifi,
            mode: WIFI_MODE,
        })
    }
}

fn wifi_configuration(config: &MonitorConfig) -> anyhow::Result<Configuration> {
    let ssid = config
        .ssid
        .as_str()
        .try_into()
        .map_err(|_| anyhow!("SSID too long"))?;
    let password = config
        .passphrase
        .as_str()
        .try_into()
        .map_err(|_| anyhow!("Passphrase too long"))?;

    Ok(match WIFI_MODE {
        WifiMode::AccessPoint => Configuration::AccessPoint(AccessPointConfiguration {
            ssid,
            password,
            ssid_hidden: false,
            auth_method: AuthMethod::WPA2Personal,
            max_connections: AP_MAX_CONNECTIONS,
            channel: AP_CHANNEL,
            ..Default::default()
        }),
        WifiMode::Station => Configuration::Client(ClientConfiguration {
            ssid,
            bssid: None,
            auth_method: if config.passphrase.is_empty() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            password,
            channel: None,
            ..Default::default()
        }),
    })
}

impl<'a> NetworkLayer for EspWifiNetwork<'a> {
    fn start(&mut self) -> anyhow::Result<Ipv4Addr> {
        match self.mode {
            WifiMode::AccessPoint => {
                let _ = self.wifi.stop();

                self.wifi.start()?;
                info!("WiFi started");

                self.wifi.wait_netif_up()?;
                info!("Access point listening");

                Ok(self.wifi.wifi().ap_netif().get_ip_info()?.ip)
            }
            WifiMode::Station => {
                let _ = self.wifi.disconnect();

                if !self.wifi.is_started()? {
                    self.wifi.start()?;
                    info!("WiFi started");
                }

                self.wifi.connect()?;
                info!("WiFi connected");

                self.wifi.wait_netif_up()?;
                info!("WiFi netif up");

                Ok(self.wifi.wifi().sta_netif().get_ip_info()?.ip)
            }
        }
    }
}
