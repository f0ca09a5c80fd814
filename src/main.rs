#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("This firmware only runs on an ESP-IDF target")
}

#[cfg(target_os = "espidf")]
mod firmware {
    use esp_idf_svc::hal::{adc::oneshot::AdcDriver, delay::FreeRtos, peripherals::Peripherals};
    use log::{info, warn};

    use garden_weather_node::{
        board,
        configuration::{nvs_configuration::NvsConfiguration, MonitorConfig, WIFI_MODE},
        network,
        request_handler::{LogNotifier, RequestHandler},
        server::{Server, TcpClientListener},
        wifi_helper::EspWifiNetwork,
    };

    pub fn run() -> anyhow::Result<()> {
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();

        let peripherals = Peripherals::take()?;

        let config = match NvsConfiguration::new() {
            Ok(nvs) => nvs.apply(MonitorConfig::default()),
            Err(e) => {
                warn!("No stored configuration ({e}), using defaults");
                MonitorConfig::default()
            }
        };
        config.validate()?;

        info!("Starting WiFi ({:?}) on SSID: {}", WIFI_MODE, config.ssid);
        let mut wifi = EspWifiNetwork::new(peripherals.modem, &config)?;
        let ip = network::bring_up(&mut wifi, &config.retry, |delay| {
            FreeRtos::delay_ms(delay.as_millis() as u32)
        })?;

        let adc = AdcDriver::new(peripherals.adc1)?;
        let sensors = board::build_sensors(
            &adc,
            peripherals.pins.gpio2,
            peripherals.pins.gpio3,
            peripherals.pins.gpio4,
            &config,
        )?;

        let listener = TcpClientListener::bind(("0.0.0.0", config.http_port), config.read_timeout)?;
        info!("Serving readings on http://{ip}:{}/", config.http_port);

        let mut server = Server::new(listener, sensors, RequestHandler::new(LogNotifier), &config);
        server.run()?;

        Ok(())
    }
}
