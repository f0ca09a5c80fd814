use esp_idf_svc::hal::{
    adc::{
        attenuation,
        oneshot::{config::AdcChannelConfig, AdcChannelDriver, AdcDriver},
        ADC1,
    },
    gpio::{ADCPin, Gpio2, Gpio3, Gpio4},
    peripheral::Peripheral,
};
use log::warn;

use crate::{
    configuration::MonitorConfig,
    sensors::{
        moisture_sensor::MoistureSensor, raindrop_sensor::RaindropSensor, sensor::AnalogInput,
        tmp36_sensor::Tmp36Sensor, Sensors,
    },
};

// The 12-bit samples are reduced to the 10-bit scale the sensor bounds use.
const RESOLUTION_SHIFT: u16 = 2;

pub struct AdcInput<'a, P: ADCPin<Adc = ADC1>> {
    channel: AdcChannelDriver<'a, P, &'a AdcDriver<'a, ADC1>>,
}

impl<'a, P: ADCPin<Adc = ADC1>> AdcInput<'a, P> {
    pub fn new(adc: &'a AdcDriver<'a, ADC1>, pin: impl Peripheral<P = P> + 'a) -> anyhow::Result<Self> {
        Ok(Self {
            channel: AdcChannelDriver::new(
                adc,
                pin,
                &AdcChannelConfig {
                    attenuation: attenuation::DB_11,
                    ..Default::default()
                },
            )?,
        })
    }
}

impl<'a, P: ADCPin<Adc = ADC1>> AnalogInput for AdcInput<'a, P> {
    fn read_raw_value(&mut self) -> i32 {
        match self.channel.read_raw() {
            Ok(raw) => (raw >> RESOLUTION_SHIFT) as i32,
            Err(e) => {
                warn!("ADC read failed: {e}");
                0
            }
        }
    }
}

// Temperature on GPIO2, raindrop on GPIO3, soil moisture on GPIO4.
pub type BoardSensors<'a> =
    Sensors<Tmp36Sensor<AdcInput<'a, Gpio2>>, AdcInput<'a, Gpio4>, AdcInput<'a, Gpio3>>;

pub fn build_sensors<'a>(
    adc: &'a AdcDriver<'a, ADC1>,
    temperature_pin: Gpio2,
    raindrop_pin: Gpio3,
    moisture_pin: Gpio4,
    config: &MonitorConfig,
) -> anyhow::Result<BoardSensors<'a>> {
    Ok(Sensors::new(
        Tmp36Sensor::new(AdcInput::new(adc, temperature_pin)?, config.tmp36_vref),
        MoistureSensor::new(AdcInput::new(adc, moisture_pin)?, config.moisture_bounds),
        RaindropSensor::new(
            AdcInput::new(adc, raindrop_pin)?,
            config.raindrop_bounds,
            config.rain_threshold,
        ),
    )
    .with_trace(config.trace_readings))
}
