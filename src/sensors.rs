pub mod moisture_sensor;
pub mod raindrop_sensor;
pub mod sensor;
pub mod tmp36_sensor;

use log::warn;

use crate::{diagnostics::trace_value, snapshot::SensorSnapshot};

use self::{
    moisture_sensor::MoistureSensor,
    raindrop_sensor::RaindropSensor,
    sensor::{AnalogInput, TemperatureSensor},
};

pub trait SensorSource {
    fn snapshot(&mut self) -> SensorSnapshot;
    fn is_raining(&mut self) -> bool;
}

pub struct Sensors<T: TemperatureSensor, M: AnalogInput, R: AnalogInput> {
    pub temperature_sensor: T,
    pub moisture_sensor: MoistureSensor<M>,
    pub raindrop_sensor: RaindropSensor<R>,
    trace: bool,
}

impl<T: TemperatureSensor, M: AnalogInput, R: AnalogInput> Sensors<T, M, R> {
    pub fn new(
        temperature_sensor: T,
        moisture_sensor: MoistureSensor<M>,
        raindrop_sensor: RaindropSensor<R>,
    ) -> Self {
        Self {
            temperature_sensor,
            moisture_sensor,
            raindrop_sensor,
            trace: false,
        }
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

fn trace_readings(
    enabled: bool,
    raindrop_raw: i32,
    moisture_raw: i32,
    temperature_c: f32,
    temperature_f: f32,
) -> usize {
    [
        trace_value(enabled, "Raindrop raw", raindrop_raw),
        trace_value(enabled, "Moisture raw", moisture_raw),
        trace_value(enabled, "Temperature (C)", temperature_c),
        trace_value(enabled, "Temperature (F)", temperature_f),
    ]
    .into_iter()
    .filter(|traced| *traced)
    .count()
}

impl<T: TemperatureSensor, M: AnalogInput, R: AnalogInput> SensorSource for Sensors<T, M, R> {
    fn snapshot(&mut self) -> SensorSnapshot {
        let raindrop_raw = self.raindrop_sensor.read_raw_value();
        let moisture_raw = self.moisture_sensor.read_raw_value();

        let temperature_c = self.temperature_sensor.get_temp_c();
        let temperature_f = self.temperature_sensor.get_temp_f();

        trace_readings(
            self.trace,
            raindrop_raw,
            moisture_raw,
            temperature_c,
            temperature_f,
        );

        let raindrop_bounds = self.raindrop_sensor.bounds();
        if !raindrop_bounds.contains(raindrop_raw) {
            warn!(
                "Raindrop reading {raindrop_raw} outside of [{}, {}]",
                raindrop_bounds.lower(),
                raindrop_bounds.upper()
            );
        }

        let moisture_bounds = self.moisture_sensor.bounds();
        if !moisture_bounds.contains(moisture_raw) {
            warn!(
                "Moisture reading {moisture_raw} outside of [{}, {}]",
                moisture_bounds.lower(),
                moisture_bounds.upper()
            );
        }

        SensorSnapshot {
            temperature_c,
            temperature_f,
            moisture: moisture_bounds.to_percentage(moisture_raw),
            raindrop: raindrop_bounds.to_percentage(raindrop_raw),
        }
    }

    fn is_raining(&mut self) -> bool {
        self.raindrop_sensor.is_raining()
    }
}
