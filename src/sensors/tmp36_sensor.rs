use super::sensor::{AnalogInput, TemperatureSensor};

const ADC_STEPS: f32 = 1024.0;

// TMP36 output at 0 °C.
const OFFSET_VOLT: f32 = 0.5;
const VOLT_PER_DEGREE: f32 = 0.01;

pub struct Tmp36Sensor<A: AnalogInput> {
    input: A,
    vref: f32,
}

impl<A: AnalogInput> Tmp36Sensor<A> {
    pub fn new(input: A, vref: f32) -> Self {
        Self { input, vref }
    }

    pub fn read_voltage(&mut self) -> f32 {
        self.input.read_raw_value() as f32 * self.vref / ADC_STEPS
    }
}

pub fn voltage_to_celsius(voltage: f32) -> f32 {
    (voltage - OFFSET_VOLT) / VOLT_PER_DEGREE
}

impl<A: AnalogInput> TemperatureSensor for Tmp36Sensor<A> {
    fn get_temp_c(&mut self) -> f32 {
        voltage_to_celsius(self.read_voltage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage_to_celsius() {
        assert!((voltage_to_celsius(0.5) - 0.0).abs() < 1e-4);
        assert!((voltage_to_celsius(0.75) - 25.0).abs() < 1e-4);
        assert!((voltage_to_celsius(0.4) + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_reading_to_temperature() {
        // 256 / 1024 * 3.0 V = 0.75 V
        let mut sensor = Tmp36Sensor::new(|| 256, 3.0);

        assert!((sensor.read_voltage() - 0.75).abs() < 1e-4);
        assert!((sensor.get_temp_c() - 25.0).abs() < 1e-3);
        assert!((sensor.get_temp_f() - 77.0).abs() < 1e-3);
    }
}
