use crate::scaler::Bounds;

use super::sensor::AnalogInput;

pub const MIN_RAINDROP_READING: i32 = 0;
pub const MAX_RAINDROP_READING: i32 = 1024;

pub const DEFAULT_BOUNDS: Bounds = Bounds::new_const(MIN_RAINDROP_READING, MAX_RAINDROP_READING);

// Raw readings strictly above this value mean it is raining.
pub const DEFAULT_RAIN_THRESHOLD: i32 = 500;

pub fn is_raining(raw_value: i32, threshold: i32) -> bool {
    raw_value > threshold
}

pub struct RaindropSensor<A: AnalogInput> {
    input: A,
    bounds: Bounds,
    rain_threshold: i32,
}

impl<A: AnalogInput> RaindropSensor<A> {
    pub fn new(input: A, bounds: Bounds, rain_threshold: i32) -> Self {
        Self {
            input,
            bounds,
            rain_threshold,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn read_raw_value(&mut self) -> i32 {
        self.input.read_raw_value()
    }

    pub fn get_level(&mut self) -> i32 {
        let raw = self.read_raw_value();
        self.bounds.to_percentage(raw)
    }

    pub fn is_raining(&mut self) -> bool {
        is_raining(self.read_raw_value(), self.rain_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(is_raining(501, DEFAULT_RAIN_THRESHOLD));
        assert!(!is_raining(500, DEFAULT_RAIN_THRESHOLD));
        assert!(!is_raining(0, DEFAULT_RAIN_THRESHOLD));
    }

    #[test]
    fn test_sensor_levels() {
        let mut dry = RaindropSensor::new(|| 0, DEFAULT_BOUNDS, DEFAULT_RAIN_THRESHOLD);
        assert_eq!(dry.get_level(), 1);
        assert!(!dry.is_raining());

        let mut soaked = RaindropSensor::new(|| 1024, DEFAULT_BOUNDS, DEFAULT_RAIN_THRESHOLD);
        assert_eq!(soaked.get_level(), 100);
        assert!(soaked.is_raining());
    }
}
