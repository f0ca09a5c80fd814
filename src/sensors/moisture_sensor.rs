use crate::scaler::Bounds;

use super::sensor::AnalogInput;

pub const WET_MOISTURE: i32 = 200;
pub const DRY_MOISTURE: i32 = 500;

pub const DEFAULT_BOUNDS: Bounds = Bounds::new_const(WET_MOISTURE, DRY_MOISTURE);

/// Scaled from WET (1 %) to DRY (100 %): a higher level means a drier soil.
pub struct MoistureSensor<A: AnalogInput> {
    input: A,
    bounds: Bounds,
}

impl<A: AnalogInput> MoistureSensor<A> {
    pub fn new(input: A, bounds: Bounds) -> Self {
        Self { input, bounds }
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
}
