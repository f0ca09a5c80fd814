pub trait AnalogInput {
    fn read_raw_value(&mut self) -> i32;
}

impl<F: FnMut() -> i32> AnalogInput for F {
    fn read_raw_value(&mut self) -> i32 {
        self()
    }
}

pub trait TemperatureSensor {
    fn get_temp_c(&mut self) -> f32;

    fn get_temp_f(&mut self) -> f32 {
        celsius_to_fahrenheit(self.get_temp_c())
    }
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}
