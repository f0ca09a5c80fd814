use crate::error::MonitorError;

pub const MIN_PERCENTAGE: i32 = 1;
pub const MAX_PERCENTAGE: i32 = 100;

/// Not clamped: a value outside the bounds gives a percentage outside [1, 100].
pub fn to_percentage<T: Copy + Into<f64>>(
    value: T,
    lower_bound: T,
    upper_bound: T,
) -> Result<i32, MonitorError> {
    let (lower, upper) = (lower_bound.into(), upper_bound.into());

    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(MonitorError::InvalidBounds { lower, upper });
    }

    Ok(scale(value.into(), lower, upper))
}

pub fn checked_to_percentage<T: Copy + Into<f64>>(
    value: T,
    lower_bound: T,
    upper_bound: T,
) -> Result<i32, MonitorError> {
    let percentage = to_percentage(value, lower_bound, upper_bound)?;
    let (value, lower, upper) = (value.into(), lower_bound.into(), upper_bound.into());

    if !(lower..=upper).contains(&value) {
        return Err(MonitorError::SensorOutOfRange {
            value,
            lower,
            upper,
        });
    }

    Ok(percentage)
}

fn scale(value: f64, lower: f64, upper: f64) -> i32 {
    let span = (MAX_PERCENTAGE - MIN_PERCENTAGE) as f64;
    ((value - lower) / (upper - lower) * span + MIN_PERCENTAGE as f64) as i32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    lower: i32,
    upper: i32,
}

impl Bounds {
    pub fn new(lower: i32, upper: i32) -> Result<Self, MonitorError> {
        if lower >= upper {
            return Err(MonitorError::InvalidBounds {
                lower: lower as f64,
                upper: upper as f64,
            });
        }

        Ok(Self { lower, upper })
    }

    pub(crate) const fn new_const(lower: i32, upper: i32) -> Self {
        assert!(lower < upper);
        Self { lower, upper }
    }

    pub fn lower(&self) -> i32 {
        self.lower
    }

    pub fn upper(&self) -> i32 {
        self.upper
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    pub fn to_percentage(&self, value: i32) -> i32 {
        scale(value as f64, self.lower as f64, self.upper as f64)
    }
}
