use std::{fmt, io};

#[derive(Debug)]
pub enum MonitorError {
    InvalidBounds { lower: f64, upper: f64 },
    SensorOutOfRange { value: f64, lower: f64, upper: f64 },
    ConnectionClosedPrematurely,
    NetworkUnavailable { attempts: u32 },
    InvalidConfig(&'static str),
    Json(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::InvalidBounds { lower, upper } => {
                write!(f, "Invalid bounds: lower {lower} must be below upper {upper}")
            }
            MonitorError::SensorOutOfRange {
                value,
                lower,
                upper,
            } => write!(f, "Sensor reading {value} outside of [{lower}, {upper}]"),
            MonitorError::ConnectionClosedPrematurely => {
                write!(f, "Connection closed before the end of the request")
            }
            MonitorError::NetworkUnavailable { attempts } => {
                write!(f, "Network unavailable after {attempts} attempt(s)")
            }
            MonitorError::InvalidConfig(reason) => write!(f, "Invalid configuration: {reason}"),
            MonitorError::Json(e) => write!(f, "JSON error: {e}"),
            MonitorError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for MonitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MonitorError::Json(e) => Some(e),
            MonitorError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MonitorError {
    fn from(e: io::Error) -> Self {
        MonitorError::Io(e)
    }
}

impl From<serde_json::Error> for MonitorError {
    fn from(e: serde_json::Error) -> Self {
        MonitorError::Json(e)
    }
}
