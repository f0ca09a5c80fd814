use serde::{Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    #[serde(serialize_with = "serialize_two_decimals")]
    pub temperature_c: f32,
    #[serde(serialize_with = "serialize_two_decimals")]
    pub temperature_f: f32,
    pub moisture: i32,
    pub raindrop: i32,
}

impl SensorSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub fn round_two_decimals(value: f32) -> f64 {
    (value as f64 * 100.0).round() / 100.0
}

fn serialize_two_decimals<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_two_decimals(*value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_layout() {
        let snapshot = SensorSnapshot {
            temperature_c: 23.456,
            temperature_f: 74.21,
            moisture: 42,
            raindrop: 7,
        };

        assert_eq!(
            snapshot.to_json().unwrap(),
            r#"{"temperatureC":23.46,"temperatureF":74.21,"moisture":42,"raindrop":7}"#
        );
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let snapshot = SensorSnapshot {
            temperature_c: -50.0,
            temperature_f: -58.0,
            moisture: -32,
            raindrop: 110,
        };

        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(value["moisture"], -32);
        assert_eq!(value["raindrop"], 110);
        assert_eq!(value["temperatureC"], -50.0);
    }

    #[test]
    fn test_failed_temperature_is_null() {
        let snapshot = SensorSnapshot {
            temperature_c: f32::NAN,
            temperature_f: f32::NAN,
            moisture: 1,
            raindrop: 1,
        };

        assert_eq!(
            snapshot.to_json().unwrap(),
            r#"{"temperatureC":null,"temperatureF":null,"moisture":1,"raindrop":1}"#
        );
    }
}
