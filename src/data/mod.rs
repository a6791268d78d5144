//! Payload model for the Weather Underground API
//!
//! The raw response is kept as a `serde_json::Value` so it can be cached and
//! re-read verbatim. Rendering code pulls typed views out of individual
//! subtrees on demand; a subtree that is missing or malformed surfaces as a
//! `FormatError` at the rendering call that touches it, leaving the other
//! views usable.

pub mod provider;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised when the payload lacks data a rendering call needs
#[derive(Debug, Error)]
pub enum FormatError {
    /// A whole subtree the renderer needs is absent
    #[error("payload missing expected section: {0}")]
    MissingSection(String),

    /// The subtree exists but does not have the expected shape
    #[error("payload section {path} is malformed: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A fetched (or cached) weather payload
#[derive(Debug, Clone)]
pub struct Payload {
    root: Value,
}

impl Payload {
    /// Wraps a raw JSON document
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Returns the raw document
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Deserializes the subtree at a JSON pointer into a typed view
    pub fn section<T: DeserializeOwned>(&self, pointer: &str) -> Result<T, FormatError> {
        let node = self
            .root
            .pointer(pointer)
            .ok_or_else(|| FormatError::MissingSection(pointer.to_string()))?;
        serde_json::from_value(node.clone()).map_err(|source| FormatError::Malformed {
            path: pointer.to_string(),
            source,
        })
    }

    /// Current observation block
    pub fn current(&self) -> Result<CurrentObservation, FormatError> {
        self.section("/current_observation")
    }

    /// Ten-day simple forecast
    pub fn daily(&self) -> Result<Vec<SimpleForecastDay>, FormatError> {
        self.section("/forecast/simpleforecast/forecastday")
    }

    /// Day/night textual forecast
    pub fn textual(&self) -> Result<Vec<TxtForecastDay>, FormatError> {
        self.section("/forecast/txt_forecast/forecastday")
    }

    /// Hourly forecast
    pub fn hourly(&self) -> Result<Vec<HourlyForecast>, FormatError> {
        self.section("/hourly_forecast")
    }

    /// Active alerts; an absent `alerts` key reads as no alerts
    pub fn alerts(&self) -> Result<Vec<Alert>, FormatError> {
        if self.root.get("alerts").is_none() {
            return Ok(Vec::new());
        }
        self.section("/alerts")
    }

    /// Whether the payload carries at least one active alert
    pub fn has_alerts(&self) -> bool {
        self.root
            .get("alerts")
            .and_then(Value::as_array)
            .is_some_and(|alerts| !alerts.is_empty())
    }
}

/// Lenient numeric deserialization
///
/// Weather Underground serializes several numeric fields as JSON strings
/// (`"feelslike_c": "23.8"`) and occasionally as null; accept all three.
pub(crate) mod lenient {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    struct F64Visitor;

    impl<'de> Visitor<'de> for F64Visitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number, a numeric string, or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("not a numeric string: {v:?}")))
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }
    }

    pub fn f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(F64Visitor)
    }
}

/// Current conditions as reported by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentObservation {
    pub icon: String,
    pub icon_url: String,
    pub local_time_rfc822: String,
    pub local_tz_offset: String,
    #[serde(deserialize_with = "lenient::f64")]
    pub temp_c: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub feelslike_c: f64,
    pub weather: String,
    pub wind_dir: String,
    #[serde(deserialize_with = "lenient::f64")]
    pub wind_kph: f64,
    pub pressure_mb: String,
    pub pressure_trend: String,
    pub forecast_url: String,
}

/// Calendar fields of a simple-forecast day
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDate {
    pub weekday_short: String,
}

/// High/low temperature bound; the provider sends these as strings
#[derive(Debug, Clone, Deserialize)]
pub struct TempBound {
    pub celsius: String,
}

/// Snowfall depth in centimeters
#[derive(Debug, Clone, Deserialize)]
pub struct SnowDepth {
    #[serde(deserialize_with = "lenient::f64")]
    pub cm: f64,
}

/// Liquid precipitation in millimeters
#[derive(Debug, Clone, Deserialize)]
pub struct Rainfall {
    #[serde(deserialize_with = "lenient::f64")]
    pub mm: f64,
}

/// Daily wind figures
#[derive(Debug, Clone, Deserialize)]
pub struct DailyWind {
    pub dir: String,
    #[serde(deserialize_with = "lenient::f64")]
    pub kph: f64,
}

/// One day of the simple forecast
#[derive(Debug, Clone, Deserialize)]
pub struct SimpleForecastDay {
    pub date: ForecastDate,
    pub icon: String,
    pub icon_url: String,
    pub conditions: String,
    pub high: TempBound,
    pub low: TempBound,
    pub pop: u32,
    pub snow_allday: SnowDepth,
    pub qpf_allday: Rainfall,
    pub avewind: DailyWind,
    pub maxwind: DailyWind,
}

/// One entry of the day/night textual forecast
#[derive(Debug, Clone, Deserialize)]
pub struct TxtForecastDay {
    pub icon: String,
    pub icon_url: String,
    pub title: String,
    pub fcttext_metric: String,
}

/// Forecast clock time of an hourly entry
#[derive(Debug, Clone, Deserialize)]
pub struct FctTime {
    pub hour: String,
}

/// A metric measurement; hourly values arrive as strings
#[derive(Debug, Clone, Deserialize)]
pub struct Measure {
    pub metric: String,
}

impl Measure {
    /// Numeric value of the measurement, zero when unparsable
    pub fn as_f64(&self) -> f64 {
        self.metric.trim().parse().unwrap_or(0.0)
    }
}

/// Wind direction of an hourly entry
#[derive(Debug, Clone, Deserialize)]
pub struct WindDir {
    pub dir: String,
}

/// One hour of the hourly forecast
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyForecast {
    #[serde(rename = "FCTTIME")]
    pub fcttime: FctTime,
    pub icon: String,
    pub icon_url: String,
    pub fctcode: String,
    pub condition: String,
    pub temp: Measure,
    pub feelslike: Measure,
    pub pop: String,
    pub sky: String,
    pub snow: Measure,
    pub qpf: Measure,
    pub wdir: WindDir,
    pub wspd: Measure,
    pub mslp: Measure,
}

/// An active weather alert
#[derive(Debug, Clone, Deserialize)]
pub struct Alert {
    pub description: String,
    pub expires: String,
    pub message: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Canned payloads shared by the data, render and summary tests

    use super::Payload;
    use serde_json::{json, Value};

    /// A hourly entry with the given clock hour and metric temperature
    pub fn hour(clock: u32, temp: &str, pop: &str, fctcode: &str) -> Value {
        json!({
            "FCTTIME": {"hour": clock.to_string()},
            "icon": "partlycloudy",
            "icon_url": "http://icons.wxug.com/i/c/k/partlycloudy.gif",
            "fctcode": fctcode,
            "condition": "Partly Cloudy",
            "temp": {"english": "72", "metric": temp},
            "feelslike": {"english": "72", "metric": temp},
            "pop": pop,
            "sky": "40",
            "snow": {"english": "0.0", "metric": "0.0"},
            "qpf": {"english": "0.0", "metric": "0.0"},
            "wdir": {"degrees": "270", "dir": "W"},
            "wspd": {"english": "8", "metric": "13"},
            "mslp": {"english": "30.1", "metric": "1019"}
        })
    }

    /// A simple-forecast day with the given weekday and high/low
    pub fn day(weekday: &str, high: &str, low: &str) -> Value {
        json!({
            "date": {"weekday_short": weekday},
            "icon": "clear",
            "icon_url": "http://icons.wxug.com/i/c/k/clear.gif",
            "conditions": "Clear",
            "high": {"fahrenheit": "75", "celsius": high},
            "low": {"fahrenheit": "55", "celsius": low},
            "pop": 10,
            "snow_allday": {"in": 0.0, "cm": 0.0},
            "qpf_allday": {"in": 0.1, "mm": 2.5},
            "avewind": {"mph": 6, "kph": 10, "dir": "SW", "degrees": 225},
            "maxwind": {"mph": 12, "kph": 19, "dir": "SW", "degrees": 225}
        })
    }

    /// A complete payload: current conditions, three days, six hours,
    /// two textual entries, no alerts
    pub fn sample() -> Payload {
        let hours: Vec<Value> = (0u32..6)
            .map(|i| hour(14 + i, &format!("{}", 22 - i), "20", "2"))
            .collect();
        Payload::new(json!({
            "current_observation": {
                "icon": "partlycloudy",
                "icon_url": "http://icons.wxug.com/i/c/k/partlycloudy.gif",
                "local_time_rfc822": "Mon, 15 Jul 2024 14:05:00 -0700",
                "local_tz_offset": "-0700",
                "temp_c": 22.5,
                "feelslike_c": "23.8",
                "weather": "Partly Cloudy",
                "wind_dir": "West",
                "wind_kph": 12.5,
                "pressure_mb": "1018",
                "pressure_trend": "+",
                "forecast_url": "http://www.wunderground.com/US/MA/Boston.html"
            },
            "forecast": {
                "simpleforecast": {
                    "forecastday": [
                        day("Mon", "24", "14"),
                        day("Tue", "23", "13"),
                        day("Wed", "21", "12")
                    ]
                },
                "txt_forecast": {
                    "forecastday": [
                        {
                            "icon": "partlycloudy",
                            "icon_url": "http://icons.wxug.com/i/c/k/partlycloudy.gif",
                            "title": "Monday",
                            "fcttext_metric": "Partly cloudy. High of 24C."
                        },
                        {
                            "icon": "nt_clear",
                            "icon_url": "http://icons.wxug.com/i/c/k/nt_clear.gif",
                            "title": "Monday Night",
                            "fcttext_metric": "Clear. Low of 14C."
                        }
                    ]
                }
            },
            "hourly_forecast": hours
        }))
    }

    /// Like `sample()` but with one active alert
    pub fn sample_with_alert() -> Payload {
        let mut root = sample().as_value().clone();
        root["alerts"] = json!([{
            "description": "High Wind Warning",
            "expires": "Mon, 15 Jul 2024 20:00:00 -0700",
            "message": "Gusts to 90 km/h expected.\n\nSecure loose objects."
        }]);
        Payload::new(root)
    }
}
