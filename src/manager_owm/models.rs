use std::fmt;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{serde_as, TimestampSeconds};

#[derive(Deserialize)]
pub struct Main {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Deserialize, Default)]
pub struct Rain {
    #[serde(rename = "3h", default)]
    pub three_hours: f64,
}

#[serde_as]
#[derive(Deserialize)]
pub struct ForecastEntry {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub dt: DateTime<Utc>,
    pub main: Main,
    pub wind: Wind,
    #[serde(default)]
    pub rain: Option<Rain>,
}

impl ForecastEntry {
    /// Accumulated precipitation over the three hours of this entry, zero when not reported
    ///
    pub fn precipitation(&self) -> f64 {
        self.rain.as_ref().map_or(0.0, |r| r.three_hours)
    }
}

#[derive(Deserialize)]
pub struct FullForecast {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

/// Where to get a forecast for
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Location::City(name) => write!(f, "{}", name),
            Location::Coordinates { lat, lon } => write!(f, "{:0.4}, {:0.4}", lat, lon),
        }
    }
}
