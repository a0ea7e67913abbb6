use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Result of an ip-api.com lookup for the caller's address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationInfo {
    pub status: String,
    pub country: String,
    pub country_code: String,
    pub region: String,
    pub region_name: String,
    pub city: String,
    pub zip: String,
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    pub isp: String,
    pub org: String,
    #[serde(rename = "as")]
    pub as_number: String,
    pub message: Option<String>,
    pub query: String,
}

impl LocationInfo {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates { lat: self.lat, lon: self.lon }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One entry of the provider's `weather` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainBlock {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: f64,
    pub deg: f64,
}

/// Body of `GET /weather`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeather {
    pub id: i64,
    pub name: String,
    pub coord: Coordinates,
    pub dt: i64,
    pub weather: Vec<Condition>,
    pub main: MainBlock,
    pub wind: Wind,
    /// Not sent by the provider; set from the requested unit.
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub coord: Coordinates,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastEntry {
    pub dt: i64,
    pub dt_txt: String,
    pub weather: Vec<Condition>,
    pub main: MainBlock,
}

/// Body of `GET /forecast`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastWeather {
    pub city: City,
    pub cnt: u32,
    pub list: Vec<ForecastEntry>,
    pub unit: String,
}

impl ForecastWeather {
    /// Fill `dt_txt` from `dt` for entries the provider sent without one.
    pub(crate) fn fill_missing_timestamps(&mut self) {
        for entry in self.list.iter_mut().filter(|e| e.dt_txt.is_empty() && e.dt != 0) {
            if let Some(ts) = DateTime::from_timestamp(entry.dt, 0) {
                entry.dt_txt = ts.format("%Y-%m-%d %H:%M:%S").to_string();
            }
        }
    }
}
