//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Unit validation for the OpenWeatherMap `units` parameter
//! - An async client for current weather and the 5-day forecast
//! - IP-based geolocation through ip-api.com
//! - Configuration & API-key handling
//!
//! It is used by `owm-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod units;

pub use config::Config;
pub use error::WeatherError;
pub use geolocation::{Geolocator, IpApiGeolocator};
pub use model::{
    City, Condition, Coordinates, CurrentWeather, ForecastEntry, ForecastWeather, LocationInfo,
    MainBlock,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherClient};
pub use units::{Unit, UnitChoice, UnitMatch};
