use async_trait::async_trait;
use reqwest::Client;
use tracing::{instrument, warn};

use crate::{
    config::{API_KEY_ENV, Config},
    error::Result,
    model::{Coordinates, CurrentWeather, ForecastWeather},
    units::{UnitChoice, UnitMatch},
};

use super::{WeatherProvider, fetch_json, http_client};

/// How a current-weather lookup identifies the place.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LookupKey<'a> {
    Name(&'a str),
    Coordinates(Coordinates),
    Id(u64),
}

impl LookupKey<'_> {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            LookupKey::Name(name) => vec![("q", name.to_string())],
            LookupKey::Coordinates(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
            LookupKey::Id(id) => vec![("id", id.to_string())],
        }
    }
}

/// Client for the OpenWeatherMap 2.5 REST API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    unit_match: UnitMatch,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, config: &Config) -> Result<Self> {
        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            unit_match: config.unit_match,
            http: http_client(config)?,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Only called once the unit is accepted, right before a request goes out.
    fn common_params(&self, choice: &UnitChoice, lang: &str) -> Vec<(&'static str, String)> {
        if self.api_key.is_empty() {
            warn!("{API_KEY_ENV} is not set and no api_key is configured");
        }

        vec![
            ("units", choice.unit.as_str().to_string()),
            ("lang", lang.to_string()),
            ("appid", self.api_key.clone()),
        ]
    }

    async fn fetch_current(
        &self,
        key: LookupKey<'_>,
        unit: &str,
        lang: &str,
    ) -> Result<CurrentWeather> {
        let choice = self.unit_match.resolve(unit)?;

        let mut query = key.query_pairs();
        query.extend(self.common_params(&choice, lang));

        let mut weather: CurrentWeather = fetch_json(
            &self.http,
            &self.endpoint("weather"),
            &query,
            "OpenWeather current request",
        )
        .await?;

        weather.unit = choice.label;
        Ok(weather)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_by_name(
        &self,
        location: &str,
        unit: &str,
        lang: &str,
    ) -> Result<CurrentWeather> {
        self.fetch_current(LookupKey::Name(location), unit, lang).await
    }

    #[instrument(skip(self))]
    async fn current_by_coordinates(
        &self,
        coords: Coordinates,
        unit: &str,
        lang: &str,
    ) -> Result<CurrentWeather> {
        self.fetch_current(LookupKey::Coordinates(coords), unit, lang).await
    }

    #[instrument(skip(self))]
    async fn current_by_id(&self, id: u64, unit: &str, lang: &str) -> Result<CurrentWeather> {
        self.fetch_current(LookupKey::Id(id), unit, lang).await
    }

    #[instrument(skip(self))]
    async fn forecast(
        &self,
        location: &str,
        unit: &str,
        lang: &str,
        days: u32,
    ) -> Result<ForecastWeather> {
        let choice = self.unit_match.resolve(unit)?;

        let mut query = LookupKey::Name(location).query_pairs();
        query.push(("cnt", days.to_string()));
        query.extend(self.common_params(&choice, lang));

        let mut forecast: ForecastWeather = fetch_json(
            &self.http,
            &self.endpoint("forecast"),
            &query,
            "OpenWeather forecast request",
        )
        .await?;

        forecast.fill_missing_timestamps();
        forecast.unit = choice.label;
        Ok(forecast)
    }
}
