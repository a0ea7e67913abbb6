use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    config::Config,
    error::{Result, WeatherError},
    model::{Coordinates, CurrentWeather, ForecastWeather},
};

pub mod openweather;

/// Source of current conditions and forecasts.
///
/// `unit` is the raw requested unit string; implementations validate it
/// before issuing any request.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_name(&self, location: &str, unit: &str, lang: &str)
    -> Result<CurrentWeather>;

    async fn current_by_coordinates(
        &self,
        coords: Coordinates,
        unit: &str,
        lang: &str,
    ) -> Result<CurrentWeather>;

    async fn current_by_id(&self, id: u64, unit: &str, lang: &str) -> Result<CurrentWeather>;

    async fn forecast(
        &self,
        location: &str,
        unit: &str,
        lang: &str,
        days: u32,
    ) -> Result<ForecastWeather>;
}

/// Build the shared HTTP client with the configured timeouts.
pub(crate) fn http_client(config: &Config) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.timeout())
        .build()
        .map_err(|e| WeatherError::InvalidConfig(e.to_string()))
}

/// Issue one GET, check the status, then decode the full body as JSON.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, String)],
    context: &'static str,
) -> Result<T> {
    let shown: Vec<_> = query.iter().filter(|(k, _)| *k != "appid").collect();
    debug!(url = %url, params = ?shown, "{context}");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| WeatherError::Transport { context, source: source.without_url() })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| WeatherError::Transport { context, source: source.without_url() })?;

    if !status.is_success() {
        return Err(WeatherError::UnexpectedStatus {
            context,
            status,
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body).map_err(|source| WeatherError::Decode { context, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
