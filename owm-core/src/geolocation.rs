use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use tracing::{info, instrument};

use crate::{
    config::Config,
    error::{Result, WeatherError},
    model::LocationInfo,
    provider::{fetch_json, http_client},
};

/// Resolves the approximate location of the machine we run on.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<LocationInfo>;
}

/// Geolocation through the ip-api.com JSON endpoint (no key required).
#[derive(Debug, Clone)]
pub struct IpApiGeolocator {
    url: String,
    http: Client,
}

impl IpApiGeolocator {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self { url: config.geolocation_url.clone(), http: http_client(config)? })
    }
}

#[async_trait]
impl Geolocator for IpApiGeolocator {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn locate(&self) -> Result<LocationInfo> {
        let loc: LocationInfo = fetch_json(&self.http, &self.url, &[], "ip-api geolocation request").await?;

        if loc.status == "fail" {
            let reason = loc.message.unwrap_or_else(|| "no reason given".to_string());
            return Err(WeatherError::GeolocationFailed(reason));
        }

        info!(city = %loc.city, country = %loc.country, ip = %loc.query, "resolved location");
        Ok(loc)
    }
}
