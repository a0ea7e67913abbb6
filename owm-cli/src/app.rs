use owm_core::{Geolocator, UnitMatch, WeatherError, WeatherProvider};
use std::io::Write;
use thiserror::Error;
use tracing::info;

use crate::{
    cli::{Mode, Request},
    render::{RenderError, Renderer},
};

/// Location token that triggers IP geolocation.
const HERE: &str = "here";

const FORECAST_DAYS: u32 = 5;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("geolocation did not resolve a city for {0}")]
    UnresolvedLocation(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write report")]
    Io(#[from] std::io::Error),
}

/// Runs one lookup: optional geolocation, one weather call, one report.
#[derive(Debug)]
pub struct App<P, G> {
    provider: P,
    geolocator: G,
    renderer: Renderer,
    unit_match: UnitMatch,
}

impl<P: WeatherProvider, G: Geolocator> App<P, G> {
    pub fn new(provider: P, geolocator: G, renderer: Renderer, unit_match: UnitMatch) -> Self {
        Self { provider, geolocator, renderer, unit_match }
    }

    pub async fn run<W: Write>(&self, request: &Request, out: &mut W) -> Result<(), AppError> {
        // reject the unit before anything goes on the wire
        self.unit_match.resolve(&request.unit)?;

        let report = if request.location.to_lowercase() == HERE {
            let loc = self.geolocator.locate().await?;
            if loc.city.is_empty() {
                return Err(AppError::UnresolvedLocation(loc.query));
            }
            info!(city = %loc.city, "using geolocated city");

            let weather =
                self.provider.current_by_name(&loc.city, &request.unit, &request.lang).await?;
            self.renderer.current(&weather)?
        } else {
            match request.mode {
                Mode::Current => {
                    let weather = self
                        .provider
                        .current_by_name(&request.location, &request.unit, &request.lang)
                        .await?;
                    self.renderer.current(&weather)?
                }
                Mode::Forecast => {
                    let forecast = self
                        .provider
                        .forecast(&request.location, &request.unit, &request.lang, FORECAST_DAYS)
                        .await?;
                    self.renderer.forecast(&forecast)?
                }
            }
        };

        out.write_all(report.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
