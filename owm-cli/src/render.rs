//! Text reports rendered with Tera from the decoded provider records.

use owm_core::{CurrentWeather, ForecastWeather};
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

const CURRENT: &str = "weather/current.txt";
const FORECAST: &str = "weather/forecast.txt";

mod embedded {
    pub const CURRENT_WEATHER: &str = r"Current weather for {{ name }}:
    Conditions: {% for w in weather %} {{ w.description }} {% endfor %}
    Now:         {{ main.temp }} {{ unit }}
    High:        {{ main.temp_max }} {{ unit }}
    Low:         {{ main.temp_min }} {{ unit }}
";

    pub const FORECAST_WEATHER: &str = r"Weather Forecast for {{ city.name }}:
{% for entry in list %}Date & Time: {{ entry.dt_txt }}
Conditions:  {% for w in entry.weather %}{{ w.main }} {{ w.description }}{% endfor %}
Temp:        {{ entry.main.temp }}
High:        {{ entry.main.temp_max }}
Low:         {{ entry.main.temp_min }}

{% endfor %}
";
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template compilation failed")]
    Compile(#[source] tera::Error),

    #[error("rendering {template} failed")]
    Render {
        template: &'static str,
        #[source]
        source: tera::Error,
    },
}

pub struct Renderer {
    tera: Tera,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            (CURRENT, embedded::CURRENT_WEATHER),
            (FORECAST, embedded::FORECAST_WEATHER),
        ])
        .map_err(RenderError::Compile)?;

        Ok(Self { tera })
    }

    pub fn current(&self, weather: &CurrentWeather) -> Result<String, RenderError> {
        self.render(CURRENT, weather)
    }

    pub fn forecast(&self, forecast: &ForecastWeather) -> Result<String, RenderError> {
        self.render(FORECAST, forecast)
    }

    fn render<T: Serialize>(&self, template: &'static str, data: &T) -> Result<String, RenderError> {
        let ctx = Context::from_serialize(data)
            .map_err(|source| RenderError::Render { template, source })?;

        self.tera.render(template, &ctx).map_err(|source| RenderError::Render { template, source })
    }
}
