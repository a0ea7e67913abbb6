use thiserror::Error;

/// Errors surfaced by the weather client, the geolocator and unit handling.
///
/// Nothing in this crate terminates the process; the binary decides what to
/// do with each kind.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The requested unit matched none of the registered unit tokens.
    #[error("unit of measure '{0}' is not available (expected one of: c, f, k)")]
    UnsupportedUnit(String),

    /// The request could not be sent, or the body could not be read.
    ///
    /// The source carries no URL: the query string holds the API key.
    #[error("{context} could not be completed")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The remote service answered with a non-2xx status.
    #[error("{context} failed with status {status}: {body}")]
    UnexpectedStatus {
        context: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("failed to parse {context} JSON")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// ip-api.com answered with `"status": "fail"`.
    #[error("geolocation lookup failed: {0}")]
    GeolocationFailed(String),

    /// The HTTP client could not be built from the configured settings.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
