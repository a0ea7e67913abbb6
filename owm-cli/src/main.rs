//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing and shape-checking CLI flags
//! - Dispatching to geolocation, current weather or the forecast
//! - Rendering the human-readable report

use std::{io::Write, process::ExitCode};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use owm_core::{Config, IpApiGeolocator, OpenWeatherClient, UnitMatch};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod render;

use crate::{
    app::App,
    cli::{Cli, Request},
    render::Renderer,
};

fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(verbose)));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let request = match cli.request() {
        Ok(request) => request,
        Err(err) => {
            eprintln!("{err}\n\n{}", Cli::command().render_help());
            return ExitCode::from(1);
        }
    };

    match run(&cli, &request).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "lookup failed");
            // stderr is gone if this fails; the exit code still reports it
            let _ = report_failure(&err, &mut std::io::stderr());
            ExitCode::from(1)
        }
    }
}

/// One line: the error followed by its causes.
fn report_failure<W: Write>(err: &anyhow::Error, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "error: {err:#}")
}

async fn run(cli: &Cli, request: &Request) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.exact_units {
        config.unit_match = UnitMatch::Exact;
    }

    let client = OpenWeatherClient::new(config.resolved_api_key(), &config)
        .context("Failed to set up the OpenWeather client")?;
    let geolocator =
        IpApiGeolocator::new(&config).context("Failed to set up the geolocation client")?;
    let renderer = Renderer::new()?;

    let app = App::new(client, geolocator, renderer, config.unit_match);
    app.run(request, &mut std::io::stdout()).await?;

    Ok(())
}
