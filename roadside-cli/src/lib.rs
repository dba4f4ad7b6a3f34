//! Command-line trip planner over the Roadside engine.
//!
//! Resolves two place names, fetches driving routes with alternatives, and
//! reports the points of interest inside the active route's corridor as a
//! JSON document on stdout or at `--output`.
#![forbid(unsafe_code)]

mod error;
mod report;

pub use error::CliError;
pub use report::{PlaceReport, PlanReport, PoiReport, RouteReport};

use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;

use roadside_core::{PoiCategory, SelectionConfig};
use roadside_data::{
    FallbackGeocoder, NominatimGeocoder, NominatimGeocoderConfig, OsrmRouter, OsrmRouterConfig,
    OverpassClient, OverpassClientConfig, PhotonGeocoder, PhotonGeocoderConfig, TripPlanner,
};

/// Plan a road trip and list points of interest along the way.
#[derive(Debug, Parser)]
#[command(
    name = "roadside",
    about = "Plan a driving route and find points of interest along it",
    version
)]
pub struct Cli {
    /// Origin place name.
    #[arg(long, value_name = "place")]
    pub from: String,
    /// Destination place name.
    #[arg(long, value_name = "place")]
    pub to: String,
    /// How many alternative routes to request on top of the fastest.
    #[arg(long, default_value_t = 2, value_name = "n")]
    pub alternatives: u32,
    /// Corridor half-width around the active route, in metres.
    #[arg(long, default_value_t = 200.0, value_name = "meters")]
    pub buffer_meters: f64,
    /// Maximum POIs reported per category.
    #[arg(long, default_value_t = 3, value_name = "n")]
    pub per_category_cap: usize,
    /// Restrict the search to these categories; defaults to all of them.
    #[arg(long = "category", value_name = "name")]
    pub categories: Vec<PoiCategory>,
    /// Override the geocoding service base URL.
    #[arg(long, value_name = "url")]
    pub nominatim_url: Option<String>,
    /// Override the fallback geocoding service base URL.
    #[arg(long, value_name = "url")]
    pub photon_url: Option<String>,
    /// Override the routing service base URL.
    #[arg(long, value_name = "url")]
    pub osrm_url: Option<String>,
    /// Override the POI service endpoint, disabling mirror rotation.
    #[arg(long, value_name = "url")]
    pub overpass_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 25, value_name = "secs")]
    pub timeout_secs: u64,
    /// Write the JSON report here instead of stdout.
    #[arg(long, value_name = "path")]
    pub output: Option<Utf8PathBuf>,
}

/// Execute a planning run described by `cli`.
///
/// # Errors
/// Returns [`CliError`] when a provider cannot be constructed, when both
/// place names are empty, or when the report cannot be serialised or
/// written.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let timeout = Duration::from_secs(cli.timeout_secs);
    let planner = build_planner(cli, timeout)?;

    let plan = planner.plan(&cli.from, &cli.to)?;
    info!(
        "planned {} -> {}: {} route(s), degraded(route={}, pois={})",
        cli.from,
        cli.to,
        plan.routes.candidates().len(),
        plan.route_degraded,
        plan.pois_degraded
    );

    let report = PlanReport::from(&plan);
    let json = serde_json::to_string_pretty(&report).map_err(CliError::SerializeReport)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, json).map_err(|source| CliError::WriteReport {
                path: path.clone(),
                source,
            })?;
            info!("wrote plan report to {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}

type HttpPlanner =
    TripPlanner<NominatimGeocoder, PhotonGeocoder, OsrmRouter, OverpassClient>;

fn build_planner(cli: &Cli, timeout: Duration) -> Result<HttpPlanner, CliError> {
    let nominatim_config = match &cli.nominatim_url {
        Some(url) => NominatimGeocoderConfig::new(url.clone()),
        None => NominatimGeocoderConfig::default(),
    }
    .with_timeout(timeout);
    let primary =
        NominatimGeocoder::with_config(nominatim_config).map_err(|source| CliError::BuildProvider {
            service: "geocoding",
            source,
        })?;

    let photon_config = match &cli.photon_url {
        Some(url) => PhotonGeocoderConfig::new(url.clone()),
        None => PhotonGeocoderConfig::default(),
    }
    .with_timeout(timeout);
    let secondary =
        PhotonGeocoder::with_config(photon_config).map_err(|source| CliError::BuildProvider {
            service: "fallback geocoding",
            source,
        })?;

    let osrm_config = match &cli.osrm_url {
        Some(url) => OsrmRouterConfig::new(url.clone()),
        None => OsrmRouterConfig::default(),
    }
    .with_timeout(timeout);
    let router = OsrmRouter::with_config(osrm_config).map_err(|source| CliError::BuildProvider {
        service: "routing",
        source,
    })?;

    let overpass_config = match &cli.overpass_url {
        Some(url) => OverpassClientConfig::new(url.clone()),
        None => OverpassClientConfig::default(),
    }
    .with_timeout(timeout);
    let poi_source =
        OverpassClient::with_config(overpass_config).map_err(|source| CliError::BuildProvider {
            service: "poi",
            source,
        })?;

    let selection = SelectionConfig::default()
        .with_buffer_meters(cli.buffer_meters)
        .with_per_category_cap(cli.per_category_cap);
    let mut planner = TripPlanner::new(FallbackGeocoder::new(primary, secondary), router, poi_source)
        .with_selection(selection)
        .with_max_alternatives(cli.alternatives);
    if !cli.categories.is_empty() {
        planner = planner.with_categories(cli.categories.clone());
    }
    Ok(planner)
}
