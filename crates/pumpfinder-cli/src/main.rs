mod render;
mod session;

use std::io::Write as _;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pumpfinder_client::{
    FixedLocation, IpLocation, LocationProvider, PumpFetcher, ReqwestHttpClient,
};
use pumpfinder_core::{AppConfig, Coordinate, Variant, ViewState};
use tracing_subscriber::EnvFilter;

use crate::render::{OutputFormat, Renderer, Viewport};
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(name = "pumpfinder")]
#[command(about = "Show the bicycle pumps closest to you")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Latitude of the current position, in decimal degrees
    #[arg(long, global = true, allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude of the current position, in decimal degrees
    #[arg(long, global = true, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,

    /// Base URL of the pump service (overrides PUMPFINDER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Resolve the position via IP geolocation when no coordinate is given
    #[arg(long, global = true)]
    locate_via_ip: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Where the device position for this run comes from, in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LocationSource {
    /// `--lat/--lon`, or `PUMPFINDER_LAT/LON` when the flags are absent.
    Fixed(Coordinate),
    /// `--locate-via-ip` with no fixed coordinate.
    IpLookup,
    /// Nothing configured; the lookup fails as a denied permission.
    Unset,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the single closest pump
    Nearest,
    /// List pumps sorted by distance
    List {
        /// Number of rows to show (all when omitted)
        #[arg(long)]
        rows: Option<usize>,
        /// Number of leading rows to skip
        #[arg(long, default_value = "0")]
        offset: usize,
    },
}

impl Cli {
    /// Variant and list viewport for this run. Without a subcommand the
    /// configured variant is used and every row is shown.
    fn view(&self, config: &AppConfig) -> (Variant, Viewport) {
        match self.command {
            Some(Commands::Nearest) => (Variant::Nearest, Viewport::default()),
            Some(Commands::List { rows, offset }) => (
                Variant::List,
                Viewport {
                    offset,
                    height: rows,
                },
            ),
            None => (config.variant, Viewport::default()),
        }
    }

    fn position(&self, config: &AppConfig) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => config.location,
        }
    }

    fn location_source(&self, config: &AppConfig) -> LocationSource {
        match self.position(config) {
            Some(coord) => LocationSource::Fixed(coord),
            None if self.locate_via_ip => LocationSource::IpLookup,
            None => LocationSource::Unset,
        }
    }
}

fn build_locator(
    source: LocationSource,
    config: &AppConfig,
) -> anyhow::Result<Box<dyn LocationProvider>> {
    let locator: Box<dyn LocationProvider> = match source {
        LocationSource::Fixed(coord) => Box::new(FixedLocation::new(coord)),
        LocationSource::IpLookup => {
            let http = ReqwestHttpClient::new(config.request_timeout_secs, &config.user_agent)?;
            Box::new(IpLocation::new(http, &config.locator_url)?)
        }
        LocationSource::Unset => {
            tracing::debug!("no position source configured");
            Box::new(FixedLocation::unset())
        }
    };
    Ok(locator)
}

fn print_screen(
    renderer: &Renderer,
    state: &ViewState,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let out = renderer.render(state).format(format)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = pumpfinder_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let (variant, viewport) = cli.view(&config);
    let api_url = cli.api_url.as_deref().unwrap_or(&config.api_url);
    tracing::debug!(%variant, api_url, "starting session");

    let locator = build_locator(cli.location_source(&config), &config)?;
    let http = ReqwestHttpClient::new(config.request_timeout_secs, &config.user_agent)?;
    let fetcher = PumpFetcher::new(http, api_url)?;

    let renderer = Renderer::new(viewport);
    // Loading always goes to stderr so stdout carries only the final view.
    eprint!("{}", renderer.render(&ViewState::Loading).to_text());

    let state = Session::new(locator, fetcher, variant).run().await;
    print_screen(&renderer, &state, cli.format)?;

    Ok(match state {
        ViewState::Ready(_) => ExitCode::SUCCESS,
        ViewState::Loading | ViewState::Error(_) => ExitCode::FAILURE,
    })
}
