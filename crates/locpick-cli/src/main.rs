mod host;

use anyhow::Context;
use clap::{Parser, Subcommand};
use locpick_core::{AppConfig, Coordinate, Environment, LocationForm, LocationType};
use locpick_google::GoogleMapsClient;
use locpick_selector::{place_label, LocationSelector, SelectorConfig};
use tracing_subscriber::EnvFilter;

use crate::host::ConsoleHost;

#[derive(Debug, Parser)]
#[command(name = "locpick")]
#[command(about = "Pick and label marketplace locations from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List autocomplete suggestions for a search text
    Search { text: String },
    /// Print the place label for a coordinate
    Reverse {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Search, pick a suggestion and print the resulting form
    Pick {
        text: String,
        /// Zero-based suggestion index to select
        #[arg(long, default_value_t = 0)]
        index: usize,
        #[arg(long, default_value = "point")]
        location_type: LocationType,
        /// Coverage radius in km (radius and district only)
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Use the current device location and print the resulting form
    Locate {
        #[arg(long, default_value = "point")]
        location_type: LocationType,
        #[arg(long)]
        radius: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = locpick_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(colored_logs(&config.env))
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let client = build_client(&config)?;

    match cli.command {
        Commands::Search { text } => search(&client, &config, &text).await,
        Commands::Reverse {
            latitude,
            longitude,
        } => reverse(&client, Coordinate::new(latitude, longitude)).await,
        Commands::Pick {
            text,
            index,
            location_type,
            radius,
        } => pick(client, &config, &text, index, location_type, radius).await,
        Commands::Locate {
            location_type,
            radius,
        } => locate(client, &config, location_type, radius).await,
    }
}

/// Only development runs get ANSI-colored log lines.
fn colored_logs(env: &Environment) -> bool {
    matches!(env, Environment::Development)
}

fn build_client(config: &AppConfig) -> anyhow::Result<GoogleMapsClient> {
    let api_key = config
        .google_maps_api_key
        .as_deref()
        .context("LOCPICK_GOOGLE_MAPS_API_KEY must be set")?;
    Ok(GoogleMapsClient::new(api_key, config.request_timeout_secs)?)
}

async fn search(client: &GoogleMapsClient, config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let suggestions = client.autocomplete_places(text, &config.country).await?;
    if suggestions.is_empty() {
        println!("no suggestions for '{text}'");
    }
    for (i, s) in suggestions.iter().enumerate() {
        println!("{i:>2}  {}  ({})  [{}]", s.primary_text, s.secondary_text, s.place_id);
    }
    Ok(())
}

async fn reverse(client: &GoogleMapsClient, at: Coordinate) -> anyhow::Result<()> {
    anyhow::ensure!(at.is_valid(), "coordinate {at} is out of range");
    let result = client.reverse_geocode_latlng(at).await?;
    println!("{}", place_label(&result));
    println!("{}", result.formatted_address);
    Ok(())
}

fn mount(
    client: GoogleMapsClient,
    config: &AppConfig,
    location_type: LocationType,
    radius: Option<f64>,
) -> LocationSelector<GoogleMapsClient, ConsoleHost> {
    let form = LocationForm {
        location_type,
        ..LocationForm::default()
    };
    let mut selector = LocationSelector::new(
        client,
        ConsoleHost::new(form.clone()),
        &form,
        SelectorConfig::from_app_config(config),
    );
    if let Some(km) = radius {
        let applied = selector.set_radius(km);
        if !location_type.uses_radius() {
            tracing::warn!(km, "--radius ignored for point locations");
        } else if (applied - km).abs() > f64::EPSILON {
            tracing::info!(requested = km, applied, "radius adjusted to slider bounds");
        }
    }
    selector
}

async fn pick(
    client: GoogleMapsClient,
    config: &AppConfig,
    text: &str,
    index: usize,
    location_type: LocationType,
    radius: Option<f64>,
) -> anyhow::Result<()> {
    let mut selector = mount(client, config, location_type, radius);

    selector.search(text).await;
    let available = selector.suggestions().len();
    anyhow::ensure!(available > 0, "no places match '{text}'");
    anyhow::ensure!(
        index < available,
        "index {index} out of range, only {available} suggestions"
    );

    selector.select_suggestion(index).await;
    anyhow::ensure!(
        selector.selected().is_some(),
        "could not resolve the selected place"
    );
    print_form(&selector.into_host().form)
}

async fn locate(
    client: GoogleMapsClient,
    config: &AppConfig,
    location_type: LocationType,
    radius: Option<f64>,
) -> anyhow::Result<()> {
    let mut selector = mount(client, config, location_type, radius);
    selector.use_current_location().await;

    let host = selector.into_host();
    if let Some(notice) = host.notices.first() {
        anyhow::bail!("{}", notice.message);
    }
    print_form(&host.form)
}

fn print_form(form: &LocationForm) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(form)?);
    Ok(())
}
