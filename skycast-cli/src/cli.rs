use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use skycast_core::{
    Config, Coordinates, LoadState, Precision, Session, SessionController, ViewMode,
    location::{self, LocationProvider},
    provider,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current conditions and 5-day forecasts")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Current,
    Forecast,
}

impl From<View> for ViewMode {
    fn from(view: View) -> Self {
        match view {
            View::Current => ViewMode::Current,
            View::Forecast => ViewMode::Forecast,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the API key and default location.
    Configure,

    /// Print the path of the configuration file.
    ConfigPath,

    /// Show weather for a location.
    Show {
        /// Location name. Defaults to the device location (if enabled) or the
        /// configured default location.
        location: Option<String>,

        /// Latitude of a coordinate query.
        #[arg(
            long,
            requires = "lon",
            conflicts_with = "location",
            allow_negative_numbers = true
        )]
        lat: Option<f64>,

        /// Longitude of a coordinate query.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Look up the device location even if disabled in the config.
        #[arg(long, conflicts_with_all = ["location", "lat"])]
        locate: bool,

        #[arg(long, value_enum, default_value_t = View::Current)]
        view: View,

        /// Read the forecast payload from a JSON file instead of the API.
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Show temperatures with two decimals.
        #[arg(long)]
        precise: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
            Command::Show {
                location,
                lat,
                lon,
                locate,
                view,
                fixture,
                precise,
            } => {
                let mut config = Config::load()?;
                if fixture.is_some() {
                    config.fixture = fixture;
                }

                let target = match (location, lat, lon) {
                    (Some(name), _, _) => Target::Search(name),
                    (None, Some(lat), Some(lon)) => {
                        Target::Coordinates(Coordinates::new(lat, lon)?)
                    }
                    _ => Target::Auto { force_locate: locate },
                };

                let precision = if precise { Precision::Hundredths } else { Precision::Tenths };
                show(&config, target, view.into(), precision).await
            }
        }
    }
}

#[derive(Debug)]
enum Target {
    Search(String),
    Coordinates(Coordinates),
    /// Device location when available, otherwise the default location.
    Auto { force_locate: bool },
}

async fn show(
    config: &Config,
    target: Target,
    view: ViewMode,
    precision: Precision,
) -> anyhow::Result<()> {
    let provider = provider::provider_from_config(config)?;
    let mut session = Session::new(&config.default_location)
        .context("Invalid default location in config")?;
    session.set_view_mode(view);

    match target {
        Target::Search(name) => {
            let controller = SessionController::new(provider, None);
            controller.search(&mut session, &name).await?;
        }
        Target::Coordinates(coords) => {
            let controller = SessionController::new(provider, None);
            session.use_coordinates(coords);
            controller.refresh(&mut session).await;
        }
        Target::Auto { force_locate } => {
            let controller = SessionController::new(provider, locator(config, force_locate));
            controller.start(&mut session).await;
        }
    }

    if let Some(note) = session.diagnostic() {
        eprintln!("note: {note}; showing {}", session.last_location());
    }

    if let (None, LoadState::Failed(reason)) = (session.displayed(), session.forecast()) {
        anyhow::bail!("Failed to load forecast for {}: {reason}", session.query());
    }

    let stdout = std::io::stdout();
    render::render(&mut stdout.lock(), &session, precision, &Local)
        .context("Failed to write output")
}

fn locator(config: &Config, force: bool) -> Option<Box<dyn LocationProvider>> {
    let mut settings = config.location.clone();
    settings.enabled |= force;
    location::provider_from_settings(&settings)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    }

    let default_location = inquire::Text::new("Default location:")
        .with_default(&config.default_location)
        .prompt()
        .context("Failed to read default location")?;
    if !default_location.trim().is_empty() {
        config.default_location = default_location.trim().to_string();
    }

    config.location.enabled = inquire::Confirm::new("Look up your location automatically?")
        .with_default(config.location.enabled)
        .prompt()
        .context("Failed to read location preference")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
