mod config;
mod error;
mod logging;
mod share;
mod sources;
mod units;
mod weather;

use clap::{Args, Parser, Subcommand};
use config::Config;
use error::{AppError, WeatherError};
use share::SHARE_EXTRA_KEY;
use sources::{BroadcastSource, SourceManager};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use units::UnitSettings;
use weather::WeatherClient;

const CACHE_DURATION: Duration = Duration::from_secs(300);

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\n\nSupported weather providers:\n",
    "- Open-Meteo.com (default, worldwide)\n",
    "- Ilmateenistus (Estonian Environment Agency, Estonia only)\n"
);

#[derive(Parser)]
#[command(version, long_version = LONG_VERSION, about = "Fetch, normalize and share weather data", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase log verbosity (-v debug, -vv trace)")]
    verbose: u8,

    #[arg(long, value_name = "FILE", global = true, help = "Use this config file instead of the default location")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh every configured location and print the weather share payload
    Export(ExportArgs),

    /// List weather providers, broadcast targets and their preferences
    Sources,

    /// Print the path of the default config file
    ConfigPath,
}

#[derive(Args)]
struct ExportArgs {
    #[arg(short, long, value_name = "FILE", help = "Write the payload to FILE instead of stdout")]
    output: Option<PathBuf>,

    #[arg(long, default_value = "breezydatashare", help = "Broadcast target to export for")]
    target: String,

    #[arg(long, help = "Pretty-print the JSON payload")]
    pretty: bool,

    #[arg(long, conflicts_with = "metric", help = "Use imperial units (°F, mi, mph, inHg)")]
    imperial: bool,

    #[arg(long, conflicts_with = "imperial", help = "Use metric units (°C, km, km/h, hPa)")]
    metric: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("\n{}\n", e.user_friendly_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    match cli.command {
        Command::ConfigPath => {
            println!("{}", config_path.display());
            Ok(())
        }
        Command::Sources => {
            let config = load_config(cli.config.as_deref())?;
            print_sources(&SourceManager::new(&config));
            Ok(())
        }
        Command::Export(args) => {
            let mut config = load_config(cli.config.as_deref())?;

            // CLI Overrides
            if args.imperial {
                config.units = UnitSettings::imperial();
            }
            if args.metric {
                config.units = UnitSettings::metric();
            }

            export(&config, &config_path, &args).await
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config, AppError> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

async fn export(config: &Config, config_path: &std::path::Path, args: &ExportArgs) -> Result<(), AppError> {
    let locations = config.locations()?;
    if locations.is_empty() {
        return Err(AppError::NoLocations(config_path.to_path_buf()));
    }

    let sources = Arc::new(SourceManager::new(config));
    let target = sources.broadcast_source(&args.target)?;
    let client = WeatherClient::new(Arc::clone(&sources), CACHE_DURATION);

    let locations = client.refresh_all(locations).await;
    let payload = share_payload(target.as_ref(), &locations)?;

    let payload = if args.pretty {
        let value: serde_json::Value =
            serde_json::from_str(&payload).map_err(WeatherError::from)?;
        serde_json::to_string_pretty(&value).map_err(WeatherError::from)?
    } else {
        payload
    };

    tracing::info!(
        action = target.intent_action(),
        broadcast = target.name(),
        "broadcasting weather"
    );

    match &args.output {
        Some(path) => std::fs::write(path, payload).map_err(|source| AppError::Write {
            path: path.clone(),
            source,
        })?,
        None => println!("{}", payload),
    }

    Ok(())
}

/// The JSON document a broadcast target attaches under [`SHARE_EXTRA_KEY`].
fn share_payload(
    target: &dyn BroadcastSource,
    locations: &[weather::Location],
) -> Result<String, WeatherError> {
    let mut extras = target.extras(locations)?;
    extras.remove(SHARE_EXTRA_KEY).ok_or_else(|| {
        WeatherError::Configuration(format!(
            "Broadcast target '{}' does not produce a {} payload",
            target.id(),
            SHARE_EXTRA_KEY
        ))
    })
}

fn print_sources(sources: &SourceManager) {
    println!("Weather providers:");
    for provider in sources.weather_providers() {
        println!("  {:<16} {}", provider.id(), provider.name());
    }

    println!("\nBroadcast targets:");
    for target in sources.broadcast_sources() {
        println!("  {:<16} {} ({})", target.id(), target.name(), target.intent_action());
    }

    for source in sources.configurable_sources() {
        println!("\n[sources.{}]  # {}", source.id, source.name);
        for preference in &source.preferences {
            println!(
                "  {} = \"{}\"  # {}",
                preference.key(),
                preference.effective_value().unwrap_or_default(),
                preference.title()
            );
        }
    }
}
