// Dual Calendar
// Main entry point

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use serde_json::json;

use dual_calendar::models::mark::MarkCounts;
use dual_calendar::models::settings::Settings;
use dual_calendar::server::{self, AppState};
use dual_calendar::services::codec::MarkCodec;
use dual_calendar::services::settings::SettingsService;
use dual_calendar::services::split::SplitBoundaryDeriver;
use dual_calendar::services::url_state::UrlStateStore;

/// Gregorian/Hebrew dual calendar with shareable day markings
#[derive(Parser)]
#[command(name = "dual-calendar", version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the calendar page and its API
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,

        /// Directory with index.html and assets (overrides config file)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Decode a calendar URL query and print its state as JSON
    Inspect {
        /// Query string, e.g. "startDate=2025-01-01&endDate=2025-01-31&marks=0120"
        query: String,
    },
    /// Write a settings file with the current values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let service = SettingsService::locate(cli.config.as_deref())?;
    let settings = service.load()?;
    init_logging(&settings);

    match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => serve_command(settings, host, port, static_dir).await,
        Commands::Inspect { query } => inspect_command(&settings, &query),
        Commands::Init { force } => init_command(&service, &settings, force),
    }
}

/// `RUST_LOG` takes precedence over the configured level
fn init_logging(settings: &Settings) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();
}

async fn serve_command(
    mut settings: Settings,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(host) = host {
        settings.host = host;
    }
    if let Some(port) = port {
        settings.port = port;
    }
    if let Some(dir) = static_dir {
        settings.static_dir = dir.to_string_lossy().into_owned();
    }
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;

    log::info!("Starting Dual Calendar server");
    server::serve(AppState::from_settings(settings)?).await
}

fn inspect_command(settings: &Settings, query: &str) -> Result<()> {
    let state = UrlStateStore::read_within(query, settings.max_range_days)?.ok_or_else(|| {
        anyhow!(
            "Query has no startDate/endDate; today's month ({}) would be shown unmarked",
            Local::now().format("%B %Y")
        )
    })?;

    let boundaries = SplitBoundaryDeriver::compute(&state.marks, state.split_enabled);
    let output = json!({
        "startDate": state.range.start(),
        "endDate": state.range.end(),
        "days": state.range.day_count(),
        "marks": state.marks,
        "encoded": MarkCodec::encode(&state.marks),
        "split": state.split_enabled,
        "counts": MarkCounts::tally(&state.marks),
        "splitPositions": SplitBoundaryDeriver::positions(&boundaries),
        "canonicalQuery": UrlStateStore::write(&state),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_command(service: &SettingsService, settings: &Settings, force: bool) -> Result<()> {
    if service.init(settings, force)? {
        println!("Wrote settings to {}", service.path().display());
    } else {
        println!(
            "Settings file {} already exists (use --force to overwrite)",
            service.path().display()
        );
    }
    Ok(())
}
