use std::fs;

use chatgallery::cli::{Cli, get_log_path};
use chatgallery::config::Config;
use chatgallery::llm::create_client;
use chatgallery::runner::{self, SampleId};
use chatgallery::{console, samples};
use clap::Parser;
use eyre::{Context, Result};
use tracing::{info, warn};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        None => tracing::Level::INFO,
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Loaded once; the log level is needed before the error can be reported
    let loaded = Config::load(cli.config.as_ref());
    let config_log_level = loaded.as_ref().ok().and_then(|c| c.log_level.clone());
    if let Err(e) = setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let mut config = loaded.context("Failed to load configuration")?;
    match &config.source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }
    if let Some(dir) = cli.resources {
        config.resources.dir = dir;
    }
    info!(resources = %config.resources.dir.display(), "Configuration loaded");

    let catalog = samples::catalog();
    if cli.list {
        console::print_menu(&catalog);
        return Ok(());
    }

    let selection = match cli.sample {
        Some(sample) => sample,
        None => {
            console::print_menu(&catalog);
            console::read_selection()?
        }
    };

    let id = match SampleId::parse(&selection) {
        Ok(id) => id,
        Err(e) => {
            warn!(%selection, "Invalid selection");
            console::error(&e.to_string());
            return Ok(());
        }
    };

    let outcome = runner::run_sample(&config, id, create_client).await;
    console::outcome(&outcome);

    if !cli.no_wait {
        if let Err(e) = console::wait_for_keypress() {
            warn!(error = %e, "Keypress wait failed");
        }
    }

    info!(?outcome, "Exiting");
    Ok(())
}
