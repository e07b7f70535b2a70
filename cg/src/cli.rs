//! CLI definition for the gallery binary

use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// ChatGallery - chat-completion samples for the console
#[derive(Debug, Parser)]
#[command(
    name = "cg",
    about = "Run chat-completion samples against an OpenAI-compatible endpoint",
    version = env!("GIT_DESCRIBE"),
    allow_negative_numbers = true,
    after_help = after_help()
)]
pub struct Cli {
    /// Sample number (1-10); omit to pick from the menu
    #[arg(value_name = "SAMPLE")]
    pub sample: Option<String>,

    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)")]
    pub log_level: Option<String>,

    /// Directory holding sample resource files
    #[arg(long, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// List the samples and exit
    #[arg(long)]
    pub list: bool,

    /// Exit right after the sample instead of waiting for a key
    #[arg(long)]
    pub no_wait: bool,
}

/// Where the log file is written
pub fn get_log_path() -> PathBuf {
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chatgallery")
        .join("logs")
        .join("chatgallery.log");
    debug!(?path, "get_log_path: returning path");
    path
}

fn after_help() -> String {
    format!("Logs are written to: {}", get_log_path().display())
}
