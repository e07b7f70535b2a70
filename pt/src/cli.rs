//! CLI argument parsing for pt

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pt")]
#[command(author, version, about = "Render prompt templates and YAML prompt documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a template (.txt etc.) or prompt document (.yaml/.yml)
    Render {
        /// Template or prompt document path
        #[arg(required = true)]
        file: PathBuf,

        /// Argument binding, repeatable (name=value)
        #[arg(short = 'a', long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,

        /// Fail on placeholders without a bound argument
        #[arg(short, long)]
        strict: bool,
    },

    /// List the variables a prompt expects
    Vars {
        /// Template or prompt document path
        #[arg(required = true)]
        file: PathBuf,
    },
}

/// Parse a `name=value` binding; the value may itself contain `=`
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid binding '{}': expected name=value", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid binding '{}': empty name", s));
    }
    Ok((name.to_string(), value.to_string()))
}
