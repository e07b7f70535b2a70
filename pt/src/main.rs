use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use prompttemplate::cli::{Cli, Command};
use prompttemplate::{MissingArgumentPolicy, PromptArguments, PromptSource};

fn setup_logging() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("pt starting");

    match cli.command {
        Command::Render { file, args, strict } => {
            let source = PromptSource::load(&file).context(format!("Failed to load {}", file.display()))?;
            let args: PromptArguments = args.into_iter().collect();
            let policy = if strict {
                MissingArgumentPolicy::Error
            } else {
                MissingArgumentPolicy::Keep
            };
            let rendered = source
                .render_with(&args, policy)
                .context(format!("Failed to render {}", file.display()))?;
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
        Command::Vars { file } => {
            let source = PromptSource::load(&file).context(format!("Failed to load {}", file.display()))?;
            let vars = source.variables();
            if vars.is_empty() {
                println!("{}", "No variables".dimmed());
            } else {
                for var in vars {
                    println!("{}", var.cyan());
                }
            }
        }
    }

    Ok(())
}
