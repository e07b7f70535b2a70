//! Console output and input
//!
//! Everything the user sees goes through here: the menu, sample banners,
//! prompt/reply echoes, and outcome reports. Diagnostics go to the log file.

use std::io::{self, BufRead, IsTerminal, Write};

use colored::*;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::runner::SampleOutcome;
use crate::samples::Sample;

/// Print the numbered sample menu
pub fn print_menu(samples: &[Box<dyn Sample>]) {
    println!("{}", "Chat Gallery".bold());
    println!();
    for (i, sample) in samples.iter().enumerate() {
        println!("  {:>2}. {:<18} {}", i + 1, sample.name().cyan(), sample.description());
    }
    println!();
}

/// Read one selection line from stdin
///
/// Uses line editing when stdin is a terminal and a plain line read otherwise.
/// End of input yields an empty string.
pub fn read_selection() -> Result<String> {
    let prompt = format!("Select a sample (1-{}): ", crate::runner::SampleId::MAX);

    if !io::stdin().is_terminal() {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        return Ok(line.trim().to_string());
    }

    let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
    match rl.readline(&prompt) {
        Ok(line) => Ok(line.trim().to_string()),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!();
            Ok(String::new())
        }
        Err(e) => Err(eyre::eyre!("Failed to read selection: {}", e)),
    }
}

/// Block until a key is pressed; returns at once when stdin is not a terminal
pub fn wait_for_keypress() -> Result<()> {
    if !io::stdin().is_terminal() {
        debug!("wait_for_keypress: stdin is not a terminal, skipping");
        return Ok(());
    }

    println!();
    print!("{}", "Press any key to exit...".dimmed());
    io::stdout().flush()?;

    terminal::enable_raw_mode()?;
    let result = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
            Ok(_) => continue,
            Err(e) => break Err(e),
        };
    };
    terminal::disable_raw_mode()?;
    println!();
    Ok(result?)
}

pub fn banner(number: u8, sample: &dyn Sample) {
    println!();
    println!("{} {}", format!("[{}]", number).bold(), sample.name().cyan().bold());
    println!("{}", sample.description().dimmed());
    println!();
}

/// Section heading inside a sample
pub fn section(title: &str) {
    println!("{}", format!("== {} ==", title).bold());
}

pub fn user(text: &str) {
    println!("{} {}", "User:".green().bold(), text);
}

pub fn assistant(text: &str) {
    println!("{} {}", "Assistant:".blue().bold(), text);
    println!();
}

pub fn tool(name: &str, detail: &str) {
    println!("  {} {} {}", "→".yellow(), name.yellow(), detail.dimmed());
}

pub fn note(text: &str) {
    println!("{}", text.dimmed());
}

pub fn warning(text: &str) {
    println!("{} {}", "!".yellow().bold(), text.yellow());
}

pub fn error(text: &str) {
    eprintln!("{} {}", "✗".red(), text.red());
}

/// Report how a sample run ended
pub fn outcome(outcome: &SampleOutcome) {
    match outcome {
        SampleOutcome::Completed => println!("{} Sample completed", "✓".green()),
        SampleOutcome::ConfigurationError(msg) => error(&format!("Configuration error: {}", msg)),
        SampleOutcome::Failed(msg) => error(&format!("Sample failed: {}", msg)),
    }
}
