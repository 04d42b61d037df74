//! VNL Dataset Builder
//!
//! Reads Volleyball Nations League scoreboard screenshots (seven per team,
//! fourteen per match) with Tesseract and writes one labeled row of team
//! statistic differences per match to a CSV file, for training a win/loss
//! predictor.

mod config;
mod dataset;
mod error;
mod ocr;
mod paths;
mod stats;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use config::DatasetConfig;
use ocr::TesseractRecognizer;

/// When set, log lines go to the log file only.
static QUIET: AtomicBool = AtomicBool::new(false);

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    if !QUIET.load(Ordering::Relaxed) {
        eprint!("{}", line);
    }
    let log_path = paths::get_logs_dir().join("vnl_dataset.log");
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
        let _ = file.write_all(line.as_bytes());
    }
}

#[derive(Parser)]
#[command(name = "vnl-dataset")]
#[command(about = "Parse VNL screenshots into a labeled CSV dataset", long_about = None)]
struct Cli {
    /// Path to the CSV file to create
    output: PathBuf,

    /// Match specifications of the form '/dir/to/match:label'
    #[arg(required = true)]
    matches: Vec<String>,

    /// Config file path (default: config.json next to the executable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tesseract executable to use
    #[arg(long)]
    tesseract: Option<PathBuf>,

    /// Tesseract language code
    #[arg(long)]
    lang: Option<String>,

    /// Only log to the log file
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        log(&format!("[PANIC]{} {}", location, msg));
    }));

    let cli = Cli::parse();
    QUIET.store(cli.quiet, Ordering::Relaxed);

    if let Err(e) = paths::ensure_directories() {
        eprintln!("Warning: could not create logs directory: {}", e);
    }

    run(&cli).inspect_err(|e| log(&format!("Error: {:#}", e)))
}

fn run(cli: &Cli) -> Result<()> {
    let mut config =
        DatasetConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = &cli.tesseract {
        config.ocr.tesseract_path = Some(path.clone());
    }
    if let Some(lang) = &cli.lang {
        config.ocr.language = lang.clone();
    }
    config.validate().context("Invalid configuration")?;

    let recognizer =
        TesseractRecognizer::from_config(&config.ocr).context("Failed to set up Tesseract")?;

    log(&format!(
        "Building dataset from {} matches into {}",
        cli.matches.len(),
        cli.output.display()
    ));

    let dataset = dataset::build_dataset(&recognizer, &config, &cli.matches, &cli.output)
        .with_context(|| format!("Failed to build dataset {}", cli.output.display()))?;

    log(&format!(
        "Done: {} rows written to {}",
        dataset.len(),
        cli.output.display()
    ));
    Ok(())
}
