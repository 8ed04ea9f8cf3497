use anyhow::Context;
use aspect_core::logging::init_logger;
use aspect_core::{Aspect, Config, DownsampleMode, LogLevel};
use clap::{ArgAction, Parser, Subcommand};
use log::info;
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "aspect")]
#[command(about = "Compare images using perceptual hash")]
#[command(version)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fingerprint of each image
    Compute {
        /// Images to fingerprint
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// How pixels are accumulated into the sample grid (blend or mean)
        #[arg(long)]
        mode: Option<DownsampleMode>,

        /// Number of worker threads (0 = one per CPU)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Show a progress bar on stderr
        #[arg(long)]
        progress: bool,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Print the similarity of each hash to a reference hash
    Compare {
        /// Reference fingerprint
        hash: String,

        /// Fingerprints to score against the reference
        #[arg(required = true)]
        hashes: Vec<String>,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "aspect.json")]
        path: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>, verbose: u8) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // Set log level based on verbosity
    config.log_level = match verbose {
        0 => config.log_level,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };

    Ok(config)
}

fn exit_status(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref(), cli.verbose)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Compute {
            images,
            mode,
            threads,
            progress,
            json,
        } => {
            // Override config with command line arguments
            if let Some(mode) = mode {
                config.downsample_mode = mode;
            }
            if let Some(threads) = threads {
                config.threads = threads;
            }
            config.show_progress |= progress;

            init_logger(&config)?;
            let aspect = Aspect::new(config)?;
            let report = aspect.compute(&images)?;

            for outcome in report.outcomes() {
                match (&outcome.result, json) {
                    (Ok(fp), false) => writeln!(out, "{}  {}", fp, outcome.path.display())?,
                    (Ok(fp), true) => writeln!(
                        out,
                        "{}",
                        json!({ "path": outcome.path, "hash": fp })
                    )?,
                    (Err(e), true) => writeln!(
                        out,
                        "{}",
                        json!({ "path": outcome.path, "error": e.to_string() })
                    )?,
                    // Already reported through the logger
                    (Err(_), false) => {}
                }
            }

            info!(
                "{} hashed, {} failed",
                report.succeeded(),
                report.failed()
            );
            Ok(exit_status(report.is_success()))
        }

        Commands::Compare { hash, hashes, json } => {
            init_logger(&config)?;
            let aspect = Aspect::new(config)?;
            let report = aspect
                .compare(&hash, &hashes)
                .context("Reference hash is not usable")?;

            for outcome in report.outcomes() {
                match (&outcome.result, json) {
                    (Ok(score), false) => writeln!(out, "{:.6}  {}", score, outcome.candidate)?,
                    (Ok(score), true) => writeln!(
                        out,
                        "{}",
                        json!({ "hash": outcome.candidate, "similarity": score })
                    )?,
                    (Err(e), true) => writeln!(
                        out,
                        "{}",
                        json!({ "hash": outcome.candidate, "error": e.to_string() })
                    )?,
                    (Err(_), false) => {}
                }
            }

            Ok(exit_status(report.is_success()))
        }

        Commands::GenerateConfig { path } => {
            Config::default().save_to_file(&path)?;
            writeln!(out, "Configuration file generated at: {}", path.display())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
