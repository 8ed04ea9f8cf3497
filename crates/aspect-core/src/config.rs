use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How source pixels are accumulated into the 8x8 sample grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownsampleMode {
    /// Running blend `cell = (cell + px) / 2`, compatible with existing hashes
    #[default]
    Blend,

    /// Arithmetic mean of every pixel falling into a cell
    Mean,
}

impl std::str::FromStr for DownsampleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "blend" => Ok(Self::Blend),
            "mean" => Ok(Self::Mean),
            other => Err(Error::Configuration(format!(
                "Unknown downsample mode '{}' (expected 'blend' or 'mean')",
                other
            ))),
        }
    }
}

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Configuration for fingerprint computation and comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Accumulation strategy used by the downsampler
    pub downsample_mode: DownsampleMode,

    /// Number of threads to use for batch hashing (0 = auto)
    pub threads: usize,

    /// Whether to draw a progress bar on stderr while hashing
    pub show_progress: bool,

    /// Similarity at or above which two fingerprints count as near-duplicates (0.0-1.0)
    pub similarity_threshold: f64,

    /// Directory for rotating log files; logs go to stderr when unset
    pub log_dir: Option<PathBuf>,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            downsample_mode: DownsampleMode::Blend,
            threads: 0, // Auto
            show_progress: false,
            similarity_threshold: 0.9,
            log_dir: None,
            log_level: LogLevel::Warn,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(Error::Configuration(
                "Similarity threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }

    /// Thread count to hand to the worker pool
    pub fn effective_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }
}
