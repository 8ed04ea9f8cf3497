use crate::config::Config;
use crate::error::{Error, Result};
use log::{debug, error, LevelFilter};
use std::path::Path;

// For file-based logging with rotation
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "ASPECT_LOG";

/// Initialize logging for the application.
///
/// Diagnostics go to stderr so stdout stays clean for hash output. When
/// `log_dir` is configured the records go to a rotating file instead.
pub fn init_logger(config: &Config) -> Result<()> {
    let level: LevelFilter = config.log_level.into();

    match &config.log_dir {
        Some(dir) => init_file_logger(dir, level),
        None => env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .parse_env(LOG_ENV)
            .try_init()
            .map_err(|e| Error::Logging(e.to_string())),
    }
}

fn init_file_logger(log_dir: &Path, level: LevelFilter) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let log_file_path = log_dir.join("aspect.log");
    let archived_logs_pattern = format!("{}/aspect.{{}}.log", log_dir.display());

    // Rotate at 10MB, keep 5 archived log files
    let file_trigger = SizeTrigger::new(10 * 1024 * 1024);
    let file_roller = FixedWindowRoller::builder()
        .build(&archived_logs_pattern, 5)
        .map_err(|e| Error::Logging(format!("Failed to create log roller: {}", e)))?;
    let compound_policy = CompoundPolicy::new(Box::new(file_trigger), Box::new(file_roller));

    let rolling_file = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] [{M}:{L}] - {m}{n}",
        )))
        .build(&log_file_path, Box::new(compound_policy))
        .map_err(|e| Error::Logging(format!("Failed to create log appender: {}", e)))?;

    let config = log4rs::config::Config::builder()
        .appender(Appender::builder().build("file", Box::new(rolling_file)))
        .build(Root::builder().appender("file").build(level))
        .map_err(|e| Error::Logging(format!("Failed to build log config: {}", e)))?;

    log4rs::init_config(config)
        .map_err(|e| Error::Logging(format!("Failed to initialize log4rs: {}", e)))?;

    if let Some(filter) = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
    {
        log::set_max_level(filter);
    }

    debug!("Logging to file: {}", log_file_path.display());
    Ok(())
}

/// Log an image that could not be turned into a fingerprint
pub fn log_load_error(path: &Path, error: &dyn std::error::Error) {
    error!(
        "Hash computation failed - Path: {}, Error: {}",
        path.display(),
        error
    );
}

/// Log fingerprint text that could not be decoded
pub fn log_hash_format_error(hash: &str, error: &dyn std::error::Error) {
    error!("Hash decoding failed - Hash: '{}', Error: {}", hash, error);
}
