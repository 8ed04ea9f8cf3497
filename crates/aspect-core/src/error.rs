use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the aspect library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image file missing, unreadable or in an unsupported format
    #[error("'{}' couldn't be loaded: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Either image dimension exceeds the supported maximum
    #[error("image of {width}x{height} is larger than 65535x65535")]
    ImageTooLarge { width: u32, height: u32 },

    /// Pixel data inconsistent with the declared dimensions
    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),

    /// Fingerprint text that cannot be decoded
    #[error("Hash '{hash}' in wrong format: {reason}")]
    HashFormat { hash: String, reason: String },

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Logger could not be set up
    #[error("Logging setup failed: {0}")]
    Logging(String),
}
