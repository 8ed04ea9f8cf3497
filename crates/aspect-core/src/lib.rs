//! Core functionality for perceptual image fingerprints.
//!
//! This library provides the building blocks for near-duplicate detection:
//! - Downsampling of RGBA pixels to an 8x8 luminance grid
//! - A direct 64-point cosine transform over that grid
//! - 16-byte fingerprints built from the low-frequency coefficients
//! - Hex encoding, decoding and bitwise similarity of fingerprints
//! - Batch hashing and comparison with per-item diagnostics

// -- External Dependencies --
use log::info;

// -- Standard Library --
use std::path::Path;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use batch::{CompareOutcome, CompareReport, ComputeOutcome, ComputeReport};
pub use config::*;
pub use error::{Error, Result};
pub use processing::{Fingerprint, PixelBuffer};

// -- Public Modules --
pub mod batch;
pub mod config;
pub mod logging;
pub mod processing;

/// Main entry point for hashing and comparing images
pub struct Aspect {
    config: Config,
}

impl Aspect {
    /// Create a new Aspect with the provided configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        processing::TransformTable::init();
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fingerprint every image, continuing past failures
    pub fn compute(&self, paths: &[impl AsRef<Path> + Sync]) -> Result<ComputeReport> {
        info!("Computing fingerprints for {} images", paths.len());
        batch::compute_fingerprints(paths, &self.config)
    }

    /// Fingerprint a single image file
    pub fn fingerprint(&self, path: impl AsRef<Path>) -> Result<Fingerprint> {
        processing::fingerprint_from_file(path, self.config.downsample_mode)
    }

    /// Score candidates against a reference fingerprint
    pub fn compare(&self, reference: &str, candidates: &[impl AsRef<str>]) -> Result<CompareReport> {
        info!("Comparing {} fingerprints against {}", candidates.len(), reference);
        batch::compare_fingerprints(reference, candidates)
    }

    /// Whether two fingerprints clear the configured similarity threshold
    pub fn is_duplicate(&self, a: &Fingerprint, b: &Fingerprint) -> bool {
        a.is_similar(b, self.config.similarity_threshold)
    }
}
