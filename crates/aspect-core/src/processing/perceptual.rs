//! # Perceptual Fingerprint Pipeline
//!
//! Turns a decoded image into a 16-byte [`Fingerprint`]:
//!
//! 1. Downsample the RGBA pixels to an 8×8 grid of alpha-weighted luminance
//! 2. Run a 64-point cosine transform over the grid
//! 3. Keep the 4×4 lowest-frequency coefficients, offset into bytes
//!
//! ## Similarity Interpretation
//!
//! Fingerprints are compared bit by bit. The similarity is one minus the
//! fraction of the 128 bits that differ:
//!
//! - 1.0: identical fingerprints
//! - above ~0.9: usually the same picture resized or recompressed
//! - 0.0: every bit differs
//!
//! Low-frequency bands carry the coarse structure of an image and barely move
//! under noise, scaling or recompression, which is what makes near-duplicates
//! land close together.

use super::downsample::{downsample, PixelBuffer, MAX_DIMENSION};
use super::extract::extract;
use super::transform::cosine;
use super::types::Fingerprint;
use crate::config::DownsampleMode;
use crate::error::{Error, Result};
use image::DynamicImage;
use std::path::Path;

/// Calculate the fingerprint of raw RGBA pixels
pub fn fingerprint_from_buffer(buffer: &PixelBuffer<'_>, mode: DownsampleMode) -> Fingerprint {
    let grid = downsample(buffer, mode);
    let coefficients = cosine(&grid);
    extract(&coefficients)
}

/// Calculate the fingerprint of an image in memory
pub fn fingerprint_from_image(img: &DynamicImage, mode: DownsampleMode) -> Result<Fingerprint> {
    // Reject before paying for the RGBA conversion
    if img.width() > MAX_DIMENSION || img.height() > MAX_DIMENSION {
        return Err(Error::ImageTooLarge {
            width: img.width(),
            height: img.height(),
        });
    }

    let rgba = img.to_rgba8();
    let buffer = PixelBuffer::from_rgba(&rgba)?;
    Ok(fingerprint_from_buffer(&buffer, mode))
}

/// Decode an image file
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    image::open(path.as_ref()).map_err(|source| Error::ImageLoad {
        path: path.as_ref().to_path_buf(),
        source,
    })
}

/// Calculate the fingerprint of an image file
pub fn fingerprint_from_file<P: AsRef<Path>>(path: P, mode: DownsampleMode) -> Result<Fingerprint> {
    let img = load_image(&path)?;
    fingerprint_from_image(&img, mode)
}
