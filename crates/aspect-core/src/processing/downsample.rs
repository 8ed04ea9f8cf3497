//! Reduction of an RGBA pixel buffer to an 8x8 grid of luminance samples.

use crate::config::DownsampleMode;
use crate::error::{Error, Result};
use image::RgbaImage;

/// Largest width or height accepted for hashing
pub const MAX_DIMENSION: u32 = 65535;

/// Side length of the sample grid
pub const GRID_SIDE: usize = 8;

/// Number of cells in the sample grid
pub const GRID_LEN: usize = GRID_SIDE * GRID_SIDE;

/// Starting value of every grid cell
const CELL_SEED: f64 = 0.5;

const CHANNELS: usize = 4;

/// 8x8 luminance samples, row-major with the row as the vertical bucket
pub type SampleGrid = [f64; GRID_LEN];

/// Read-only view over interleaved RGBA8 pixel data
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    /// Wrap raw RGBA bytes, checking the dimensions against the data
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Error::ImageTooLarge { width, height });
        }
        if width == 0 || height == 0 {
            return Err(Error::InvalidBuffer(format!(
                "image has no pixels ({}x{})",
                width, height
            )));
        }

        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::InvalidBuffer(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Borrow the pixels of a decoded RGBA image
    pub fn from_rgba(img: &'a RgbaImage) -> Result<Self> {
        Self::new(img.width(), img.height(), img.as_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn rows(&self) -> impl Iterator<Item = &'a [u8]> {
        self.data.chunks_exact(self.width as usize * CHANNELS)
    }
}

/// Alpha-weighted luminance of one RGBA pixel, in [0, 1]
#[inline]
fn luminance(px: &[u8]) -> f64 {
    let lum = (0.30 * (px[0] as f64 / 255.0))
        + (0.59 * (px[1] as f64 / 255.0))
        + (0.11 * (px[2] as f64 / 255.0));
    lum * (px[3] as f64 / 255.0)
}

/// Grid bucket of a source coordinate.
///
/// `span` is the extent divided by 7, so the last coordinate rounds to at most 7.
#[inline]
fn bucket(index: usize, span: f64) -> usize {
    ((index as f64 / span).round_ties_even() as usize).min(GRID_SIDE - 1)
}

/// Reduce a pixel buffer to an 8x8 sample grid
pub fn downsample(buffer: &PixelBuffer<'_>, mode: DownsampleMode) -> SampleGrid {
    let row_span = buffer.height as f64 / (GRID_SIDE - 1) as f64;
    let col_span = buffer.width as f64 / (GRID_SIDE - 1) as f64;

    let col_buckets: Vec<usize> = (0..buffer.width as usize)
        .map(|j| bucket(j, col_span))
        .collect();

    match mode {
        DownsampleMode::Blend => {
            let mut grid = [CELL_SEED; GRID_LEN];
            for (i, row) in buffer.rows().enumerate() {
                let base = bucket(i, row_span) * GRID_SIDE;
                for (px, &sj) in row.chunks_exact(CHANNELS).zip(&col_buckets) {
                    let cell = &mut grid[base + sj];
                    *cell = (*cell + luminance(px)) / 2.0;
                }
            }
            grid
        }
        DownsampleMode::Mean => {
            let mut sums = [0.0f64; GRID_LEN];
            let mut counts = [0u64; GRID_LEN];
            for (i, row) in buffer.rows().enumerate() {
                let base = bucket(i, row_span) * GRID_SIDE;
                for (px, &sj) in row.chunks_exact(CHANNELS).zip(&col_buckets) {
                    sums[base + sj] += luminance(px);
                    counts[base + sj] += 1;
                }
            }

            let mut grid = [CELL_SEED; GRID_LEN];
            for ((cell, sum), count) in grid.iter_mut().zip(sums).zip(counts) {
                if count > 0 {
                    *cell = sum / count as f64;
                }
            }
            grid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_rejects_oversized_dimensions() {
        let result = PixelBuffer::new(MAX_DIMENSION + 1, 1, &[]);
        assert!(matches!(
            result,
            Err(Error::ImageTooLarge {
                width: 65536,
                height: 1
            })
        ));

        let result = PixelBuffer::new(1, 70000, &[]);
        assert!(matches!(result, Err(Error::ImageTooLarge { .. })));
    }

    #[test]
    fn test_rejects_mismatched_length() {
        let data = vec![0u8; 15];
        assert!(matches!(
            PixelBuffer::new(2, 2, &data),
            Err(Error::InvalidBuffer(_))
        ));
        assert!(matches!(
            PixelBuffer::new(0, 2, &[]),
            Err(Error::InvalidBuffer(_))
        ));
    }

    #[test]
    fn test_luminance_weights() {
        assert!((luminance(&[255, 255, 255, 255]) - 1.0).abs() < EPSILON);
        assert!((luminance(&[255, 0, 0, 255]) - 0.30).abs() < EPSILON);
        assert!((luminance(&[0, 255, 0, 255]) - 0.59).abs() < EPSILON);
        assert!((luminance(&[0, 0, 255, 255]) - 0.11).abs() < EPSILON);
        assert_eq!(luminance(&[255, 255, 255, 0]), 0.0);
    }

    #[test]
    fn test_single_pixel_blends_into_first_cell() {
        let data = [255u8, 255, 255, 255];
        let buffer = PixelBuffer::new(1, 1, &data).unwrap();
        let grid = downsample(&buffer, DownsampleMode::Blend);

        assert!((grid[0] - 0.75).abs() < EPSILON);
        assert!(grid[1..].iter().all(|&c| c == CELL_SEED));
    }

    #[test]
    fn test_seven_by_seven_maps_one_to_one() {
        // With a span of exactly 1.0 every pixel owns its own cell
        let img = RgbaImage::from_fn(7, 7, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let buffer = PixelBuffer::from_rgba(&img).unwrap();
        let grid = downsample(&buffer, DownsampleMode::Blend);

        for row in 0..GRID_SIDE {
            for col in 0..GRID_SIDE {
                let cell = grid[row * GRID_SIDE + col];
                let expected = if row == 7 || col == 7 {
                    CELL_SEED
                } else if (row + col) % 2 == 0 {
                    0.75
                } else {
                    0.25
                };
                assert!((cell - expected).abs() < EPSILON, "cell ({}, {})", row, col);
            }
        }
    }

    #[test]
    fn test_blend_is_order_dependent_and_mean_is_not() {
        // 14 wide: columns 0 and 1 both land in grid column 0
        let img = RgbaImage::from_fn(14, 7, |x, _| {
            if x == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let buffer = PixelBuffer::from_rgba(&img).unwrap();

        let blend = downsample(&buffer, DownsampleMode::Blend);
        let mean = downsample(&buffer, DownsampleMode::Mean);

        assert!((blend[0] - 0.375).abs() < EPSILON);
        assert!((mean[0] - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_large_uniform_image_converges() {
        let img = RgbaImage::from_pixel(256, 256, Rgba([255, 255, 255, 255]));
        let buffer = PixelBuffer::from_rgba(&img).unwrap();

        for mode in [DownsampleMode::Blend, DownsampleMode::Mean] {
            let grid = downsample(&buffer, mode);
            assert_eq!(grid.len(), GRID_LEN);
            assert!(grid.iter().all(|&c| (c - 1.0).abs() < 1e-9), "{:?}", mode);
        }
    }

    #[test]
    fn test_transparent_pixels_darken() {
        let img = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 0]));
        let buffer = PixelBuffer::from_rgba(&img).unwrap();
        let grid = downsample(&buffer, DownsampleMode::Blend);
        assert!(grid.iter().all(|&c| c < 1e-4));
    }
}
