//! Packing of the low-frequency coefficient block into a fingerprint.

use super::downsample::GRID_SIDE;
use super::transform::CoefficientGrid;
use super::types::{Fingerprint, FINGERPRINT_LEN};

/// Side length of the low-frequency block kept in the fingerprint
pub const BLOCK_SIDE: usize = 4;

/// Offset that maps a coefficient in [-64, 64] onto a byte in [0, 128]
const COEFFICIENT_OFFSET: i32 = 64;

/// Keep the 4x4 lowest-frequency coefficients as offset bytes.
///
/// Coefficient `i + j*8` becomes byte `i + j*4`, truncated toward zero.
pub fn extract(coefficients: &CoefficientGrid) -> Fingerprint {
    let bound = COEFFICIENT_OFFSET as f64;
    let mut bytes = [0u8; FINGERPRINT_LEN];

    for j in 0..BLOCK_SIDE {
        for i in 0..BLOCK_SIDE {
            let coef = coefficients[i + j * GRID_SIDE].clamp(-bound, bound);
            bytes[i + j * BLOCK_SIDE] = (coef.trunc() as i32 + COEFFICIENT_OFFSET) as u8;
        }
    }

    Fingerprint::from_valid_bytes(bytes)
}
