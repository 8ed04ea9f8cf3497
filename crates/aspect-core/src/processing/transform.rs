//! Direct 64-point Fourier and cosine transforms.
//!
//! The input is always 64 samples, too small for an FFT to pay off, so the
//! transform is a plain O(n²) summation over the shared [`TransformTable`].

use super::table::{TransformTable, POINTS};
use num_complex::Complex64;

/// 64 real coefficients, read as 8 rows of 8
pub type CoefficientGrid = [f64; POINTS];

/// Discrete Fourier transform of 64 complex samples
pub fn fourier(input: &[Complex64; POINTS]) -> [Complex64; POINTS] {
    let table = TransformTable::global();
    let mut out = [Complex64::new(0.0, 0.0); POINTS];

    for (k, bin) in out.iter_mut().enumerate() {
        *bin = input
            .iter()
            .enumerate()
            .map(|(n, &sample)| sample * table.twiddle(n, k))
            .sum();
    }

    out
}

/// Cosine transform of 64 real samples.
///
/// Even samples fill the sequence from the front and odd samples fill it
/// from the back; the real part of the Fourier transform of that mirrored
/// sequence is the result. Inputs in [0, 1] give outputs in [-64, 64].
pub fn cosine(input: &[f64; POINTS]) -> CoefficientGrid {
    let mut reordered = [Complex64::new(0.0, 0.0); POINTS];
    for (i, &value) in input.iter().enumerate() {
        let j = if i % 2 == 0 { i / 2 } else { POINTS - 1 - i / 2 };
        reordered[j] = Complex64::new(value, 0.0);
    }

    let spectrum = fourier(&reordered);
    let mut out = [0.0; POINTS];
    for (coef, bin) in out.iter_mut().zip(spectrum.iter()) {
        *coef = bin.re;
    }
    out
}
