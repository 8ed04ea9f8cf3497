//! Precomputed roots of unity for the 64-point transform.
//!
//! Every product `n * k` with `n, k < 64` indexes into a single table of
//! 4096 entries, so the transform never calls a trigonometric function.
//! The table is built once on first access and never mutated, so any number
//! of threads may read it concurrently.

use num_complex::Complex64;
use once_cell::sync::Lazy;
use std::f64::consts::PI;

/// Number of samples the transform operates on
pub const POINTS: usize = 64;

/// Number of entries in the table (`POINTS * POINTS`)
pub const TABLE_LEN: usize = POINTS * POINTS;

static DFT_TABLE: Lazy<TransformTable> = Lazy::new(TransformTable::new);

/// Complex exponentials `e^(-2πi·m/64)` for `m` in `0..4096`
pub struct TransformTable {
    values: Box<[Complex64; TABLE_LEN]>,
}

impl TransformTable {
    fn new() -> Self {
        let step = Complex64::new(0.0, -2.0 * PI / POINTS as f64);
        let mut values = Box::new([Complex64::new(0.0, 0.0); TABLE_LEN]);
        for (m, value) in values.iter_mut().enumerate() {
            *value = (step * m as f64).exp();
        }
        Self { values }
    }

    /// Shared table, built on first use
    pub fn global() -> &'static TransformTable {
        &DFT_TABLE
    }

    /// Build the shared table now rather than inside the first transform
    pub fn init() {
        Lazy::force(&DFT_TABLE);
    }

    /// Twiddle factor for sample `n` of frequency bin `k`
    #[inline]
    pub fn twiddle(&self, n: usize, k: usize) -> Complex64 {
        self.values[n * k]
    }
}
