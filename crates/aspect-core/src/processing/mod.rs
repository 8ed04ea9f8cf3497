// Pipeline stages
pub mod downsample;
pub mod extract;
pub mod table;
pub mod transform;

pub mod perceptual;
pub mod types;

// Expose the pipeline entry points
pub use downsample::{downsample, PixelBuffer, SampleGrid, MAX_DIMENSION};
pub use perceptual::{
    fingerprint_from_buffer, fingerprint_from_file, fingerprint_from_image, load_image,
};
pub use table::TransformTable;
pub use transform::{cosine, fourier, CoefficientGrid};
pub use types::Fingerprint;
