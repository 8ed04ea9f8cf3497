/// Synthetic test images and controlled variants of them
///
#[allow(dead_code)]
pub mod test_images {
    use image::{Rgba, RgbaImage};
    use std::path::{Path, PathBuf};

    /// Red ramps left to right, green ramps top to bottom
    pub fn ramp(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([
                (x * 255 / (width - 1)) as u8,
                (y * 255 / (height - 1)) as u8,
                128,
                255,
            ])
        })
    }

    /// Two-by-two checkerboard of light and dark quadrants
    pub fn quadrants(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (2 * x / width + 2 * y / height) % 2 == 0 {
                Rgba([230, 230, 230, 255])
            } else {
                Rgba([20, 20, 20, 255])
            }
        })
    }

    /// Solid color image
    pub fn solid(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(pixel))
    }

    /// Add deterministic per-pixel noise in `-amplitude..=amplitude`
    pub fn with_noise(img: &RgbaImage, amplitude: i32) -> RgbaImage {
        let width = img.width() as u64;
        RgbaImage::from_fn(img.width(), img.height(), |x, y| {
            let seed = (y as u64 * width + x as u64 + 1)
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let delta = ((seed >> 33) % (2 * amplitude as u64 + 1)) as i32 - amplitude;

            let px = img.get_pixel(x, y);
            let shift = |c: u8| (c as i32 + delta).clamp(0, 255) as u8;
            Rgba([shift(px[0]), shift(px[1]), shift(px[2]), px[3]])
        })
    }

    /// Save an image under `dir`, format chosen from the file extension
    pub fn save(dir: &Path, name: &str, img: &RgbaImage) -> PathBuf {
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }
}
