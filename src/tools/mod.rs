use image::{ImageOutputFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::error::Result;
use crate::models::RenderedQrImage;
use crate::utils::binarization::dark_mask;

/// Load any `image`-supported file as RGBA.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Read a file into memory (logo or font bytes).
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    Ok(fs::read(path).map_err(image::ImageError::IoError)?)
}

/// Serialise a rendered image as a 32-bit RGBA PNG.
pub fn encode_png(image: &RenderedQrImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image.pixels.write_to(&mut out, ImageOutputFormat::Png)?;
    Ok(out.into_inner())
}

/// Write a rendered image to `path` as PNG regardless of the extension.
pub fn save_png<P: AsRef<Path>>(image: &RenderedQrImage, path: P) -> Result<()> {
    let bytes = encode_png(image)?;
    fs::write(path, bytes).map_err(image::ImageError::IoError)?;
    Ok(())
}

/// Summary statistics for the dark/light split of an image.
#[derive(Debug, Clone, Copy)]
pub struct DarkStats {
    /// Count of dark pixels.
    pub dark_pixels: usize,
    /// Total pixels in the image.
    pub total_pixels: usize,
    /// Ratio of dark pixels to total pixels.
    pub dark_ratio: f64,
}

/// Compute dark pixel stats using the configured luma threshold.
pub fn dark_stats(image: &RgbaImage) -> DarkStats {
    let dark = dark_mask(image).count_ones();
    let total = image.width() as usize * image.height() as usize;
    let ratio = if total == 0 {
        0.0
    } else {
        dark as f64 / total as f64
    };
    DarkStats {
        dark_pixels: dark,
        total_pixels: total,
        dark_ratio: ratio,
    }
}
