use image::{Rgba, RgbaImage};

use super::grayscale::{luma, rgba_to_grayscale_parallel};
use crate::config;
use crate::models::BitMatrix;

/// Simple global threshold binarization
/// Returns a BitMatrix where true = dark
pub fn threshold_binarize(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if gray[idx] < threshold {
                binary.set(x, y, true);
            }
        }
    }

    binary
}

/// How a pixel is judged dark or light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DarkClassifier {
    /// Luma below a fixed threshold; for rasters of unknown colours
    Threshold(u8),
    /// Nearer the foreground than the background in RGB
    Palette {
        /// Foreground colour
        dark: Rgba<u8>,
        /// Background colour
        light: Rgba<u8>,
    },
}

impl DarkClassifier {
    /// Luma threshold from `QRSTYLE_DARK_THRESHOLD` (default 128)
    pub fn configured() -> Self {
        DarkClassifier::Threshold(config::dark_threshold())
    }

    /// Split between the two colours an image was drawn with
    pub fn palette(dark: Rgba<u8>, light: Rgba<u8>) -> Self {
        DarkClassifier::Palette { dark, light }
    }

    /// Whether `px` counts as dark. With identical palette colours nothing does.
    pub fn is_dark(&self, px: &Rgba<u8>) -> bool {
        match self {
            DarkClassifier::Threshold(threshold) => luma(px) < *threshold,
            DarkClassifier::Palette { dark, light } => {
                distance_sq(px, dark) < distance_sq(px, light)
            }
        }
    }

    /// Snapshot of which pixels of `image` are dark.
    ///
    /// Taken before a compositing stage paints, so the stage masks against the
    /// image as it was rather than against its own output.
    pub fn mask(&self, image: &RgbaImage) -> BitMatrix {
        let (width, height) = (image.width() as usize, image.height() as usize);
        match self {
            DarkClassifier::Threshold(threshold) => {
                let gray = rgba_to_grayscale_parallel(image.as_raw(), width, height);
                threshold_binarize(&gray, width, height, *threshold)
            }
            DarkClassifier::Palette { .. } => BitMatrix::from_fn(width, height, |x, y| {
                self.is_dark(image.get_pixel(x as u32, y as u32))
            }),
        }
    }
}

fn distance_sq(a: &Rgba<u8>, b: &Rgba<u8>) -> u32 {
    (0..3)
        .map(|i| {
            let d = a[i] as i32 - b[i] as i32;
            (d * d) as u32
        })
        .sum()
}

/// Dark mask of a raster of unknown colours, using the configured threshold
pub fn dark_mask(image: &RgbaImage) -> BitMatrix {
    DarkClassifier::configured().mask(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_threshold_binarize() {
        let gray = vec![100, 150, 200, 50]; // 2x2 image
        let binary = threshold_binarize(&gray, 2, 2, 128);

        // Pixels < 128 should be dark (true)
        assert!(binary.get(0, 0)); // 100 < 128
        assert!(!binary.get(1, 0)); // 150 >= 128
        assert!(!binary.get(0, 1)); // 200 >= 128
        assert!(binary.get(1, 1)); // 50 < 128
    }

    #[test]
    fn test_dark_mask() {
        let mut img = RgbaImage::from_pixel(4, 3, WHITE);
        img.put_pixel(1, 2, Rgba([10, 10, 10, 255]));
        img.put_pixel(3, 0, Rgba([0, 0, 120, 255]));
        let mask = dark_mask(&img);
        assert_eq!(mask.count_ones(), 2);
        assert!(mask.get(1, 2));
        assert!(mask.get(3, 0));
    }

    #[test]
    fn test_palette_handles_bright_foreground() {
        // Orange has luma 150, above the default threshold
        let orange = Rgba([255, 128, 0, 255]);
        assert!(!DarkClassifier::configured().is_dark(&orange));

        let palette = DarkClassifier::palette(orange, WHITE);
        assert!(palette.is_dark(&orange));
        assert!(!palette.is_dark(&WHITE));
        // Anti-aliased edge pixels go to whichever end they are nearer
        assert!(palette.is_dark(&Rgba([255, 150, 60, 255])));
        assert!(!palette.is_dark(&Rgba([255, 230, 200, 255])));

        let mut img = RgbaImage::from_pixel(3, 2, WHITE);
        img.put_pixel(2, 1, orange);
        let mask = palette.mask(&img);
        assert_eq!(mask.count_ones(), 1);
        assert!(mask.get(2, 1));
    }

    #[test]
    fn test_inverted_palette() {
        let palette = DarkClassifier::palette(WHITE, Rgba([0, 0, 0, 255]));
        assert!(palette.is_dark(&Rgba([240, 240, 240, 255])));
        assert!(!palette.is_dark(&Rgba([20, 20, 20, 255])));
    }

    #[test]
    fn test_identical_palette_has_no_dark() {
        let palette = DarkClassifier::palette(WHITE, WHITE);
        assert!(!palette.is_dark(&WHITE));
    }
}
