/// Luminance for dark/light classification
/// Y = 0.299*R + 0.587*G + 0.114*B
/// Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
use image::Rgba;
use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Luma of one RGBA pixel (alpha ignored)
#[inline]
pub fn luma(px: &Rgba<u8>) -> u8 {
    luma_rgb(px[0], px[1], px[2])
}

#[inline]
fn luma_rgb(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8).min(255) as u8
}

/// Convert an RGBA buffer to grayscale with rows spread over the rayon pool
pub fn rgba_to_grayscale_parallel(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }
    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let src = &rgba[y * width * 4..(y + 1) * width * 4];
        for (dst, px) in row.iter_mut().zip(src.chunks_exact(4)) {
            *dst = luma_rgb(px[0], px[1], px[2]);
        }
    });
    gray
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma(&Rgba([0, 0, 0, 255])), 0);
        // coefficients sum to 255, so white lands one below full scale
        assert_eq!(luma(&Rgba([255, 255, 255, 255])), 254);
        assert_eq!(luma(&Rgba([255, 255, 255, 0])), 254);
    }

    #[test]
    fn test_rgba_to_grayscale() {
        let rgba = vec![
            255, 0, 0, 255, // Red
            0, 255, 0, 255, // Green
            0, 0, 255, 255, // Blue
            255, 255, 255, 255, // White
        ];
        let gray = rgba_to_grayscale_parallel(&rgba, 2, 2);
        assert_eq!(gray.len(), 4);
        assert!(gray[0] > 70 && gray[0] < 80);
        assert!(gray[1] > 145 && gray[1] < 155);
        assert!(gray[2] > 25 && gray[2] < 35);
        assert_eq!(gray[3], 254);
    }

    #[test]
    fn test_parallel_matches_per_pixel_luma() {
        let rgba: Vec<u8> = (0..(16 * 9 * 4)).map(|i| (i * 37 % 256) as u8).collect();
        let expected: Vec<u8> = rgba
            .chunks_exact(4)
            .map(|px| luma(&Rgba([px[0], px[1], px[2], px[3]])))
            .collect();
        assert_eq!(rgba_to_grayscale_parallel(&rgba, 16, 9), expected);
    }
}
