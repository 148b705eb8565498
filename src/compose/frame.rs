use image::{RgbaImage, imageops};

use super::font::CaptionFont;
use crate::config;
use crate::models::{FrameSpec, RenderedQrImage};
use crate::utils::geometry::PixelRect;

/// Caption band height for `spec`
pub fn caption_height(spec: &FrameSpec) -> u32 {
    spec.caption_height.unwrap_or_else(config::caption_height)
}

/// Add a caption band above the code.
///
/// The result is `caption_height` pixels taller with the same width; the
/// styled code is copied below the band unchanged. A zero-height band
/// returns the image as is.
pub fn add_frame(image: RenderedQrImage, spec: &FrameSpec) -> RenderedQrImage {
    let band_h = caption_height(spec);
    if band_h == 0 {
        return image;
    }

    let (width, height) = image.pixels.dimensions();
    let mut canvas = RgbaImage::from_pixel(width, height + band_h, spec.background_color);
    imageops::replace(&mut canvas, &image.pixels, 0, band_h as i64);

    let band = PixelRect::new(0, 0, width, band_h);
    let font = CaptionFont::from_bytes(spec.font.as_deref());
    font.draw_centered(&mut canvas, band, &spec.text, spec.text_color);

    log::debug!(
        "framed {}x{} with a {}px caption ({} chars)",
        width,
        height,
        band_h,
        spec.text.chars().count()
    );

    RenderedQrImage {
        pixels: canvas,
        caption_px: image.caption_px + band_h,
        ..image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{EncodeOptions, encode_with};
    use image::Rgba;

    fn base() -> RenderedQrImage {
        encode_with("framed", &EncodeOptions::default()).unwrap()
    }

    #[test]
    fn test_frame_grows_height_only() {
        let original = base();
        let mut spec = FrameSpec::new("Scan me");
        spec.caption_height = Some(48);
        let framed = add_frame(original.clone(), &spec);

        assert_eq!(framed.width(), original.width());
        assert_eq!(framed.height(), original.height() + 48);
        assert_eq!(framed.caption_px, 48);
        assert_eq!(framed.qr_side(), original.qr_side());

        for (x, y, px) in original.pixels.enumerate_pixels() {
            assert_eq!(framed.pixels.get_pixel(x, y + 48), px);
        }
    }

    #[test]
    fn test_caption_draws_text_colour() {
        let mut spec = FrameSpec::new("HELLO");
        spec.text_color = Rgba([200, 0, 0, 255]);
        spec.caption_height = Some(60);
        let framed = add_frame(base(), &spec);
        let inked = (0..framed.width())
            .flat_map(|x| (0..60).map(move |y| (x, y)))
            .filter(|&(x, y)| *framed.pixels.get_pixel(x, y) == spec.text_color)
            .count();
        assert!(inked > 0);
    }

    #[test]
    fn test_empty_text_leaves_plain_band() {
        let mut spec = FrameSpec::new("");
        spec.background_color = Rgba([10, 20, 30, 255]);
        spec.caption_height = Some(20);
        let framed = add_frame(base(), &spec);
        for y in 0..20 {
            for x in 0..framed.width() {
                assert_eq!(*framed.pixels.get_pixel(x, y), spec.background_color);
            }
        }
    }
}
