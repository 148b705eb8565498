//! Scan-plausibility heuristic
//!
//! A cheap check that the three finder corners still look like finder
//! corners after styling. It never decodes the symbol; a plausible report
//! means the corners survived, not that a scanner will read the payload.

use image::RgbaImage;

use crate::error::Result;
use crate::layout::{ModuleGrid, ProtectedZoneSet};
use crate::models::RenderedQrImage;
use crate::utils::binarization::DarkClassifier;

/// Exclusive band a finder zone's dark ratio must fall in
pub const DARK_RATIO_BAND: (f32, f32) = (0.35, 0.65);

/// Corners that must pass for the image to count as plausible
pub const MIN_PASSING_ZONES: usize = 2;

/// Outcome of [`assess`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibilityReport {
    /// Dark pixel ratio of the top-left, top-right and bottom-left zones
    pub dark_ratios: [f32; 3],
    /// Whether at least two ratios fall inside [`DARK_RATIO_BAND`]
    pub plausible: bool,
}

impl PlausibilityReport {
    /// Number of zones whose ratio falls inside the band
    pub fn passing_zones(&self) -> usize {
        self.dark_ratios.iter().filter(|r| in_band(**r)).count()
    }
}

fn in_band(ratio: f32) -> bool {
    ratio > DARK_RATIO_BAND.0 && ratio < DARK_RATIO_BAND.1
}

/// Measure the finder zones of a raster whose QR area starts `caption_px`
/// rows from the top, splitting dark from light with `classifier`.
///
/// Fails with `Geometry` when the module grid cannot be located.
pub fn assess(
    image: &RgbaImage,
    module_count: usize,
    quiet_zone_px: u32,
    caption_px: u32,
    classifier: DarkClassifier,
) -> Result<PlausibilityReport> {
    let qr_height = image.height().saturating_sub(caption_px);
    let grid = ModuleGrid::locate(image.width(), qr_height, module_count, quiet_zone_px)?
        .with_origin_y(caption_px);
    let zones = ProtectedZoneSet::new(grid);
    let mask = classifier.mask(image);

    let mut dark_ratios = [0.0f32; 3];
    for (ratio, zone) in dark_ratios.iter_mut().zip(zones.finder_zones()) {
        let r = zone.pixels;
        let mut dark = 0usize;
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                if mask.get(x as usize, y as usize) {
                    dark += 1;
                }
            }
        }
        let area = (r.width as usize * r.height as usize).max(1);
        *ratio = dark as f32 / area as f32;
    }

    let passing = dark_ratios.iter().filter(|r| in_band(**r)).count();
    let report = PlausibilityReport {
        dark_ratios,
        plausible: passing >= MIN_PASSING_ZONES,
    };
    log::debug!(
        "finder dark ratios {:.3?}, plausible={}",
        report.dark_ratios,
        report.plausible
    );
    Ok(report)
}

/// [`assess`] using the geometry and colours recorded on a rendered image
pub fn assess_rendered(image: &RenderedQrImage) -> Result<PlausibilityReport> {
    assess(
        &image.pixels,
        image.module_count,
        image.quiet_zone_px,
        image.caption_px,
        DarkClassifier::palette(image.dark, image.light),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{EncodeOptions, encode_with};
    use crate::error::StyleError;
    use image::Rgba;

    #[test]
    fn test_fresh_code_is_plausible() {
        let img = encode_with("plausible", &EncodeOptions::default()).unwrap();
        let report = assess_rendered(&img).unwrap();
        assert!(report.plausible, "{:?}", report.dark_ratios);
        assert_eq!(report.passing_zones(), 3);
    }

    #[test]
    fn test_blank_image_is_not_plausible() {
        let blank = RgbaImage::from_pixel(290, 290, Rgba([255, 255, 255, 255]));
        let report = assess(&blank, 21, 40, 0, DarkClassifier::configured()).unwrap();
        assert!(!report.plausible);
        assert_eq!(report.dark_ratios, [0.0; 3]);
    }

    #[test]
    fn test_two_of_three_is_enough() {
        let mut img = encode_with("two corners", &EncodeOptions::default()).unwrap();
        let report = assess_rendered(&img).unwrap();
        assert!(report.plausible);

        // Blacken one corner completely
        let zones = ProtectedZoneSet::new(
            ModuleGrid::locate(img.width(), img.height(), img.module_count, img.quiet_zone_px)
                .unwrap(),
        );
        let r = zones.finder_zones()[0].pixels;
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                img.pixels.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        let report = assess_rendered(&img).unwrap();
        assert_eq!(report.dark_ratios[0], 1.0);
        assert_eq!(report.passing_zones(), 2);
        assert!(report.plausible);
    }

    #[test]
    fn test_bright_foreground_uses_palette() {
        let options = EncodeOptions {
            dark: Rgba([255, 128, 0, 255]),
            ..EncodeOptions::default()
        };
        let img = encode_with("orange corners", &options).unwrap();
        assert!(assess_rendered(&img).unwrap().plausible);

        // Luma alone sees no dark pixels at all
        let by_luma = assess(
            &img.pixels,
            img.module_count,
            img.quiet_zone_px,
            0,
            DarkClassifier::configured(),
        )
        .unwrap();
        assert_eq!(by_luma.dark_ratios, [0.0; 3]);
    }

    #[test]
    fn test_bad_geometry_is_an_error() {
        let img = RgbaImage::new(100, 80);
        assert!(matches!(assess(&img, 21, 0, 0, DarkClassifier::configured()), Err(StyleError::Geometry(_))));
    }
}
