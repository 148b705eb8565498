use image::Rgba;
use rayon::prelude::*;

use crate::error::{Result, StyleError};
use crate::layout::ProtectedZoneSet;
use crate::models::{GradientKind, GradientSpec, Point, RenderedQrImage};
use crate::utils::binarization::DarkClassifier;
use crate::utils::color::lerp;
use crate::utils::geometry::PixelRect;

/// Scalar gradient parameter over the QR area
#[derive(Debug, Clone, Copy)]
struct GradientField {
    kind: GradientKind,
    center: Point,
    start: Point,
    dir: Point,
    length: f32,
    radius: f32,
}

impl GradientField {
    fn new(spec: &GradientSpec, area: PixelRect) -> Self {
        let (w, h) = (area.width as f32, area.height as f32);
        let center = area.center();
        let theta = spec.angle_degrees.to_radians();
        let dir = Point::new(theta.cos(), theta.sin());
        // Anchors sit where the gradient axis leaves the area
        let half = (dir.x.abs() * w + dir.y.abs() * h) / 2.0;
        let start = center.translate(-dir.x * half, -dir.y * half);
        Self {
            kind: spec.kind,
            center,
            start,
            dir,
            length: (2.0 * half).max(f32::EPSILON),
            radius: (w.min(h) / 2.0).max(f32::EPSILON),
        }
    }

    /// Position along the gradient, 0..=1
    fn t_at(&self, x: u32, y: u32) -> f32 {
        let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
        let t = match self.kind {
            GradientKind::Linear => {
                Point::new(p.x - self.start.x, p.y - self.start.y).dot(&self.dir) / self.length
            }
            GradientKind::Radial => p.distance(&self.center) / self.radius,
        };
        t.clamp(0.0, 1.0)
    }
}

/// Colour at `t` with stops evenly spaced across `colors` (at least two)
fn sample_stops(colors: &[Rgba<u8>], t: f32) -> Rgba<u8> {
    let segments = colors.len() - 1;
    let pos = t * segments as f32;
    let i = (pos.floor() as usize).min(segments - 1);
    lerp(colors[i], colors[i + 1], pos - i as f32)
}

/// Recolour dark pixels with a gradient and return how many were painted.
///
/// The field spans the QR area only; a caption band above it is never
/// written. The dark/light mask is captured before any paint, classifying
/// pixels against the image's own dark and light colours. Light pixels and
/// pixels inside the finder zones keep their exact colour. Fewer than two
/// colours fails with `GradientSpec` before anything is written.
pub fn apply_gradient(
    image: &mut RenderedQrImage,
    zones: &ProtectedZoneSet,
    spec: &GradientSpec,
) -> Result<usize> {
    if spec.colors.len() < 2 {
        return Err(StyleError::GradientSpec(spec.colors.len()));
    }

    let mask = DarkClassifier::palette(image.dark, image.light).mask(&image.pixels);
    let width = image.pixels.width();
    let area = zones.grid().area().intersect(&PixelRect::new(0, 0, width, image.pixels.height()));
    let field = GradientField::new(spec, area);
    let colors = spec.colors.as_slice();

    let row_bytes = width as usize * 4;
    let raw: &mut [u8] = &mut image.pixels;
    let rows = &mut raw[area.y as usize * row_bytes..area.bottom() as usize * row_bytes];
    let painted: usize = rows
        .par_chunks_mut(row_bytes)
        .enumerate()
        .map(|(dy, row)| {
            let y = area.y + dy as u32;
            let mut painted = 0;
            for x in area.x..area.right() {
                if !mask.get(x as usize, y as usize) || zones.in_finder_zone(x, y) {
                    continue;
                }
                let color = sample_stops(colors, field.t_at(x, y));
                let i = x as usize * 4;
                row[i..i + 4].copy_from_slice(&color.0);
                painted += 1;
            }
            painted
        })
        .sum();

    log::debug!(
        "{:?} gradient over {} dark pixels ({} stops)",
        spec.kind,
        painted,
        colors.len()
    );
    Ok(painted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::add_frame;
    use crate::encoder::{EncodeOptions, encode_with};
    use crate::layout::ModuleGrid;
    use crate::models::FrameSpec;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const SQUARE_100: PixelRect = PixelRect {
        x: 0,
        y: 0,
        width: 100,
        height: 100,
    };

    fn setup() -> (RenderedQrImage, ProtectedZoneSet) {
        let img = encode_with("gradient test", &EncodeOptions::default()).unwrap();
        let grid =
            ModuleGrid::locate(img.width(), img.height(), img.module_count, img.quiet_zone_px)
                .unwrap();
        (img, ProtectedZoneSet::new(grid))
    }

    #[test]
    fn test_sample_stops() {
        let green = Rgba([0, 255, 0, 255]);
        let stops = [RED, green, BLUE];
        assert_eq!(sample_stops(&stops, 0.0), RED);
        assert_eq!(sample_stops(&stops, 0.5), green);
        assert_eq!(sample_stops(&stops, 1.0), BLUE);
    }

    #[test]
    fn test_linear_field_runs_left_to_right() {
        let field = GradientField::new(&GradientSpec::linear(vec![RED, BLUE], 0.0), SQUARE_100);
        assert!(field.t_at(0, 50) < 0.01);
        assert!(field.t_at(99, 50) > 0.99);
        assert!((field.t_at(49, 10) - 0.495).abs() < 0.01);

        let vertical = GradientField::new(&GradientSpec::linear(vec![RED, BLUE], 90.0), SQUARE_100);
        assert!(vertical.t_at(50, 0) < 0.01);
        assert!(vertical.t_at(50, 99) > 0.99);
    }

    #[test]
    fn test_light_pixels_and_finders_untouched() {
        let (original, zones) = setup();
        let mut img = original.clone();
        let painted =
            apply_gradient(&mut img, &zones, &GradientSpec::linear(vec![RED, BLUE], 45.0)).unwrap();
        assert!(painted > 0);

        for (x, y, before) in original.pixels.enumerate_pixels() {
            let after = img.pixels.get_pixel(x, y);
            if *before == original.light || zones.in_finder_zone(x, y) {
                assert_eq!(after, before, "pixel ({x},{y}) changed");
            }
        }
    }

    #[test]
    fn test_radial_centre_gets_first_colour() {
        let (mut img, zones) = setup();
        apply_gradient(&mut img, &zones, &GradientSpec::radial(vec![RED, BLUE])).unwrap();
        let field = GradientField::new(&GradientSpec::radial(vec![RED, BLUE]), zones.grid().area());
        let c = img.width() / 2;
        assert!(field.t_at(c, c) < 0.01);
        assert_eq!(field.t_at(0, 0), 1.0);
    }

    #[test]
    fn test_single_colour_is_rejected_without_paint() {
        let (original, zones) = setup();
        let mut img = original.clone();
        let err = apply_gradient(&mut img, &zones, &GradientSpec::linear(vec![RED], 0.0)).unwrap_err();
        assert!(matches!(err, StyleError::GradientSpec(1)));
        assert_eq!(img, original);
    }

    #[test]
    fn test_field_follows_offset_area() {
        let area = PixelRect::new(0, 60, 100, 100);
        let field = GradientField::new(&GradientSpec::linear(vec![RED, BLUE], 90.0), area);
        assert!(field.t_at(50, 60) < 0.01);
        assert!(field.t_at(50, 159) > 0.99);
        let radial = GradientField::new(&GradientSpec::radial(vec![RED, BLUE]), area);
        assert!(radial.t_at(50, 110) < 0.02);
    }

    #[test]
    fn test_caption_band_is_not_painted() {
        let (img, _) = setup();
        let framed = add_frame(img, &FrameSpec::new("CAPTION"));
        let qr_height = framed.height() - framed.caption_px;
        let grid = ModuleGrid::locate(framed.width(), qr_height, framed.module_count, framed.quiet_zone_px)
            .unwrap()
            .with_origin_y(framed.caption_px);
        let zones = ProtectedZoneSet::new(grid);

        let mut painted = framed.clone();
        let count =
            apply_gradient(&mut painted, &zones, &GradientSpec::linear(vec![RED, BLUE], 90.0)).unwrap();
        assert!(count > 0);
        for y in 0..framed.caption_px {
            for x in 0..framed.width() {
                assert_eq!(painted.pixels.get_pixel(x, y), framed.pixels.get_pixel(x, y));
            }
        }
        for zone in zones.finder_zones() {
            let r = zone.pixels;
            for y in r.y..r.bottom() {
                for x in r.x..r.right() {
                    assert_eq!(painted.pixels.get_pixel(x, y), framed.pixels.get_pixel(x, y));
                }
            }
        }
    }

    #[test]
    fn test_bright_foreground_is_painted() {
        let options = EncodeOptions {
            dark: Rgba([0, 255, 0, 255]),
            ..EncodeOptions::default()
        };
        let original = encode_with("green gradient", &options).unwrap();
        let grid = ModuleGrid::locate(
            original.width(),
            original.height(),
            original.module_count,
            original.quiet_zone_px,
        )
        .unwrap();
        let zones = ProtectedZoneSet::new(grid);
        let mut img = original.clone();
        let painted =
            apply_gradient(&mut img, &zones, &GradientSpec::radial(vec![RED, BLUE])).unwrap();
        assert!(painted > 0);
        for (x, y, before) in original.pixels.enumerate_pixels() {
            if *before == original.light {
                assert_eq!(img.pixels.get_pixel(x, y), before);
            }
        }
    }
}
