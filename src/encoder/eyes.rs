use image::RgbaImage;

use super::EncodeOptions;
use crate::models::EyeShape;
use crate::utils::geometry::PixelRect;

const FINDER_MODULES: u32 = 7;

/// Redraw the three 7x7 finder patterns with a non-square eye shape.
///
/// Runs while the base bitmap is produced, so the restyled eyes are part of
/// what later stages treat as read-only.
pub(super) fn draw_eyes(
    img: &mut RgbaImage,
    module_count: usize,
    quiet_zone_px: u32,
    options: &EncodeOptions,
) {
    let m = options.module_px;
    let far = (module_count as u32 - FINDER_MODULES) * m;
    for (ox, oy) in [(0, 0), (far, 0), (0, far)] {
        let outer = PixelRect::new(
            quiet_zone_px + ox,
            quiet_zone_px + oy,
            FINDER_MODULES * m,
            FINDER_MODULES * m,
        );
        draw_eye(img, outer, m, options);
    }
}

fn draw_eye(img: &mut RgbaImage, outer: PixelRect, m: u32, options: &EncodeOptions) {
    let hole = outer.inset(m);
    let pupil = outer.inset(2 * m);
    let m = m as f32;
    let (outer_r, hole_r, pupil_r) = match options.eye_shape {
        EyeShape::Square => (0.0, 0.0, 0.0),
        EyeShape::Rounded => (1.75 * m, 1.0 * m, 0.75 * m),
        EyeShape::Circle => (3.5 * m, 2.5 * m, 1.5 * m),
    };

    for y in outer.y..outer.bottom() {
        for x in outer.x..outer.right() {
            let color = if pupil.rounded_contains(x, y, pupil_r) {
                options.dark
            } else if hole.rounded_contains(x, y, hole_r) {
                options.light
            } else if outer.rounded_contains(x, y, outer_r) {
                options.dark
            } else {
                options.light
            };
            img.put_pixel(x, y, color);
        }
    }
}
