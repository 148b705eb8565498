use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::{Result, StyleError};
use crate::layout::ProtectedZoneSet;
use crate::models::{LogoSpec, RenderedQrImage};
use crate::utils::color::blend_over;
use crate::utils::geometry::PixelRect;

/// Pixel footprint of a logo placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoLayout {
    /// Area the scaled logo must fit inside
    pub logo: PixelRect,
    /// Backing plate including its border
    pub plate: PixelRect,
}

impl LogoLayout {
    /// Compute the placement of `spec` inside the QR `area`.
    ///
    /// The logo is sized from the area, centred on it by default, and a
    /// user `position` is taken relative to the area's top-left corner.
    /// Both rectangles are clipped to the area.
    pub fn compute(spec: &LogoSpec, area: PixelRect) -> Self {
        let side = (spec.clamped_size_percent() / 100.0 * area.width.min(area.height) as f32).round()
            as u32;
        let margin = (spec.margin_percent.max(0.0) / 100.0 * side as f32).round() as u32;
        let center = match spec.position {
            Some(p) => p.translate(area.x as f32, area.y as f32),
            None => area.center(),
        };
        let square = |side: u32| {
            PixelRect::centered_square(center, side, area.right(), area.bottom()).intersect(&area)
        };
        Self {
            logo: square(side),
            plate: square(side + 2 * margin),
        }
    }
}

/// Paint a backing plate and alpha-blend the decoded logo on top of it.
///
/// The logo bytes are decoded before anything is written, so a `LogoDecode`
/// error leaves the image exactly as it was. Placement is relative to the QR
/// area of `zones`, so a caption band is never covered. Pixels inside the
/// finder zones are skipped; plate and logo are clipped around them.
pub fn embed_logo(
    image: &mut RenderedQrImage,
    zones: &ProtectedZoneSet,
    spec: &LogoSpec,
) -> Result<LogoLayout> {
    let decoded = image::load_from_memory(&spec.bytes)
        .map_err(|e| StyleError::LogoDecode(e.to_string()))?
        .to_rgba8();
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(StyleError::LogoDecode("logo has no pixels".into()));
    }

    let (width, height) = image.pixels.dimensions();
    let area = zones.grid().area().intersect(&PixelRect::new(0, 0, width, height));
    let layout = LogoLayout::compute(spec, area);
    paint_plate(&mut image.pixels, zones, spec, layout.plate);
    if layout.logo.width == 0 || layout.logo.height == 0 {
        return Ok(layout);
    }

    let scaled = fit_inside(&decoded, layout.logo.width, layout.logo.height);
    let x0 = layout.logo.x + layout.logo.width.saturating_sub(scaled.width()) / 2;
    let y0 = layout.logo.y + layout.logo.height.saturating_sub(scaled.height()) / 2;
    for (lx, ly, src) in scaled.enumerate_pixels() {
        let (x, y) = (x0 + lx, y0 + ly);
        if !layout.logo.contains(x, y) || zones.in_finder_zone(x, y) {
            continue;
        }
        let dst = image.pixels.get_pixel_mut(x, y);
        *dst = blend_over(*dst, *src);
    }

    log::debug!(
        "logo {}x{} -> {}x{} at ({}, {}), plate {}x{}",
        decoded.width(),
        decoded.height(),
        scaled.width(),
        scaled.height(),
        x0,
        y0,
        layout.plate.width,
        layout.plate.height
    );
    Ok(layout)
}

fn paint_plate(pixels: &mut RgbaImage, zones: &ProtectedZoneSet, spec: &LogoSpec, plate: PixelRect) {
    let radius = spec.corner_radius_px as f32;
    let inner = plate.inset(spec.border_px);
    let inner_radius = (radius - spec.border_px as f32).max(0.0);
    for y in plate.y..plate.bottom() {
        for x in plate.x..plate.right() {
            if zones.in_finder_zone(x, y) || !plate.rounded_contains(x, y, radius) {
                continue;
            }
            let color = if inner.rounded_contains(x, y, inner_radius) {
                spec.plate_color
            } else {
                spec.border_color
            };
            pixels.put_pixel(x, y, color);
        }
    }
}

/// Lanczos3 resize to the largest size inside `max_w` x `max_h` keeping the
/// aspect ratio
fn fit_inside(src: &RgbaImage, max_w: u32, max_h: u32) -> RgbaImage {
    let scale = (max_w as f32 / src.width() as f32).min(max_h as f32 / src.height() as f32);
    let w = ((src.width() as f32 * scale).round() as u32).clamp(1, max_w.max(1));
    let h = ((src.height() as f32 * scale).round() as u32).clamp(1, max_h.max(1));
    imageops::resize(src, w, h, FilterType::Lanczos3)
}
