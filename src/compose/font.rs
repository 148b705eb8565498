//! Caption text rasterisation
//!
//! Outline fonts go through `ab_glyph`; without one, a built-in 5x7 bitmap
//! font covers printable ASCII.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

use crate::utils::color::lerp;
use crate::utils::geometry::PixelRect;

const CELL_W: u32 = 5;
const CELL_H: u32 = 7;
/// Cell width plus one column of spacing
const ADVANCE: u32 = CELL_W + 1;

/// Glyphs for ' ' (0x20) through '_' (0x5F); column-major, bit 0 is the top row
const BITMAP_GLYPHS: [[u8; 5]; 64] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x01, 0x01], // F
    [0x3E, 0x41, 0x41, 0x51, 0x32], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
];

/// Columns for `c`; lowercase folds to uppercase, anything unknown is blank
pub fn bitmap_glyph(c: char) -> [u8; 5] {
    let c = c.to_ascii_uppercase();
    match c {
        ' '..='_' => BITMAP_GLYPHS[c as usize - 0x20],
        '`' => [0x00, 0x01, 0x02, 0x04, 0x00],
        '{' => [0x00, 0x08, 0x36, 0x41, 0x00],
        '|' => [0x00, 0x00, 0x7F, 0x00, 0x00],
        '}' => [0x00, 0x41, 0x36, 0x08, 0x00],
        '~' => [0x08, 0x04, 0x08, 0x10, 0x08],
        _ => [0; 5],
    }
}

/// Font used to draw a caption
pub enum CaptionFont<'a> {
    /// TrueType/OpenType outlines
    Outline(FontRef<'a>),
    /// Built-in 5x7 cells
    Bitmap,
}

impl<'a> CaptionFont<'a> {
    /// Parse `bytes` as an outline font, falling back to the bitmap font
    pub fn from_bytes(bytes: Option<&'a [u8]>) -> Self {
        match bytes.map(FontRef::try_from_slice) {
            Some(Ok(font)) => CaptionFont::Outline(font),
            Some(Err(e)) => {
                log::warn!("caption font rejected ({}), using bitmap font", e);
                CaptionFont::Bitmap
            }
            None => CaptionFont::Bitmap,
        }
    }

    /// Draw `text` centred in `band`, blending anti-aliased edges over
    /// whatever is already there. Nothing outside `band` is written.
    pub fn draw_centered(&self, canvas: &mut RgbaImage, band: PixelRect, text: &str, color: Rgba<u8>) {
        if text.is_empty() || band.width == 0 || band.height == 0 {
            return;
        }
        match self {
            CaptionFont::Outline(font) => draw_outline(font, canvas, band, text, color),
            CaptionFont::Bitmap => draw_bitmap(canvas, band, text, color),
        }
    }
}

/// Integer cell scale that fits `chars` glyphs in `band`
fn bitmap_scale(band: PixelRect, chars: u32) -> u32 {
    let text_cells = (chars * ADVANCE).saturating_sub(1).max(1);
    let by_height = band.height * 6 / 10 / CELL_H;
    let by_width = band.width * 9 / 10 / text_cells;
    by_height.min(by_width).max(1)
}

fn draw_bitmap(canvas: &mut RgbaImage, band: PixelRect, text: &str, color: Rgba<u8>) {
    let chars = text.chars().count() as u32;
    let scale = bitmap_scale(band, chars);
    let text_w = ((chars * ADVANCE).saturating_sub(1)) * scale;
    let text_h = CELL_H * scale;
    let x0 = band.x as i64 + (band.width as i64 - text_w as i64) / 2;
    let y0 = band.y as i64 + (band.height as i64 - text_h as i64) / 2;

    for (i, c) in text.chars().enumerate() {
        let cx = x0 + (i as u32 * ADVANCE * scale) as i64;
        for (col, bits) in bitmap_glyph(c).into_iter().enumerate() {
            for row in 0..CELL_H {
                if (bits >> row) & 1 == 0 {
                    continue;
                }
                let px = cx + (col as u32 * scale) as i64;
                let py = y0 + (row * scale) as i64;
                fill_clipped(canvas, band, px, py, scale, color);
            }
        }
    }
}

fn fill_clipped(canvas: &mut RgbaImage, band: PixelRect, x: i64, y: i64, side: u32, color: Rgba<u8>) {
    for py in y..y + side as i64 {
        for px in x..x + side as i64 {
            if px < 0 || py < 0 || !band.contains(px as u32, py as u32) {
                continue;
            }
            canvas.put_pixel(px as u32, py as u32, color);
        }
    }
}

fn draw_outline(font: &FontRef<'_>, canvas: &mut RgbaImage, band: PixelRect, text: &str, color: Rgba<u8>) {
    let mut scale = PxScale::from(band.height as f32 * 0.6);
    let width_at = |scale: PxScale| -> f32 {
        let scaled = font.as_scaled(scale);
        text.chars().map(|c| scaled.h_advance(scaled.glyph_id(c))).sum()
    };
    let limit = band.width as f32 * 0.9;
    let natural = width_at(scale);
    if natural > limit && natural > 0.0 {
        let shrink = limit / natural;
        scale = PxScale::from(scale.y * shrink);
    }

    let scaled = font.as_scaled(scale);
    let text_w = width_at(scale);
    let line_h = scaled.ascent() - scaled.descent();
    let mut pen_x = band.x as f32 + (band.width as f32 - text_w) / 2.0;
    let baseline = band.y as f32 + (band.height as f32 - line_h) / 2.0 + scaled.ascent();

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        let glyph = id.with_scale_and_position(scale, ab_glyph::point(pen_x, baseline));
        if let Some(outlined) = scaled.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                if coverage <= 0.0 || px < 0 || py < 0 || !band.contains(px as u32, py as u32) {
                    return;
                }
                let dst = canvas.get_pixel_mut(px as u32, py as u32);
                *dst = lerp(*dst, color, coverage);
            });
        }
        pen_x += scaled.h_advance(id);
    }
}
