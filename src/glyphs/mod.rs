//! Module glyphs
//!
//! Each supported [`ModuleShape`] is a [`Glyph`]: a coverage function over
//! the pixels of one module, measured from the module centre. The
//! [`GlyphRegistry`] maps shapes to implementations so new glyphs plug in
//! without touching the renderer.

/// Disc glyphs (dots, circle)
pub mod disc;
/// L1-ball glyph
pub mod diamond;
/// Radius-modulated blob
pub mod fluid;
/// Implicit heart curve
pub mod heart;
/// Horizontal ellipse
pub mod leaf;
/// Per-module rendering loop
pub mod renderer;
/// Rounded and classy corner clipping
pub mod rounded;
/// Identity glyph
pub mod square;
/// Five-point star
pub mod star;

use image::Rgba;
use std::collections::HashMap;

use crate::error::{Result, StyleError};
use crate::layout::ProtectedZoneSet;
use crate::models::ModuleShape;
use crate::utils::color::lerp;
use crate::utils::geometry::PixelRect;

pub use renderer::ShapeRenderer;

/// Mutable view over a horizontal band of full-width RGBA rows.
///
/// Coordinates are absolute image pixels; the band starts at row `y0`.
pub struct PixelBand<'a> {
    data: &'a mut [u8],
    width: u32,
    y0: u32,
}

impl<'a> PixelBand<'a> {
    /// Wrap `data` (whole rows of `width` RGBA pixels) starting at row `y0`
    pub fn new(data: &'a mut [u8], width: u32, y0: u32) -> Self {
        Self { data, width, y0 }
    }

    /// Rows covered by the band
    pub fn rows(&self) -> u32 {
        (self.data.len() / (self.width as usize * 4).max(1)) as u32
    }

    /// Whether (x, y) falls inside the band
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y >= self.y0 && y < self.y0 + self.rows()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (((y - self.y0) * self.width + x) * 4) as usize
    }

    /// Read pixel (x, y); caller keeps (x, y) inside the band
    pub fn get(&self, x: u32, y: u32) -> Rgba<u8> {
        let i = self.index(x, y);
        Rgba([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Write pixel (x, y); writes outside the band are dropped
    pub fn put(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if !self.contains(x, y) {
            return;
        }
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&color.0);
    }
}

/// Shared, read-only state for painting modules
pub struct GlyphContext<'a> {
    /// Foreground colour
    pub dark: Rgba<u8>,
    /// Background colour ("clear")
    pub light: Rgba<u8>,
    /// Function modules that must not be written
    pub zones: &'a ProtectedZoneSet,
}

/// A decorative replacement for one dark module
pub trait Glyph: Send + Sync {
    /// Shape this glyph implements
    fn shape(&self) -> ModuleShape;

    /// Coverage in 0..=1 of the pixel whose centre is (dx, dy) away from the
    /// module centre. 1 paints the dark colour, 0 clears to light.
    fn coverage(&self, dx: f32, dy: f32, module_px: f32) -> f32;

    /// Clear the module footprint and redraw it from [`Glyph::coverage`].
    /// Protected pixels are skipped.
    fn paint_module(&self, band: &mut PixelBand<'_>, rect: PixelRect, ctx: &GlyphContext<'_>) {
        let m = rect.width as f32;
        let center = rect.center();
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if ctx.zones.is_protected(x, y) {
                    continue;
                }
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let cov = self.coverage(dx, dy, m).clamp(0.0, 1.0);
                band.put(x, y, lerp(ctx.light, ctx.dark, cov));
            }
        }
    }
}

/// Shape to glyph lookup
pub struct GlyphRegistry {
    glyphs: HashMap<ModuleShape, Box<dyn Glyph>>,
}

impl GlyphRegistry {
    /// Registry with no glyphs
    pub fn empty() -> Self {
        Self {
            glyphs: HashMap::new(),
        }
    }

    /// Registry with every built-in glyph
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(square::SquareGlyph));
        registry.register(Box::new(rounded::RoundedGlyph::rounded()));
        registry.register(Box::new(rounded::RoundedGlyph::classy()));
        registry.register(Box::new(disc::DiscGlyph::new(ModuleShape::Dots)));
        registry.register(Box::new(disc::DiscGlyph::new(ModuleShape::Circle)));
        registry.register(Box::new(diamond::DiamondGlyph));
        registry.register(Box::new(star::StarGlyph::default()));
        registry.register(Box::new(heart::HeartGlyph));
        registry.register(Box::new(leaf::LeafGlyph));
        registry.register(Box::new(fluid::FluidGlyph));
        registry
    }

    /// Add or replace the glyph for its shape, returning the previous one
    pub fn register(&mut self, glyph: Box<dyn Glyph>) -> Option<Box<dyn Glyph>> {
        self.glyphs.insert(glyph.shape(), glyph)
    }

    /// Glyph for `shape`, or `UnsupportedStyle` if none is registered
    pub fn get(&self, shape: ModuleShape) -> Result<&dyn Glyph> {
        self.glyphs
            .get(&shape)
            .map(|g| g.as_ref())
            .ok_or_else(|| StyleError::UnsupportedStyle(format!("no glyph registered for '{shape}'")))
    }
}

impl Default for GlyphRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
