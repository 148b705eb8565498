use super::{Glyph, GlyphContext, PixelBand};
use crate::models::ModuleShape;
use crate::utils::geometry::PixelRect;

/// Identity glyph: the module keeps its original square pixels
pub struct SquareGlyph;

impl Glyph for SquareGlyph {
    fn shape(&self) -> ModuleShape {
        ModuleShape::Square
    }

    fn coverage(&self, _dx: f32, _dy: f32, _module_px: f32) -> f32 {
        1.0
    }

    fn paint_module(&self, _band: &mut PixelBand<'_>, _rect: PixelRect, _ctx: &GlyphContext<'_>) {}
}
