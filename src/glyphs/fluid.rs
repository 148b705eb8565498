use super::Glyph;
use crate::models::ModuleShape;

const BASE_RADIUS: f32 = 0.45;
const RIPPLE: f32 = 0.1;
const LOBES: f32 = 6.0;

/// Blob whose radius ripples with the polar angle:
/// `r(a) = 0.45 * module * (1 + 0.1 * sin(6a))`
pub struct FluidGlyph;

impl Glyph for FluidGlyph {
    fn shape(&self) -> ModuleShape {
        ModuleShape::Fluid
    }

    fn coverage(&self, dx: f32, dy: f32, module_px: f32) -> f32 {
        let angle = dy.atan2(dx);
        let radius = BASE_RADIUS * module_px * (1.0 + RIPPLE * (LOBES * angle).sin());
        if (dx * dx + dy * dy).sqrt() <= radius { 1.0 } else { 0.0 }
    }
}
