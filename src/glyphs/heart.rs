use super::Glyph;
use crate::models::ModuleShape;

/// Vertical extent of the implicit heart, from the tip (-1) to the lobes
const CURVE_HEIGHT: f32 = 2.3;
/// Shift that centres the curve's bounding box on the module centre
const CURVE_CENTER_Y: f32 = 0.118;
/// Share of the module the heart spans
const FILL: f32 = 0.9;

/// Heart drawn from `(x^2 + y^2 - 1)^3 - x^2 y^3 <= 0`
pub struct HeartGlyph;

impl Glyph for HeartGlyph {
    fn shape(&self) -> ModuleShape {
        ModuleShape::Heart
    }

    fn coverage(&self, dx: f32, dy: f32, module_px: f32) -> f32 {
        let scale = FILL * module_px / CURVE_HEIGHT;
        let x = dx / scale;
        let y = -dy / scale + CURVE_CENTER_Y;
        let a = x * x + y * y - 1.0;
        if a * a * a - x * x * y * y * y <= 0.0 { 1.0 } else { 0.0 }
    }
}
