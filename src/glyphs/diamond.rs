use super::Glyph;
use crate::models::ModuleShape;

/// `|dx| + |dy| <= 0.4 * module`
pub struct DiamondGlyph;

impl Glyph for DiamondGlyph {
    fn shape(&self) -> ModuleShape {
        ModuleShape::Diamond
    }

    fn coverage(&self, dx: f32, dy: f32, module_px: f32) -> f32 {
        if dx.abs() + dy.abs() <= 0.4 * module_px { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diamond_l1_ball() {
        assert_eq!(DiamondGlyph.coverage(2.0, 2.0, 10.0), 1.0);
        assert_eq!(DiamondGlyph.coverage(2.5, 2.0, 10.0), 0.0);
        assert_eq!(DiamondGlyph.coverage(0.0, -4.0, 10.0), 1.0);
    }
}
