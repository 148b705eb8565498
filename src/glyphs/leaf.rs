use super::Glyph;
use crate::models::ModuleShape;

const SEMI_X: f32 = 0.5;
const SEMI_Y: f32 = 0.3;

/// Ellipse, wide along x
pub struct LeafGlyph;

impl Glyph for LeafGlyph {
    fn shape(&self) -> ModuleShape {
        ModuleShape::Leaf
    }

    fn coverage(&self, dx: f32, dy: f32, module_px: f32) -> f32 {
        let ex = dx / (SEMI_X * module_px);
        let ey = dy / (SEMI_Y * module_px);
        if ex * ex + ey * ey <= 1.0 { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_is_wider_than_tall() {
        assert_eq!(LeafGlyph.coverage(4.5, 0.0, 10.0), 1.0);
        assert_eq!(LeafGlyph.coverage(0.0, 3.5, 10.0), 0.0);
        assert_eq!(LeafGlyph.coverage(0.0, 2.5, 10.0), 1.0);
    }
}
