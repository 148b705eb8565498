use super::Glyph;
use crate::models::ModuleShape;

const RADIUS: f32 = 0.4;

/// Disc of radius 0.4 module centred in the module
pub struct DiscGlyph {
    shape: ModuleShape,
}

impl DiscGlyph {
    pub fn new(shape: ModuleShape) -> Self {
        Self { shape }
    }
}

impl Glyph for DiscGlyph {
    fn shape(&self) -> ModuleShape {
        self.shape
    }

    fn coverage(&self, dx: f32, dy: f32, module_px: f32) -> f32 {
        let r = RADIUS * module_px;
        if dx * dx + dy * dy <= r * r { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_radius() {
        let glyph = DiscGlyph::new(ModuleShape::Dots);
        assert_eq!(glyph.coverage(3.9, 0.0, 10.0), 1.0);
        assert_eq!(glyph.coverage(4.1, 0.0, 10.0), 0.0);
        assert_eq!(glyph.coverage(3.0, 3.0, 10.0), 0.0);
    }
}
