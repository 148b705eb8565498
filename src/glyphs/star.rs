use super::Glyph;
use crate::models::ModuleShape;
use std::f32::consts::{PI, TAU};

/// Five-point star, one point up.
///
/// Drawn as a true star polygon rather than a plus-sign stand-in; it stays
/// inside the module footprint like every other glyph.
pub struct StarGlyph {
    outer: f32,
    inner_ratio: f32,
}

impl Default for StarGlyph {
    fn default() -> Self {
        Self {
            outer: 0.48,
            inner_ratio: 0.42,
        }
    }
}

impl Glyph for StarGlyph {
    fn shape(&self) -> ModuleShape {
        ModuleShape::Star
    }

    fn coverage(&self, dx: f32, dy: f32, module_px: f32) -> f32 {
        let outer = self.outer * module_px;
        let inner = outer * self.inner_ratio;
        let half_sector = PI / 5.0;

        let rho = (dx * dx + dy * dy).sqrt();
        if rho > outer {
            return 0.0;
        }
        if rho <= inner * half_sector.cos() {
            return 1.0;
        }

        // Fold into the first half-sector: angle from the nearest point
        let theta = dx.atan2(-dy).rem_euclid(TAU / 5.0);
        let phi = theta.min(TAU / 5.0 - theta);
        let (px, py) = (rho * phi.cos(), rho * phi.sin());

        // Edge from the outer vertex (outer, 0) to the inner vertex
        let (ix, iy) = (inner * half_sector.cos(), inner * half_sector.sin());
        let (ex, ey) = (ix - outer, iy);
        let side_p = ex * py - ey * (px - outer);
        let side_origin = ex * 0.0 - ey * (0.0 - outer);
        if side_p * side_origin >= 0.0 { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_and_notches() {
        let star = StarGlyph::default();
        let m = 20.0;
        // Top point (outer radius 9.6) is covered near its tip
        assert_eq!(star.coverage(0.0, -9.0, m), 1.0);
        // Straight down lies between two points (inner radius ~4.0)
        assert_eq!(star.coverage(0.0, 6.0, m), 0.0);
        assert_eq!(star.coverage(0.0, 3.0, m), 1.0);
    }

    #[test]
    fn test_outside_disc_is_empty() {
        let star = StarGlyph::default();
        assert_eq!(star.coverage(9.9, 0.0, 20.0), 0.0);
    }
}
