use super::Glyph;
use crate::models::ModuleShape;

/// Corner radius bounds, as a fraction of the module side
const MIN_RADIUS: f32 = 0.1;
const MAX_RADIUS: f32 = 0.3;

/// Square module with its four corners cut to quarter circles.
///
/// `rounded` cuts hard; `classy` fades the cut over one pixel so the edge
/// blends from dark to light instead of stepping.
pub struct RoundedGlyph {
    shape: ModuleShape,
    radius_fraction: f32,
    antialias: bool,
}

impl RoundedGlyph {
    /// Hard quarter-circle corners, radius 0.25 module
    pub fn rounded() -> Self {
        Self {
            shape: ModuleShape::Rounded,
            radius_fraction: 0.25,
            antialias: false,
        }
    }

    /// Anti-aliased corners, radius 0.3 module
    pub fn classy() -> Self {
        Self {
            shape: ModuleShape::Classy,
            radius_fraction: 0.3,
            antialias: true,
        }
    }

    /// Corner radius in pixels for a module of `module_px`
    pub fn corner_radius(&self, module_px: f32) -> f32 {
        self.radius_fraction.clamp(MIN_RADIUS, MAX_RADIUS) * module_px
    }
}

impl Glyph for RoundedGlyph {
    fn shape(&self) -> ModuleShape {
        self.shape
    }

    fn coverage(&self, dx: f32, dy: f32, module_px: f32) -> f32 {
        let r = self.corner_radius(module_px);
        let inner = module_px / 2.0 - r;
        let qx = dx.abs() - inner;
        let qy = dy.abs() - inner;
        if qx <= 0.0 || qy <= 0.0 {
            return 1.0;
        }
        let d = (qx * qx + qy * qy).sqrt();
        if self.antialias {
            (r + 0.5 - d).clamp(0.0, 1.0)
        } else if d <= r {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_is_clamped() {
        let glyph = RoundedGlyph {
            shape: ModuleShape::Rounded,
            radius_fraction: 0.9,
            antialias: false,
        };
        assert!((glyph.corner_radius(10.0) - 3.0).abs() < 1e-5);
        assert_eq!(RoundedGlyph::rounded().corner_radius(20.0), 5.0);
    }

    #[test]
    fn test_corner_clipped_edges_kept() {
        let glyph = RoundedGlyph::rounded();
        // Corner pixel of a 12px module
        assert_eq!(glyph.coverage(5.5, 5.5, 12.0), 0.0);
        // Edge midpoint
        assert_eq!(glyph.coverage(5.5, 0.5, 12.0), 1.0);
    }

    #[test]
    fn test_classy_falloff_is_partial() {
        let glyph = RoundedGlyph::classy();
        // r = 3.6, inner = 2.4; pick a point at distance r from the arc centre
        let offset = 2.4 + 3.6 / std::f32::consts::SQRT_2;
        let cov = glyph.coverage(offset, offset, 12.0);
        assert!(cov > 0.0 && cov < 1.0, "coverage {cov}");
        assert_eq!(glyph.coverage(5.9, 5.9, 12.0), 0.0);
    }
}
