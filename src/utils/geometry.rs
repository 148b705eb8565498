/// Pixel-space rectangles and rounded-rectangle containment
use crate::models::Point;

/// Axis-aligned rectangle in pixel coordinates (half-open on the far edges)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl PixelRect {
    /// Create a new rectangle
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of `side` centred on `center`, clipped to `bounds_w` x `bounds_h`
    pub fn centered_square(center: Point, side: u32, bounds_w: u32, bounds_h: u32) -> Self {
        let half = side as f32 / 2.0;
        let x0 = (center.x - half).round().max(0.0) as u32;
        let y0 = (center.y - half).round().max(0.0) as u32;
        let x1 = ((center.x - half).round() as i64 + side as i64).clamp(0, bounds_w as i64) as u32;
        let y1 = ((center.y - half).round() as i64 + side as i64).clamp(0, bounds_h as i64) as u32;
        Self::new(
            x0.min(bounds_w),
            y0.min(bounds_h),
            x1.saturating_sub(x0),
            y1.saturating_sub(y0),
        )
    }

    /// One past the right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Geometric centre
    pub fn center(&self) -> Point {
        Point::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Whether the pixel lies inside
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Overlap with `other`; the empty default when they do not meet
    pub fn intersect(&self, other: &PixelRect) -> Self {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return Self::default();
        }
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Rectangle shrunk by `by` pixels on every side
    pub fn inset(&self, by: u32) -> Self {
        let by = by.min(self.width / 2).min(self.height / 2);
        Self::new(
            self.x + by,
            self.y + by,
            self.width - 2 * by,
            self.height - 2 * by,
        )
    }

    /// Whether the pixel centre falls inside this rectangle with corners
    /// rounded to `radius`
    pub fn rounded_contains(&self, px: u32, py: u32, radius: f32) -> bool {
        if !self.contains(px, py) {
            return false;
        }
        let r = radius
            .min(self.width as f32 / 2.0)
            .min(self.height as f32 / 2.0)
            .max(0.0);
        if r == 0.0 {
            return true;
        }
        let c = self.center();
        let dx = (px as f32 + 0.5 - c.x).abs();
        let dy = (py as f32 + 0.5 - c.y).abs();
        let qx = dx - (self.width as f32 / 2.0 - r);
        let qy = dy - (self.height as f32 / 2.0 - r);
        if qx <= 0.0 || qy <= 0.0 {
            return true;
        }
        qx * qx + qy * qy <= r * r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let rect = PixelRect::new(2, 2, 3, 3);
        assert!(rect.contains(2, 2));
        assert!(rect.contains(4, 4));
        assert!(!rect.contains(5, 4));
        assert!(!rect.contains(1, 3));
    }

    #[test]
    fn test_rounded_corners_excluded() {
        let rect = PixelRect::new(0, 0, 20, 20);
        assert!(rect.rounded_contains(10, 10, 6.0));
        assert!(rect.rounded_contains(10, 0, 6.0));
        assert!(!rect.rounded_contains(0, 0, 6.0));
        assert!(rect.rounded_contains(0, 0, 0.0));
    }

    #[test]
    fn test_centered_square_clips() {
        let rect = PixelRect::centered_square(Point::new(5.0, 5.0), 20, 100, 100);
        assert_eq!(rect, PixelRect::new(0, 0, 15, 15));

        let inner = PixelRect::centered_square(Point::new(50.0, 50.0), 20, 100, 100);
        assert_eq!(inner, PixelRect::new(40, 40, 20, 20));
    }

    #[test]
    fn test_inset() {
        let rect = PixelRect::new(10, 10, 10, 8).inset(2);
        assert_eq!(rect, PixelRect::new(12, 12, 6, 4));
    }

    #[test]
    fn test_intersect() {
        let a = PixelRect::new(0, 0, 10, 10);
        assert_eq!(a.intersect(&PixelRect::new(5, 8, 10, 10)), PixelRect::new(5, 8, 5, 2));
        assert_eq!(a.intersect(&PixelRect::new(20, 20, 5, 5)), PixelRect::default());
    }
}
