use super::grid::ModuleGrid;
use crate::models::BitMatrix;
use crate::utils::geometry::PixelRect;

/// Side of each corner exclusion zone: 7x7 finder, separator and format bits
pub const FINDER_ZONE_MODULES: usize = 9;

/// Which corner a finder zone sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderCorner {
    /// Top-left
    TopLeft,
    /// Top-right
    TopRight,
    /// Bottom-left
    BottomLeft,
}

/// One corner exclusion zone in module and pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinderZone {
    /// Corner the zone belongs to
    pub corner: FinderCorner,
    /// Half-open module bounds (x0, y0, x1, y1)
    pub modules: (usize, usize, usize, usize),
    /// Pixel footprint
    pub pixels: PixelRect,
}

/// Modules that styling must never touch.
///
/// Covers the three finder zones, the timing row and column, alignment
/// patterns (version 2+), version information (version 7+) and the dark
/// module. Built once per render and shared read-only by every stage.
pub struct ProtectedZoneSet {
    grid: ModuleGrid,
    mask: BitMatrix,
    finders: [FinderZone; 3],
}

impl ProtectedZoneSet {
    /// Build the protected modules of `grid` for its version
    pub fn new(grid: ModuleGrid) -> Self {
        let size = grid.module_count;
        let version = grid.version();
        let mut mask = BitMatrix::new(size, size);

        let zone = FINDER_ZONE_MODULES;
        let corners = [
            (FinderCorner::TopLeft, 0, 0),
            (FinderCorner::TopRight, size - zone, 0),
            (FinderCorner::BottomLeft, 0, size - zone),
        ];
        let finders = corners.map(|(corner, x0, y0)| {
            mask.fill_rect(x0, y0, x0 + zone, y0 + zone);
            FinderZone {
                corner,
                modules: (x0, y0, x0 + zone, y0 + zone),
                pixels: grid.modules_rect(x0, y0, x0 + zone, y0 + zone),
            }
        });

        // Timing patterns (row 6 and column 6)
        for i in 0..size {
            mask.set(6, i, true);
            mask.set(i, 6, true);
        }

        // Alignment patterns
        let align = alignment_pattern_positions(version);
        for &cx in &align {
            for &cy in &align {
                // Skip the three finder corners
                let in_tl = cx <= 8 && cy <= 8;
                let in_tr = cx >= size - 9 && cy <= 8;
                let in_bl = cx <= 8 && cy >= size - 9;
                if in_tl || in_tr || in_bl {
                    continue;
                }
                mask.fill_rect(cx - 2, cy - 2, cx + 3, cy + 3);
            }
        }

        // Version info (v7+)
        if version >= 7 {
            mask.fill_rect(size - 11, 0, size - 8, 6);
            mask.fill_rect(0, size - 11, 6, size - 8);
        }

        // Dark module
        mask.set(8, size - 8, true);

        Self {
            grid,
            mask,
            finders,
        }
    }

    /// Grid this set was built for
    pub fn grid(&self) -> &ModuleGrid {
        &self.grid
    }

    /// The three corner zones
    pub fn finder_zones(&self) -> &[FinderZone; 3] {
        &self.finders
    }

    /// Whether module (mx, my) is a function module
    pub fn is_protected_module(&self, mx: usize, my: usize) -> bool {
        self.mask.get(mx, my)
    }

    /// Whether pixel (px, py) belongs to a function module.
    /// Quiet-zone and caption pixels are not protected.
    pub fn is_protected(&self, px: u32, py: u32) -> bool {
        self.grid
            .module_at(px, py)
            .is_some_and(|(mx, my)| self.mask.get(mx, my))
    }

    /// Whether pixel (px, py) lies in one of the three finder zones
    pub fn in_finder_zone(&self, px: u32, py: u32) -> bool {
        self.finders.iter().any(|zone| zone.pixels.contains(px, py))
    }

    /// Number of modules left for glyph styling
    pub fn data_modules_count(&self) -> usize {
        let size = self.grid.module_count;
        size * size - self.mask.count_ones()
    }
}

/// Alignment pattern centres for a given version.
pub fn alignment_pattern_positions(version: u8) -> Vec<usize> {
    if version <= 1 {
        return Vec::new();
    }
    let num_align = (version as usize / 7) + 2;
    let size = 17 + 4 * version as usize;
    let step = (version as usize * 8 + num_align * 3 + 5) / (num_align * 4 - 4) * 2;

    let mut positions = vec![0usize; num_align];
    positions[0] = 6;
    let mut pos = size - 7;
    for i in (1..num_align).rev() {
        positions[i] = pos;
        pos = pos.saturating_sub(step);
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones_for(module_count: usize) -> ProtectedZoneSet {
        let px = 4u32;
        let quiet = 8u32;
        let side = module_count as u32 * px + 2 * quiet;
        let grid = ModuleGrid::locate(side, side, module_count, quiet).unwrap();
        ProtectedZoneSet::new(grid)
    }

    #[test]
    fn test_alignment_positions() {
        assert!(alignment_pattern_positions(1).is_empty());
        assert_eq!(alignment_pattern_positions(2), vec![6, 18]);
        assert_eq!(alignment_pattern_positions(7), vec![6, 22, 38]);
        assert_eq!(alignment_pattern_positions(14), vec![6, 26, 46, 66]);
        assert_eq!(alignment_pattern_positions(32), vec![6, 34, 60, 86, 112, 138]);
        assert_eq!(alignment_pattern_positions(40), vec![6, 30, 58, 86, 114, 142, 170]);
    }

    #[test]
    fn test_finder_zones_version_one() {
        let zones = zones_for(21);
        for (x, y) in [(0, 0), (8, 8), (12, 0), (20, 8), (0, 12), (8, 20)] {
            assert!(zones.is_protected_module(x, y), "({x},{y}) should be protected");
        }
        // Timing
        assert!(zones.is_protected_module(10, 6));
        assert!(zones.is_protected_module(6, 10));
        // Data modules
        assert!(!zones.is_protected_module(10, 10));
        assert!(!zones.is_protected_module(20, 20));
        assert!(!zones.is_protected_module(9, 0));
    }

    #[test]
    fn test_alignment_pattern_protected_in_version_two() {
        let zones = zones_for(25);
        // Alignment centre at (18, 18), 5x5
        for y in 16..21 {
            for x in 16..21 {
                assert!(zones.is_protected_module(x, y));
            }
        }
        assert!(!zones.is_protected_module(15, 18));
    }

    #[test]
    fn test_version_info_protected() {
        let zones = zones_for(45);
        assert!(zones.is_protected_module(34, 0));
        assert!(zones.is_protected_module(36, 5));
        assert!(zones.is_protected_module(0, 34));
        assert!(!zones.is_protected_module(33, 0));
    }

    #[test]
    fn test_pixel_queries() {
        let zones = zones_for(21);
        // Quiet zone is not protected
        assert!(!zones.is_protected(0, 0));
        assert!(!zones.in_finder_zone(0, 0));
        // First module of the top-left finder
        assert!(zones.is_protected(8, 8));
        assert!(zones.in_finder_zone(8, 8));
        // Module (10, 10) is data
        assert!(!zones.is_protected(8 + 40, 8 + 40));
        assert!(!zones.in_finder_zone(8 + 40, 8 + 40));
        // Timing is protected but outside finder zones
        assert!(zones.is_protected(8 + 40, 8 + 24));
        assert!(!zones.in_finder_zone(8 + 40, 8 + 24));
    }

    #[test]
    fn test_data_module_count_version_one() {
        let zones = zones_for(21);
        // 3 * 81 finder zones, 2 * 3 timing cells outside them, dark module inside
        assert_eq!(zones.data_modules_count(), 21 * 21 - 3 * 81 - 6);
    }
}
