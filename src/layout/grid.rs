/// Module grid geometry derived from a rendered bitmap and the encoder's module count
use crate::error::{Result, StyleError};
use crate::models::version_for_module_count;
use crate::utils::geometry::PixelRect;

/// Glyph math needs at least this many pixels per module
pub const MIN_MODULE_PX: u32 = 3;

/// Pixel geometry of the module grid inside a QR raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleGrid {
    /// Modules per side
    pub module_count: usize,
    /// Pixels per module side
    pub module_px: u32,
    /// Quiet zone margin in pixels
    pub quiet_zone_px: u32,
    /// First pixel row of the QR area (non-zero below a caption band)
    pub origin_y: u32,
}

impl ModuleGrid {
    /// Derive the module size of a `width` x `height` QR area.
    ///
    /// `module_count` must be the count reported by the encoder; it is never
    /// inferred from the pixel size. Fails when the area is not square, when
    /// the modules do not divide the area into whole pixels, or when a module
    /// is smaller than [`MIN_MODULE_PX`].
    pub fn locate(width: u32, height: u32, module_count: usize, quiet_zone_px: u32) -> Result<Self> {
        if version_for_module_count(module_count).is_none() {
            return Err(StyleError::Geometry(format!(
                "{module_count} modules per side is not a valid QR size"
            )));
        }
        if width != height {
            return Err(StyleError::Geometry(format!(
                "QR area must be square, got {width}x{height}"
            )));
        }
        let margins = 2 * quiet_zone_px as u64;
        if margins >= width as u64 {
            return Err(StyleError::Geometry(format!(
                "quiet zone of {quiet_zone_px}px leaves no room in a {width}px image"
            )));
        }

        let inner = width - 2 * quiet_zone_px;
        let module_px = inner / module_count as u32;
        let drift = inner % module_count as u32;
        if drift != 0 {
            return Err(StyleError::Geometry(format!(
                "{inner}px does not split into {module_count} whole modules ({:.2}px each)",
                inner as f32 / module_count as f32
            )));
        }
        if module_px < MIN_MODULE_PX {
            return Err(StyleError::Geometry(format!(
                "module size {module_px}px is below the {MIN_MODULE_PX}px minimum"
            )));
        }

        Ok(Self {
            module_count,
            module_px,
            quiet_zone_px,
            origin_y: 0,
        })
    }

    /// Same grid shifted down by `origin_y` pixels
    pub fn with_origin_y(mut self, origin_y: u32) -> Self {
        self.origin_y = origin_y;
        self
    }

    /// Side of the QR area including the quiet zone
    pub fn side_px(&self) -> u32 {
        self.module_count as u32 * self.module_px + 2 * self.quiet_zone_px
    }

    /// Pixel footprint of the QR area, quiet zone included, below any caption
    pub fn area(&self) -> PixelRect {
        PixelRect::new(0, self.origin_y, self.side_px(), self.side_px())
    }

    /// QR version implied by the module count
    pub fn version(&self) -> u8 {
        version_for_module_count(self.module_count).unwrap_or(1)
    }

    /// Pixel footprint of module (mx, my)
    pub fn module_rect(&self, mx: usize, my: usize) -> PixelRect {
        PixelRect::new(
            self.quiet_zone_px + mx as u32 * self.module_px,
            self.origin_y + self.quiet_zone_px + my as u32 * self.module_px,
            self.module_px,
            self.module_px,
        )
    }

    /// Pixel footprint of a block of modules, half-open in module units
    pub fn modules_rect(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> PixelRect {
        let origin = self.module_rect(x0, y0);
        PixelRect::new(
            origin.x,
            origin.y,
            (x1 - x0) as u32 * self.module_px,
            (y1 - y0) as u32 * self.module_px,
        )
    }

    /// Module containing pixel (px, py), or `None` in the quiet zone / caption
    pub fn module_at(&self, px: u32, py: u32) -> Option<(usize, usize)> {
        let top = self.origin_y + self.quiet_zone_px;
        if px < self.quiet_zone_px || py < top {
            return None;
        }
        let mx = ((px - self.quiet_zone_px) / self.module_px) as usize;
        let my = ((py - top) / self.module_px) as usize;
        if mx >= self.module_count || my >= self.module_count {
            return None;
        }
        Some((mx, my))
    }
}
