use rayon::prelude::*;

use super::{GlyphContext, GlyphRegistry, PixelBand};
use crate::config;
use crate::error::{Result, StyleError};
use crate::layout::ProtectedZoneSet;
use crate::models::{ModuleShape, RenderedQrImage};
use crate::utils::binarization::DarkClassifier;

/// Rewrites every dark data module of a QR raster with a glyph
pub struct ShapeRenderer {
    registry: GlyphRegistry,
}

impl ShapeRenderer {
    /// Renderer drawing with the glyphs in `registry`
    pub fn new(registry: GlyphRegistry) -> Self {
        Self { registry }
    }

    /// Glyphs available to this renderer
    pub fn registry(&self) -> &GlyphRegistry {
        &self.registry
    }

    /// Restyle `image` in place and return how many modules were redrawn.
    ///
    /// Each module row is an independent band of pixel rows; bands are
    /// painted in parallel once the grid is large enough. A module is dark
    /// when its centre pixel is nearer the image's dark colour than its light
    /// one; light modules and protected modules are never written.
    pub fn render(
        &self,
        image: &mut RenderedQrImage,
        zones: &ProtectedZoneSet,
        shape: ModuleShape,
    ) -> Result<usize> {
        let glyph = self.registry.get(shape)?;
        let grid = *zones.grid();

        let width = image.pixels.width();
        let needed_rows = grid.origin_y + grid.side_px();
        if width != grid.side_px() || image.pixels.height() < needed_rows {
            return Err(StyleError::Geometry(format!(
                "{}x{} image does not match a {}px module grid",
                width,
                image.pixels.height(),
                grid.side_px()
            )));
        }

        let ctx = GlyphContext {
            dark: image.dark,
            light: image.light,
            zones,
        };
        let classifier = DarkClassifier::palette(image.dark, image.light);
        let m = grid.module_px;
        let row_bytes = width as usize * 4;
        let band_bytes = row_bytes * m as usize;
        let top = (grid.origin_y + grid.quiet_zone_px) as usize * row_bytes;
        let raw: &mut [u8] = &mut image.pixels;
        let grid_bytes = &mut raw[top..top + band_bytes * grid.module_count];

        let paint_row = |(my, chunk): (usize, &mut [u8])| -> usize {
            let y0 = grid.origin_y + grid.quiet_zone_px + my as u32 * m;
            let mut band = PixelBand::new(chunk, width, y0);
            let mut styled = 0;
            for mx in 0..grid.module_count {
                if zones.is_protected_module(mx, my) {
                    continue;
                }
                let rect = grid.module_rect(mx, my);
                let sample = band.get(rect.x + m / 2, rect.y + m / 2);
                if !classifier.is_dark(&sample) {
                    continue;
                }
                glyph.paint_module(&mut band, rect, &ctx);
                styled += 1;
            }
            styled
        };

        let total_modules = grid.module_count * grid.module_count;
        let styled: usize = if total_modules >= config::parallel_min_modules() {
            grid_bytes
                .par_chunks_mut(band_bytes)
                .enumerate()
                .map(&paint_row)
                .sum()
        } else {
            grid_bytes
                .chunks_mut(band_bytes)
                .enumerate()
                .map(&paint_row)
                .sum()
        };

        log::debug!(
            "styled {} of {} data modules as '{}'",
            styled,
            zones.data_modules_count(),
            shape
        );
        Ok(styled)
    }
}

impl Default for ShapeRenderer {
    fn default() -> Self {
        Self::new(GlyphRegistry::with_builtin())
    }
}
