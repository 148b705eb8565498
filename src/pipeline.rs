use image::Rgba;
use std::time::Instant;

use crate::compose::{add_frame, apply_gradient, embed_logo};
use crate::config;
use crate::encoder::{EncodeOptions, encode_with};
use crate::error::{Result, StyleError};
use crate::glyphs::{GlyphRegistry, ShapeRenderer};
use crate::layout::{ModuleGrid, ProtectedZoneSet};
use crate::models::{ECLevel, RenderedQrImage, StyleRequest};

/// Encoder settings and capability flags for a [`Renderer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Error correction level; use `H` when embedding a logo
    pub ec_level: ECLevel,
    /// Pixels per module
    pub module_px: u32,
    /// Quiet zone in modules
    pub margin_modules: u32,
    /// Dark module colour
    pub dark: Rgba<u8>,
    /// Light module colour
    pub light: Rgba<u8>,
    /// Apply `StyleRequest::gradient`
    pub enable_gradient: bool,
    /// Apply `StyleRequest::logo`
    pub enable_logo: bool,
    /// Apply `StyleRequest::frame`
    pub enable_frame: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ec_level: ECLevel::M,
            module_px: 10,
            margin_modules: 4,
            dark: Rgba([0, 0, 0, 255]),
            light: Rgba([255, 255, 255, 255]),
            enable_gradient: true,
            enable_logo: true,
            enable_frame: true,
        }
    }
}

impl RenderOptions {
    /// Glyphs and the base encode only; gradient, logo and frame are ignored
    pub fn base() -> Self {
        Self {
            enable_gradient: false,
            enable_logo: false,
            enable_frame: false,
            ..Self::default()
        }
    }

    fn encode_options(&self, style: &StyleRequest) -> EncodeOptions {
        EncodeOptions {
            ec_level: self.ec_level,
            dark: self.dark,
            light: self.light,
            module_px: self.module_px,
            margin_modules: self.margin_modules,
            eye_shape: style.eye_shape,
        }
    }
}

/// Stage-level counters collected during one render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderTelemetry {
    /// Dark data modules redrawn by the glyph stage
    pub styled_modules: usize,
    /// Pixels recoloured by the gradient stage
    pub gradient_pixels: usize,
    /// Whether a logo was embedded
    pub logo_applied: bool,
    /// Whether a caption band was added
    pub frame_applied: bool,
    /// Soft failures that were skipped, as display strings
    pub skipped: Vec<String>,
}

/// Encode-and-style pipeline.
///
/// Stages run in a fixed order: encode, glyphs, gradient, logo, frame.
/// Unsupported shapes are rejected before anything is encoded; logo and
/// gradient problems are logged and the stage is skipped.
pub struct Renderer {
    options: RenderOptions,
    shapes: ShapeRenderer,
}

impl Renderer {
    /// Renderer with the built-in glyphs
    pub fn new(options: RenderOptions) -> Self {
        Self::with_registry(options, GlyphRegistry::with_builtin())
    }

    /// Renderer using a custom glyph registry
    pub fn with_registry(options: RenderOptions, registry: GlyphRegistry) -> Self {
        Self {
            options,
            shapes: ShapeRenderer::new(registry),
        }
    }

    /// Current options
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Encode `text` and apply `style`
    pub fn render(&self, text: &str, style: &StyleRequest) -> Result<RenderedQrImage> {
        self.render_with_telemetry(text, style).map(|(image, _)| image)
    }

    /// Like [`Renderer::render`] but also returns per-stage counters
    pub fn render_with_telemetry(
        &self,
        text: &str,
        style: &StyleRequest,
    ) -> Result<(RenderedQrImage, RenderTelemetry)> {
        self.shapes.registry().get(style.shape)?;

        let start = Instant::now();
        let base = encode_with(text, &self.options.encode_options(style))?;
        if cfg!(debug_assertions) && config::debug_enabled() {
            eprintln!(
                "DEBUG: encode {:?} (v{}, {}px)",
                start.elapsed(),
                base.version,
                base.width()
            );
        }
        self.style_image(base, style)
    }

    /// Apply `style` to an already encoded image.
    ///
    /// The eye shape is fixed at encode time and is not changed here.
    pub fn style_image(
        &self,
        mut image: RenderedQrImage,
        style: &StyleRequest,
    ) -> Result<(RenderedQrImage, RenderTelemetry)> {
        let glyph_start = Instant::now();
        let qr_height = image.height().saturating_sub(image.caption_px);
        let grid = ModuleGrid::locate(
            image.width(),
            qr_height,
            image.module_count,
            image.quiet_zone_px,
        )?
        .with_origin_y(image.caption_px);
        let zones = ProtectedZoneSet::new(grid);

        let mut telemetry = RenderTelemetry {
            styled_modules: self.shapes.render(&mut image, &zones, style.shape)?,
            ..RenderTelemetry::default()
        };
        let glyph_time = glyph_start.elapsed();

        let compose_start = Instant::now();
        if let Some(gradient) = style.gradient.as_ref().filter(|_| self.options.enable_gradient) {
            match apply_gradient(&mut image, &zones, gradient) {
                Ok(painted) => telemetry.gradient_pixels = painted,
                Err(e) => skip_soft(e, &mut telemetry)?,
            }
        }

        if let Some(logo) = style.logo.as_ref().filter(|_| self.options.enable_logo) {
            match embed_logo(&mut image, &zones, logo) {
                Ok(_) => telemetry.logo_applied = true,
                Err(e) => skip_soft(e, &mut telemetry)?,
            }
        }

        if let Some(frame) = style.frame.as_ref().filter(|_| self.options.enable_frame) {
            image = add_frame(image, frame);
            telemetry.frame_applied = true;
        }

        if cfg!(debug_assertions) && config::debug_enabled() {
            eprintln!(
                "DEBUG: glyphs {:?}, compose {:?}, {:?}",
                glyph_time,
                compose_start.elapsed(),
                telemetry
            );
        }
        log::debug!(
            "rendered '{}' {}x{} ({} modules styled, {} skipped stages)",
            style.shape,
            image.width(),
            image.height(),
            telemetry.styled_modules,
            telemetry.skipped.len()
        );
        Ok((image, telemetry))
    }

    /// Render each text independently with the same style
    pub fn render_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        style: &StyleRequest,
    ) -> Vec<Result<RenderedQrImage>> {
        texts
            .iter()
            .map(|text| self.render(text.as_ref(), style))
            .collect()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

fn skip_soft(err: StyleError, telemetry: &mut RenderTelemetry) -> Result<()> {
    if !err.is_soft() {
        return Err(err);
    }
    log::warn!("{}; stage skipped", err);
    telemetry.skipped.push(err.to_string());
    Ok(())
}
