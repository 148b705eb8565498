//! Adapter over the external QR symbol encoder
//!
//! Turning text into a module matrix (mode selection, error correction,
//! masking) is delegated to the `qrcode` crate. This module only rasterises
//! the resulting matrix into a [`RenderedQrImage`] and reports the true
//! module count so later stages never guess it from the pixel size.

/// Finder pattern ("eye") rasterisation
pub mod eyes;

use image::{Rgba, RgbaImage};
use qrcode::{Color, QrCode};

use crate::error::{Result, StyleError};
use crate::models::{ECLevel, EyeShape, RenderedQrImage, version_for_module_count};

/// Rasterisation parameters for the encoder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeOptions {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Dark module colour
    pub dark: Rgba<u8>,
    /// Light module / quiet zone colour
    pub light: Rgba<u8>,
    /// Pixels per module
    pub module_px: u32,
    /// Quiet zone in modules
    pub margin_modules: u32,
    /// Finder pattern shape
    pub eye_shape: EyeShape,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ec_level: ECLevel::M,
            dark: Rgba([0, 0, 0, 255]),
            light: Rgba([255, 255, 255, 255]),
            module_px: 10,
            margin_modules: 4,
            eye_shape: EyeShape::Square,
        }
    }
}

/// Encode `text` and rasterise it with square eyes
pub fn encode(
    text: &str,
    ec_level: ECLevel,
    dark: Rgba<u8>,
    light: Rgba<u8>,
    module_px: u32,
    margin_modules: u32,
) -> Result<RenderedQrImage> {
    encode_with(
        text,
        &EncodeOptions {
            ec_level,
            dark,
            light,
            module_px,
            margin_modules,
            eye_shape: EyeShape::Square,
        },
    )
}

/// Encode `text` and rasterise it with the given options
pub fn encode_with(text: &str, options: &EncodeOptions) -> Result<RenderedQrImage> {
    if text.is_empty() {
        return Err(StyleError::Encoding("payload is empty".into()));
    }
    if options.module_px == 0 {
        return Err(StyleError::Geometry("module size must be at least 1px".into()));
    }

    let code = QrCode::with_error_correction_level(text.as_bytes(), options.ec_level.to_qrcode())
        .map_err(|e| StyleError::Encoding(format!("{} ({} bytes)", e, text.len())))?;

    let module_count = code.width();
    let version = version_for_module_count(module_count).ok_or_else(|| {
        StyleError::Encoding(format!("encoder produced a {module_count}-module symbol"))
    })?;
    let modules: Vec<bool> = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();

    let quiet_zone_px = options.margin_modules * options.module_px;
    let pixels = rasterize(&modules, module_count, quiet_zone_px, options);

    log::debug!(
        "encoded {} bytes as version {} ({}x{} modules, {}px)",
        text.len(),
        version,
        module_count,
        module_count,
        pixels.width()
    );

    Ok(RenderedQrImage {
        pixels,
        module_count,
        quiet_zone_px,
        module_px: options.module_px,
        version,
        dark: options.dark,
        light: options.light,
        caption_px: 0,
    })
}

fn rasterize(
    modules: &[bool],
    module_count: usize,
    quiet_zone_px: u32,
    options: &EncodeOptions,
) -> RgbaImage {
    let m = options.module_px;
    let side = module_count as u32 * m + 2 * quiet_zone_px;
    let mut img = RgbaImage::from_pixel(side, side, options.light);

    for (idx, _) in modules.iter().enumerate().filter(|(_, dark)| **dark) {
        let x0 = quiet_zone_px + (idx % module_count) as u32 * m;
        let y0 = quiet_zone_px + (idx / module_count) as u32 * m;
        for y in y0..y0 + m {
            for x in x0..x0 + m {
                img.put_pixel(x, y, options.dark);
            }
        }
    }

    if options.eye_shape != EyeShape::Square {
        eyes::draw_eyes(&mut img, module_count, quiet_zone_px, options);
    }

    img
}
