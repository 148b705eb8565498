use image::{Rgba, RgbaImage};
use std::str::FromStr;

use crate::error::StyleError;

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    #[default]
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// Approximate share of codewords that can be lost and still decode
    pub fn recovery_percent(&self) -> u32 {
        match self {
            ECLevel::L => 7,
            ECLevel::M => 15,
            ECLevel::Q => 25,
            ECLevel::H => 30,
        }
    }

    pub(crate) fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl FromStr for ECLevel {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(ECLevel::L),
            "M" => Ok(ECLevel::M),
            "Q" => Ok(ECLevel::Q),
            "H" => Ok(ECLevel::H),
            other => Err(StyleError::UnsupportedStyle(format!(
                "error correction level '{other}'"
            ))),
        }
    }
}

/// An RGBA raster of a QR symbol together with its module geometry.
///
/// The QR area starts `caption_px` rows from the top (non-zero only after a
/// caption frame was added) and satisfies
/// `side == module_count * module_px + 2 * quiet_zone_px`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQrImage {
    /// Pixel buffer
    pub pixels: RgbaImage,
    /// Modules per side as reported by the encoder
    pub module_count: usize,
    /// Margin around the module grid, in pixels
    pub quiet_zone_px: u32,
    /// Side of one module, in pixels
    pub module_px: u32,
    /// QR version (1-40)
    pub version: u8,
    /// Foreground colour used to rasterise dark modules
    pub dark: Rgba<u8>,
    /// Background colour used for light modules and the quiet zone
    pub light: Rgba<u8>,
    /// Height of the caption band above the QR area
    pub caption_px: u32,
}

impl RenderedQrImage {
    /// Side length of the square QR area (modules plus quiet zone)
    pub fn qr_side(&self) -> u32 {
        self.module_count as u32 * self.module_px + 2 * self.quiet_zone_px
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw RGBA bytes
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

/// Version number from a module count (21 -> 1, 25 -> 2, ...)
pub fn version_for_module_count(module_count: usize) -> Option<u8> {
    if module_count < 21 || module_count > 177 || (module_count - 17) % 4 != 0 {
        return None;
    }
    Some(((module_count - 17) / 4) as u8)
}
