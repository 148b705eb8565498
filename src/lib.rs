//! qr_style - QR code styling and composition engine
//!
//! Encodes text into a QR symbol, then restyles the raster: decorative
//! module glyphs, finder eye shapes, gradients, a centred logo and a caption
//! frame. Finder, timing, alignment and version-info modules are never
//! restyled, so the code stays scannable.
//!
//! ```no_run
//! use qr_style::{ModuleShape, StyleRequest, render};
//!
//! let image = render("https://example.com", &StyleRequest::with_shape(ModuleShape::Dots))?;
//! let png = qr_style::tools::encode_png(&image)?;
//! # Ok::<(), qr_style::StyleError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Gradient, logo and frame compositing
pub mod compose;
pub(crate) mod config;
/// QR symbol encoding and base rasterisation
pub mod encoder;
/// Error taxonomy
pub mod error;
/// Module glyphs and the shape renderer
pub mod glyphs;
/// Module grid and protected zones
pub mod layout;
/// Core data structures (RenderedQrImage, StyleRequest, BitMatrix, Point, etc.)
pub mod models;
/// Payload string builders (Wi-Fi, vCard, mailto)
pub mod payload;
/// Encode-and-style pipeline
pub mod pipeline;
/// Advisory finder-corner check
pub mod plausibility;
/// File and PNG helpers for binaries and tests
pub mod tools;
/// Utility functions (grayscale, binarization, geometry, colour)
pub mod utils;

pub use error::{Result, StyleError};
pub use models::{
    ECLevel, EyeShape, FrameSpec, GradientKind, GradientSpec, LogoSpec, ModuleShape, Point,
    RenderedQrImage, StyleRequest,
};
pub use payload::{
    Contact, WifiSecurity, build_mailto_payload, build_vcard_payload, build_wifi_payload,
};
pub use pipeline::{RenderOptions, RenderTelemetry, Renderer};
pub use plausibility::{PlausibilityReport, assess, assess_rendered};

/// Encode `text` and apply `style` with default render options
///
/// # Errors
/// `Encoding` when the payload is empty or too long, `UnsupportedStyle` for
/// a shape without a glyph, `Geometry` when the module grid is unusable.
/// Logo and gradient problems do not fail the call.
pub fn render(text: &str, style: &StyleRequest) -> Result<RenderedQrImage> {
    Renderer::default().render(text, style)
}
