//! Post-glyph compositing stages
//!
//! Each stage works on the whole raster after module glyphs are drawn:
//! - Gradient recolouring of dark pixels
//! - Logo embedding on a rounded backing plate
//! - Caption frame above the code

/// Caption text rasterisation
pub mod font;
/// Caption band compositor
pub mod frame;
/// Linear and radial gradients
pub mod gradient;
/// Logo embedder
pub mod logo;

pub use frame::add_frame;
pub use gradient::apply_gradient;
pub use logo::{LogoLayout, embed_logo};
