/// Bit matrix for dark/light masks
pub mod matrix;
/// 2D point
pub mod point;
/// Rendered raster and EC level
pub mod qr_image;
/// Style request types
pub mod style;

pub use matrix::BitMatrix;
pub use point::Point;
pub use qr_image::{ECLevel, RenderedQrImage, version_for_module_count};
pub use style::{
    EyeShape, FrameSpec, GradientKind, GradientSpec, LogoSpec, ModuleShape, StyleRequest,
};
