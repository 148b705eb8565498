//! Utility functions for raster processing
//!
//! This module provides helpers shared by every styling stage:
//! - Grayscale conversion (RGBA to luminance)
//! - Binarization (dark/light masks)
//! - Geometry (pixel rectangles, rounded corners)
//! - Colour parsing and mixing

pub mod binarization;
pub mod color;
pub mod geometry;
pub mod grayscale;
