//! Error taxonomy for the styling pipeline
//!
//! Hard failures (`Encoding`, `Geometry`, `UnsupportedStyle`) abort a render.
//! `LogoDecode` and `GradientSpec` are soft: the pipeline logs them and keeps
//! the best output it already has.

use thiserror::Error;

/// Errors produced while encoding, styling or composing a QR image
#[derive(Error, Debug)]
pub enum StyleError {
    /// Payload rejected by the encoder (empty, or over capacity)
    #[error("QR encoding failed: {0}")]
    Encoding(String),

    /// Module grid could not be derived from the bitmap
    #[error("invalid module grid: {0}")]
    Geometry(String),

    /// Unknown glyph or eye shape
    #[error("unsupported style: {0}")]
    UnsupportedStyle(String),

    /// Logo bytes could not be decoded
    #[error("logo decode failed: {0}")]
    LogoDecode(String),

    /// Gradient with fewer than two colours
    #[error("gradient needs at least 2 colours, got {0}")]
    GradientSpec(usize),

    /// Payload builder input rejected
    #[error("invalid payload: {0}")]
    Payload(String),

    /// Raster encode/decode failure outside the logo path
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl StyleError {
    /// Whether the pipeline degrades instead of failing on this error
    pub fn is_soft(&self) -> bool {
        matches!(self, StyleError::LogoDecode(_) | StyleError::GradientSpec(_))
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, StyleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_classification() {
        assert!(StyleError::LogoDecode("bad".into()).is_soft());
        assert!(StyleError::GradientSpec(1).is_soft());
        assert!(!StyleError::Geometry("x".into()).is_soft());
        assert!(!StyleError::Encoding("x".into()).is_soft());
        assert!(!StyleError::UnsupportedStyle("x".into()).is_soft());
    }

    #[test]
    fn test_messages() {
        let err = StyleError::GradientSpec(1);
        assert_eq!(err.to_string(), "gradient needs at least 2 colours, got 1");
    }
}
