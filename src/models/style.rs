use image::Rgba;
use std::fmt;
use std::str::FromStr;

use super::Point;
use crate::error::StyleError;

/// Glyph drawn in place of each dark data module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleShape {
    /// Plain square (no-op)
    #[default]
    Square,
    /// Square with hard-clipped quarter-circle corners
    Rounded,
    /// Rounded corners with an antialiased falloff
    Classy,
    /// Centred disc
    Dots,
    /// Centred disc (alias kept for parity with the dots style)
    Circle,
    /// L1 ball
    Diamond,
    /// Five-point star
    Star,
    /// Implicit heart curve
    Heart,
    /// Horizontal ellipse
    Leaf,
    /// Radius-modulated blob
    Fluid,
}

impl ModuleShape {
    /// Every supported shape, in declaration order
    pub const ALL: [ModuleShape; 10] = [
        ModuleShape::Square,
        ModuleShape::Rounded,
        ModuleShape::Classy,
        ModuleShape::Dots,
        ModuleShape::Circle,
        ModuleShape::Diamond,
        ModuleShape::Star,
        ModuleShape::Heart,
        ModuleShape::Leaf,
        ModuleShape::Fluid,
    ];

    /// Lowercase name as accepted by `from_str`
    pub fn name(&self) -> &'static str {
        match self {
            ModuleShape::Square => "square",
            ModuleShape::Rounded => "rounded",
            ModuleShape::Classy => "classy",
            ModuleShape::Dots => "dots",
            ModuleShape::Circle => "circle",
            ModuleShape::Diamond => "diamond",
            ModuleShape::Star => "star",
            ModuleShape::Heart => "heart",
            ModuleShape::Leaf => "leaf",
            ModuleShape::Fluid => "fluid",
        }
    }
}

impl fmt::Display for ModuleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModuleShape {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ModuleShape::ALL
            .into_iter()
            .find(|shape| shape.name() == wanted)
            .ok_or_else(|| StyleError::UnsupportedStyle(format!("module shape '{}'", s.trim())))
    }
}

/// Shape of the three finder patterns ("eyes")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EyeShape {
    /// Standard square rings
    #[default]
    Square,
    /// Rings with rounded outer corners
    Rounded,
    /// Concentric circles
    Circle,
}

impl EyeShape {
    /// Lowercase name as accepted by `from_str`
    pub fn name(&self) -> &'static str {
        match self {
            EyeShape::Square => "square",
            EyeShape::Rounded => "rounded",
            EyeShape::Circle => "circle",
        }
    }
}

impl FromStr for EyeShape {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(EyeShape::Square),
            "rounded" => Ok(EyeShape::Rounded),
            "circle" => Ok(EyeShape::Circle),
            _ => Err(StyleError::UnsupportedStyle(format!("eye shape '{}'", s.trim()))),
        }
    }
}

/// Gradient geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientKind {
    /// Along a direction through the image centre
    #[default]
    Linear,
    /// From the image centre outwards
    Radial,
}

impl FromStr for GradientKind {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(GradientKind::Linear),
            "radial" => Ok(GradientKind::Radial),
            _ => Err(StyleError::UnsupportedStyle(format!("gradient kind '{}'", s.trim()))),
        }
    }
}

/// Gradient applied to dark pixels
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    /// Linear or radial
    pub kind: GradientKind,
    /// Ordered stops, evenly spaced; fewer than two makes the gradient a no-op
    pub colors: Vec<Rgba<u8>>,
    /// Direction for linear gradients, clockwise from left-to-right
    pub angle_degrees: f32,
}

impl GradientSpec {
    /// Linear gradient at the given angle
    pub fn linear(colors: Vec<Rgba<u8>>, angle_degrees: f32) -> Self {
        Self {
            kind: GradientKind::Linear,
            colors,
            angle_degrees,
        }
    }

    /// Radial gradient from the centre
    pub fn radial(colors: Vec<Rgba<u8>>) -> Self {
        Self {
            kind: GradientKind::Radial,
            colors,
            angle_degrees: 0.0,
        }
    }
}

/// Logo placed over the centre of the code
#[derive(Debug, Clone, PartialEq)]
pub struct LogoSpec {
    /// Encoded image bytes (PNG, JPEG, ...)
    pub bytes: Vec<u8>,
    /// Logo side as a percentage of the shorter image side, clamped to 5..=30
    pub size_percent: f32,
    /// Backing plate padding as a percentage of the logo side
    pub margin_percent: f32,
    /// Corner radius of the backing plate
    pub corner_radius_px: u32,
    /// Logo centre in pixels; image centre when `None`
    pub position: Option<Point>,
    /// Backing plate fill
    pub plate_color: Rgba<u8>,
    /// Backing plate border stroke
    pub border_color: Rgba<u8>,
    /// Border stroke width (1-2 px)
    pub border_px: u32,
}

impl LogoSpec {
    /// Smallest accepted logo size
    pub const MIN_SIZE_PERCENT: f32 = 5.0;
    /// Largest accepted logo size
    pub const MAX_SIZE_PERCENT: f32 = 30.0;

    /// Logo with default plate styling
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            size_percent: 20.0,
            margin_percent: 10.0,
            corner_radius_px: 8,
            position: None,
            plate_color: Rgba([255, 255, 255, 255]),
            border_color: Rgba([224, 224, 224, 255]),
            border_px: 2,
        }
    }

    /// `size_percent` clamped to the accepted range
    pub fn clamped_size_percent(&self) -> f32 {
        if self.size_percent.is_nan() {
            return Self::MIN_SIZE_PERCENT;
        }
        self.size_percent
            .clamp(Self::MIN_SIZE_PERCENT, Self::MAX_SIZE_PERCENT)
    }
}

/// Caption band added above the code
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSpec {
    /// Caption text
    pub text: String,
    /// Caption colour
    pub text_color: Rgba<u8>,
    /// Band fill
    pub background_color: Rgba<u8>,
    /// Band height; `None` uses the configured default
    pub caption_height: Option<u32>,
    /// TrueType/OpenType font bytes; built-in bitmap font when `None`
    pub font: Option<Vec<u8>>,
}

impl FrameSpec {
    /// Black-on-white caption using the default band height
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_color: Rgba([0, 0, 0, 255]),
            background_color: Rgba([255, 255, 255, 255]),
            caption_height: None,
            font: None,
        }
    }
}

/// Everything that styles one render call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleRequest {
    /// Data module glyph
    pub shape: ModuleShape,
    /// Finder pattern shape
    pub eye_shape: EyeShape,
    /// Optional gradient
    pub gradient: Option<GradientSpec>,
    /// Optional logo
    pub logo: Option<LogoSpec>,
    /// Optional caption frame
    pub frame: Option<FrameSpec>,
}

impl StyleRequest {
    /// Request with the given glyph and nothing else
    pub fn with_shape(shape: ModuleShape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }
}
