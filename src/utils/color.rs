/// Colour parsing and mixing helpers
use image::Rgba;

use crate::error::{Result, StyleError};

/// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional)
pub fn parse_hex_color(hex: &str) -> Result<Rgba<u8>> {
    let hex = hex.trim().trim_start_matches('#');
    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return Err(StyleError::UnsupportedStyle(format!("colour '#{hex}'")));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| StyleError::UnsupportedStyle(format!("colour '#{hex}'")))
    };
    let a = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, a]))
}

/// Linear interpolation between two colours, `t` in 0..=1
pub fn lerp(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgba([
        mix(a[0], b[0]),
        mix(a[1], b[1]),
        mix(a[2], b[2]),
        mix(a[3], b[3]),
    ])
}

/// Source-over compositing of `src` onto an opaque-or-not `dst`
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        255 => src,
        0 => dst,
        alpha => {
            let a = alpha as f32 / 255.0;
            let out_a = a + dst[3] as f32 / 255.0 * (1.0 - a);
            if out_a <= 0.0 {
                return Rgba([0, 0, 0, 0]);
            }
            let channel = |s: u8, d: u8| {
                let s = s as f32 * a;
                let d = d as f32 * (dst[3] as f32 / 255.0) * (1.0 - a);
                ((s + d) / out_a).round().clamp(0.0, 255.0) as u8
            };
            Rgba([
                channel(src[0], dst[0]),
                channel(src[1], dst[1]),
                channel(src[2], dst[2]),
                (out_a * 255.0).round() as u8,
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000").unwrap(), Rgba([255, 128, 0, 255]));
        assert_eq!(parse_hex_color("00000080").unwrap(), Rgba([0, 0, 0, 128]));
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgba([0, 0, 0, 255]);
        let b = Rgba([200, 100, 50, 255]);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Rgba([100, 50, 25, 255]));
    }

    #[test]
    fn test_blend_over() {
        let white = Rgba([255, 255, 255, 255]);
        assert_eq!(blend_over(white, Rgba([0, 0, 0, 255])), Rgba([0, 0, 0, 255]));
        assert_eq!(blend_over(white, Rgba([0, 0, 0, 0])), white);
        let half = blend_over(white, Rgba([0, 0, 0, 128]));
        assert_eq!(half[3], 255);
        assert!(half[0] > 120 && half[0] < 135);
    }
}
