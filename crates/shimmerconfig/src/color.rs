use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a `0xAARRGGBB` word.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Replaces the alpha channel with `alpha` clamped to `[0, 1]`.
    ///
    /// The scaled value is truncated, so `0.3` maps to `76`.
    pub fn with_alpha_f32(self, alpha: f32) -> Self {
        let clamped = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        self.with_alpha((clamped * 255.0) as u8)
    }

    /// Keeps this color's alpha and takes the RGB channels from `other`.
    pub const fn with_rgb_of(self, other: Rgba) -> Self {
        Self {
            r: other.r,
            g: other.g,
            b: other.b,
            a: self.a,
        }
    }

    pub fn alpha_f32(self) -> f32 {
        self.a as f32 / 255.0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_argb())
    }
}

impl FromStr for Rgba {
    type Err = ConfigError;

    /// Accepts `#RRGGBB` (opaque) or `#AARRGGBB`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || ConfigError::InvalidArgument(format!("invalid color '{trimmed}'"));
        if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        match hex.len() {
            6 => Ok(Rgba::from_argb(0xFF00_0000 | value)),
            8 => Ok(Rgba::from_argb(value)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_words_unpack_in_channel_order() {
        let color = Rgba::from_argb(0x4CFF_8000);
        assert_eq!(color, Rgba::new(0xFF, 0x80, 0x00, 0x4C));
        assert_eq!(color.to_argb(), 0x4CFF_8000);
    }

    #[test]
    fn float_alpha_is_clamped_and_truncated() {
        assert_eq!(Rgba::WHITE.with_alpha_f32(0.3).a, 76);
        assert_eq!(Rgba::WHITE.with_alpha_f32(2.0).a, 255);
        assert_eq!(Rgba::WHITE.with_alpha_f32(-1.0).a, 0);
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!("#336699".parse::<Rgba>().unwrap(), Rgba::new(0x33, 0x66, 0x99, 0xFF));
        assert_eq!("80FFFFFF".parse::<Rgba>().unwrap(), Rgba::WHITE.with_alpha(0x80));
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("#GG0000".parse::<Rgba>().is_err());
    }

    #[test]
    fn rgb_replacement_keeps_alpha() {
        let base = Rgba::from_argb(0x4CFF_FFFF);
        let tinted = base.with_rgb_of(Rgba::new(10, 20, 30, 255));
        assert_eq!(tinted, Rgba::new(10, 20, 30, 0x4C));
    }
}
