use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// The shape of the shimmer's highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    /// A directional band swept across the surface.
    #[default]
    Linear,
    /// A ring expanding from the surface center.
    Radial,
}

impl Shape {
    /// Maps the integer code used by attribute files (`0` linear, `1` radial).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Linear),
            1 => Some(Self::Radial),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Linear => 0,
            Self::Radial => 1,
        }
    }
}

impl FromStr for Shape {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "linear" => Ok(Self::Linear),
            "radial" => Ok(Self::Radial),
            other => Err(ConfigError::InvalidArgument(format!(
                "unknown shimmer shape '{other}' (expected linear or radial)"
            ))),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Radial => f.write_str("radial"),
        }
    }
}

/// Direction of the shimmer's sweep. Only meaningful for [`Shape::Linear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    LeftToRight,
    TopToBottom,
    RightToLeft,
    BottomToTop,
}

impl Direction {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::LeftToRight),
            1 => Some(Self::TopToBottom),
            2 => Some(Self::RightToLeft),
            3 => Some(Self::BottomToTop),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::LeftToRight => 0,
            Self::TopToBottom => 1,
            Self::RightToLeft => 2,
            Self::BottomToTop => 3,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::TopToBottom | Self::BottomToTop)
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "left_to_right" | "ltr" => Ok(Self::LeftToRight),
            "top_to_bottom" | "ttb" => Ok(Self::TopToBottom),
            "right_to_left" | "rtl" => Ok(Self::RightToLeft),
            "bottom_to_top" | "btt" => Ok(Self::BottomToTop),
            other => Err(ConfigError::InvalidArgument(format!(
                "unknown shimmer direction '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LeftToRight => "left_to_right",
            Self::TopToBottom => "top_to_bottom",
            Self::RightToLeft => "right_to_left",
            Self::BottomToTop => "bottom_to_top",
        };
        f.write_str(name)
    }
}

/// How the animation behaves when a cycle ends and another one begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Restart,
    /// Every odd cycle plays backwards.
    Reverse,
}

impl RepeatMode {
    /// Codes follow the animator convention: `1` restart, `2` reverse.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Restart),
            2 => Some(Self::Reverse),
            _ => None,
        }
    }
}

impl FromStr for RepeatMode {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "restart" => Ok(Self::Restart),
            "reverse" => Ok(Self::Reverse),
            other => Err(ConfigError::InvalidArgument(format!(
                "unknown repeat mode '{other}' (expected restart or reverse)"
            ))),
        }
    }
}

/// Number of times a cycle repeats after the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatCount {
    #[default]
    Infinite,
    Times(u32),
}

impl RepeatCount {
    /// `-1` is the infinite sentinel; other negative values have no meaning.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Infinite),
            n if n >= 0 => u32::try_from(n).ok().map(Self::Times),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Infinite => -1,
            Self::Times(n) => i64::from(n),
        }
    }
}

impl FromStr for RepeatCount {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(raw);
        if matches!(normalized.as_str(), "infinite" | "forever") {
            return Ok(Self::Infinite);
        }
        normalized
            .parse::<i64>()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| {
                ConfigError::InvalidArgument(format!("invalid repeat count '{normalized}'"))
            })
    }
}

/// Timing curve applied to the in-cycle fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Slow start and end, `cos((t + 1) * π) / 2 + 0.5`.
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        let clamped = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => clamped,
            Easing::AccelerateDecelerate => ((clamped + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

impl FromStr for Easing {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "linear" => Ok(Self::Linear),
            "accelerate_decelerate" | "ease_in_out" => Ok(Self::AccelerateDecelerate),
            other => Err(ConfigError::InvalidArgument(format!(
                "unknown easing '{other}'"
            ))),
        }
    }
}

/// Whether the highlight modulates the content's alpha or paints color over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightMode {
    /// Only the alpha channel of the gradient matters (destination-in).
    #[default]
    Alpha,
    /// The gradient colors are painted where content exists (source-in).
    Color,
}

/// Opacity hint a host can use to decide whether it needs a blending layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOpacity {
    Translucent,
    Opaque,
}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}
