//! Immutable description of a shimmer placeholder effect.
//!
//! A [`ShimmerConfig`] captures the sweep shape, direction, colors, geometry
//! and timing of the highlight band drawn over skeleton content. Configs are
//! only produced by [`ShimmerBuilder`], whose setters validate every argument,
//! so a config that escapes `build()` is always well formed. The builder also
//! precomputes the four gradient keyframes (`colors()` / `positions()`) the
//! renderer feeds into its sweep shader.
//!
//! ```text
//!   shimmer.toml ──▶ ShimmerAttributes ──▶ ShimmerBuilder ──▶ ShimmerConfig
//!                                              ▲                  │
//!                         code / copy_from ────┘                  └─▶ renderer
//! ```

mod attributes;
mod builder;
mod color;
mod kinds;

pub use attributes::{CodeOrName, ShimmerAttributes};
pub use builder::{DrawBounds, ShimmerBuilder, ShimmerConfig, COMPONENT_COUNT};
pub use color::Rgba;
pub use kinds::{
    Direction, Easing, HighlightMode, RepeatCount, RepeatMode, Shape, SurfaceOpacity,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed to parse shimmer attributes: {0}")]
    Parse(#[from] toml::de::Error),
}
