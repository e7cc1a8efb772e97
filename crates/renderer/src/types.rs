use shimmerconfig::Rgba;
use tiny_skia::{Point, Rect, Transform};

/// Size of the host surface in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero; nothing can be drawn.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Porter-Duff mode used when compositing a fill onto the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Keep destination pixels, scaled by the source alpha.
    DestinationIn,
    /// Paint the source only where the destination already has coverage.
    SourceIn,
}

/// One gradient keyframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub position: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(position: f32, color: Rgba) -> Self {
        Self { position, color }
    }
}

/// Gradient geometry in the shader's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gradient {
    Linear { start: Point, end: Point },
    Radial { center: Point, radius: f32 },
}

/// A single draw command: fill `rect` with a gradient, composited with `composite`.
///
/// `transform` maps the gradient's local space onto the surface; the rectangle
/// itself is always in surface coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FillRect<'a> {
    pub rect: Rect,
    pub gradient: Gradient,
    pub stops: &'a [ColorStop],
    pub transform: Transform,
    pub composite: Composite,
}

/// Mutable per-surface state owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Current size of the target surface.
    pub surface_bounds: SurfaceSize,
    /// Share of the current cycle, in `[0, 1]`; drives the reveal mask.
    pub animation_progress: f32,
    /// Raw animator value, in `[0, 1 + delay / duration]`; drives the sweep.
    pub animation_value: f32,
    /// Skeleton rows the layered mask reveals in sequence.
    pub item_count: u32,
    pub is_running: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            surface_bounds: SurfaceSize::default(),
            animation_progress: 0.0,
            animation_value: 0.0,
            item_count: 1,
            is_running: false,
        }
    }
}
