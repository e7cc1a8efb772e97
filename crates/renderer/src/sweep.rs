use std::f32::consts::SQRT_2;

use shimmerconfig::{Direction, Shape, ShimmerConfig, COMPONENT_COUNT};
use tiny_skia::{Point, Transform};

use crate::types::{ColorStop, Gradient, SurfaceSize};

/// Sweep gradient resolved for one surface size.
///
/// Rebuilt only when the config or the surface bounds change; per-frame
/// motion is expressed entirely through [`sweep_transform`].
#[derive(Debug, Clone, PartialEq)]
pub struct SweepShader {
    gradient: Gradient,
    stops: [ColorStop; COMPONENT_COUNT],
}

impl SweepShader {
    /// Resolves the gradient for `bounds`. Returns `None` for an empty surface.
    pub fn new(config: &ShimmerConfig, bounds: SurfaceSize) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }
        let width = config.width(bounds.width) as f32;
        let height = config.height(bounds.height) as f32;

        let gradient = match config.shape() {
            Shape::Linear => {
                let end = if config.direction().is_vertical() {
                    Point::from_xy(0.0, height)
                } else {
                    Point::from_xy(width, 0.0)
                };
                Gradient::Linear {
                    start: Point::zero(),
                    end,
                }
            }
            Shape::Radial => Gradient::Radial {
                center: Point::from_xy(width / 2.0, height / 2.0),
                radius: width.max(height) / SQRT_2,
            },
        };

        let positions = config.positions();
        let colors = config.colors();
        let stops = std::array::from_fn(|i| ColorStop::new(positions[i], colors[i]));

        Some(Self { gradient, stops })
    }

    pub fn gradient(&self) -> Gradient {
        self.gradient
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }
}

/// Distance the band travels on each side of the surface along one axis.
fn translate_extent(dimension: f32, orthogonal: f32, tilt: f32) -> f32 {
    dimension + tilt.to_radians().tan() * orthogonal
}

fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Translation of the sweep at `progress` for a `bounds` sized surface.
pub fn sweep_offset(config: &ShimmerConfig, bounds: SurfaceSize, progress: f32) -> (f32, f32) {
    let width = bounds.width as f32;
    let height = bounds.height as f32;
    let tilt = config.tilt();
    let across = translate_extent(width, height, tilt);
    let down = translate_extent(height, width, tilt);

    match config.direction() {
        Direction::LeftToRight => (lerp(-across, across, progress), 0.0),
        Direction::RightToLeft => (lerp(across, -across, progress), 0.0),
        Direction::TopToBottom => (0.0, lerp(-down, down, progress)),
        Direction::BottomToTop => (0.0, lerp(down, -down, progress)),
    }
}

/// Shader-local transform: rotate by the tilt around the surface center, then
/// translate by the sweep offset.
pub fn sweep_transform(config: &ShimmerConfig, bounds: SurfaceSize, progress: f32) -> Transform {
    let (dx, dy) = sweep_offset(config, bounds, progress);
    Transform::from_rotate_at(
        config.tilt(),
        bounds.width as f32 / 2.0,
        bounds.height as f32 / 2.0,
    )
    .post_translate(dx, dy)
}
