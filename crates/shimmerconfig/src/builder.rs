use std::f64::consts::FRAC_PI_2;
use std::time::Duration;

use crate::color::Rgba;
use crate::kinds::{
    Direction, Easing, HighlightMode, RepeatCount, RepeatMode, Shape, SurfaceOpacity,
};
use crate::ConfigError;

/// Number of keyframes in the sweep gradient.
pub const COMPONENT_COUNT: usize = 4;

/// Keeps the bright band from collapsing to zero width when intensity is 0.
const BAND_EPSILON: f32 = 0.001;

/// Upper bound on the tilt padding; tilts near 90° would otherwise overflow `i32`.
const MAX_DRAW_PADDING: i32 = i32::MAX / 4;

/// Validated shimmer description. Construct through [`ShimmerBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShimmerConfig {
    positions: [f32; COMPONENT_COUNT],
    colors: [Rgba; COMPONENT_COUNT],

    direction: Direction,
    highlight_color: Rgba,
    base_color: Rgba,
    shape: Shape,
    fixed_width: u32,
    fixed_height: u32,

    width_ratio: f32,
    height_ratio: f32,
    intensity: f32,
    dropoff: f32,
    tilt: f32,

    clip_to_children: bool,
    auto_start: bool,
    highlight_mode: HighlightMode,

    repeat_count: RepeatCount,
    repeat_mode: RepeatMode,
    duration: Duration,
    repeat_delay: Duration,
    easing: Easing,
}

/// Rectangle the sweep is drawn into, padded so a tilted band never leaves
/// an unswept corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl DrawBounds {
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        let mut config = Self {
            positions: [0.0; COMPONENT_COUNT],
            colors: [Rgba::TRANSPARENT; COMPONENT_COUNT],
            direction: Direction::LeftToRight,
            highlight_color: Rgba::WHITE,
            base_color: Rgba::from_argb(0x4CFF_FFFF),
            shape: Shape::Linear,
            fixed_width: 0,
            fixed_height: 0,
            width_ratio: 1.0,
            height_ratio: 1.0,
            intensity: 0.0,
            dropoff: 0.5,
            tilt: 20.0,
            clip_to_children: true,
            auto_start: true,
            highlight_mode: HighlightMode::Alpha,
            repeat_count: RepeatCount::Infinite,
            repeat_mode: RepeatMode::Restart,
            duration: Duration::from_millis(1000),
            repeat_delay: Duration::ZERO,
            easing: Easing::AccelerateDecelerate,
        };
        config.update_stops();
        config
    }
}

impl ShimmerConfig {
    pub fn positions(&self) -> &[f32; COMPONENT_COUNT] {
        &self.positions
    }

    pub fn colors(&self) -> &[Rgba; COMPONENT_COUNT] {
        &self.colors
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn base_color(&self) -> Rgba {
        self.base_color
    }

    pub fn highlight_color(&self) -> Rgba {
        self.highlight_color
    }

    pub fn fixed_width(&self) -> u32 {
        self.fixed_width
    }

    pub fn fixed_height(&self) -> u32 {
        self.fixed_height
    }

    pub fn width_ratio(&self) -> f32 {
        self.width_ratio
    }

    pub fn height_ratio(&self) -> f32 {
        self.height_ratio
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn dropoff(&self) -> f32 {
        self.dropoff
    }

    /// Sweep rotation in degrees.
    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    pub fn clip_to_children(&self) -> bool {
        self.clip_to_children
    }

    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    pub fn highlight_mode(&self) -> HighlightMode {
        self.highlight_mode
    }

    /// True when the sweep modulates alpha rather than painting color.
    pub fn alpha_shimmer(&self) -> bool {
        self.highlight_mode == HighlightMode::Alpha
    }

    pub fn repeat_count(&self) -> RepeatCount {
        self.repeat_count
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn repeat_delay(&self) -> Duration {
        self.repeat_delay
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Effective sweep width for a container `width` pixels wide.
    pub fn width(&self, width: u32) -> u32 {
        if self.fixed_width > 0 {
            self.fixed_width
        } else {
            (self.width_ratio * width as f32).round() as u32
        }
    }

    /// Effective sweep height for a container `height` pixels tall.
    pub fn height(&self, height: u32) -> u32 {
        if self.fixed_height > 0 {
            self.fixed_height
        } else {
            (self.height_ratio * height as f32).round() as u32
        }
    }

    /// Padded draw rectangle for a `view_width` x `view_height` surface.
    pub fn draw_bounds(&self, view_width: u32, view_height: u32) -> DrawBounds {
        let magnitude = f64::from(view_width.max(view_height));
        let rad = FRAC_PI_2 - f64::from(self.tilt % 90.0).to_radians();
        let hyp = magnitude / rad.sin();
        let padding =
            (3.0 * ((hyp - magnitude) / 2.0).round()).clamp(0.0, f64::from(MAX_DRAW_PADDING)) as i32;
        let extent = |size: u32| i32::try_from(size).unwrap_or(i32::MAX).saturating_add(padding);
        DrawBounds {
            left: -padding,
            top: -padding,
            right: extent(self.width(view_width)),
            bottom: extent(self.height(view_height)),
        }
    }

    pub fn opacity(&self) -> SurfaceOpacity {
        if self.clip_to_children || self.alpha_shimmer() {
            SurfaceOpacity::Translucent
        } else {
            SurfaceOpacity::Opaque
        }
    }

    fn update_stops(&mut self) {
        self.update_colors();
        self.update_positions();
    }

    fn update_colors(&mut self) {
        let base = self.base_color;
        let highlight = self.highlight_color;
        self.colors = match self.shape {
            Shape::Linear => [base, highlight, highlight, base],
            Shape::Radial => [highlight, highlight, base, base],
        };
    }

    fn update_positions(&mut self) {
        let intensity = self.intensity;
        let dropoff = self.dropoff;
        self.positions = match self.shape {
            Shape::Linear => {
                let inner_start = ((1.0 - intensity - BAND_EPSILON) / 2.0).max(0.0);
                let inner_end = ((1.0 + intensity + BAND_EPSILON) / 2.0).min(1.0);
                // A dropoff narrower than the epsilon would cross the inner stops.
                [
                    ((1.0 - intensity - dropoff) / 2.0).max(0.0).min(inner_start),
                    inner_start,
                    inner_end,
                    ((1.0 + intensity + dropoff) / 2.0).min(1.0).max(inner_end),
                ]
            }
            Shape::Radial => [
                0.0,
                intensity.min(1.0),
                (intensity + dropoff).min(1.0),
                1.0,
            ],
        };
    }
}

/// Validating builder for [`ShimmerConfig`].
///
/// Setters that can reject their argument return `Result<Self, ConfigError>`
/// so chains read as `builder.set_intensity(0.2)?.set_dropoff(0.4)?`; the
/// remaining setters are infallible and return `Self`.
#[derive(Debug, Clone)]
pub struct ShimmerBuilder {
    config: ShimmerConfig,
}

impl Default for ShimmerBuilder {
    fn default() -> Self {
        Self::alpha_highlight()
    }
}

impl ShimmerBuilder {
    /// Builder whose sweep modulates the alpha of the underlying content.
    pub fn alpha_highlight() -> Self {
        Self::with_mode(HighlightMode::Alpha)
    }

    /// Builder whose sweep paints its own colors over the content.
    pub fn color_highlight() -> Self {
        Self::with_mode(HighlightMode::Color)
    }

    pub fn with_mode(mode: HighlightMode) -> Self {
        Self {
            config: ShimmerConfig {
                highlight_mode: mode,
                ..ShimmerConfig::default()
            },
        }
    }

    pub fn mode(&self) -> HighlightMode {
        self.config.highlight_mode
    }

    /// Copies every setting of `other` except its highlight mode.
    pub fn copy_from(mut self, other: &ShimmerConfig) -> Self {
        let mode = self.config.highlight_mode;
        self.config = ShimmerConfig {
            highlight_mode: mode,
            ..other.clone()
        };
        self
    }

    pub fn set_direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    pub fn set_direction_code(self, code: i64) -> Result<Self, ConfigError> {
        let direction = Direction::from_code(code).ok_or_else(|| {
            ConfigError::InvalidArgument(format!("unknown direction code: {code}"))
        })?;
        Ok(self.set_direction(direction))
    }

    pub fn set_shape(mut self, shape: Shape) -> Self {
        self.config.shape = shape;
        self
    }

    pub fn set_shape_code(self, code: i64) -> Result<Self, ConfigError> {
        let shape = Shape::from_code(code)
            .ok_or_else(|| ConfigError::InvalidArgument(format!("unknown shape code: {code}")))?;
        Ok(self.set_shape(shape))
    }

    /// Fixed sweep width in pixels; `0` falls back to the width ratio.
    pub fn set_fixed_width(mut self, fixed_width: i64) -> Result<Self, ConfigError> {
        self.config.fixed_width = pixel_size("width", fixed_width)?;
        Ok(self)
    }

    /// Fixed sweep height in pixels; `0` falls back to the height ratio.
    pub fn set_fixed_height(mut self, fixed_height: i64) -> Result<Self, ConfigError> {
        self.config.fixed_height = pixel_size("height", fixed_height)?;
        Ok(self)
    }

    pub fn set_width_ratio(mut self, width_ratio: f32) -> Result<Self, ConfigError> {
        self.config.width_ratio = non_negative("width ratio", width_ratio)?;
        Ok(self)
    }

    pub fn set_height_ratio(mut self, height_ratio: f32) -> Result<Self, ConfigError> {
        self.config.height_ratio = non_negative("height ratio", height_ratio)?;
        Ok(self)
    }

    /// A larger intensity widens the fully bright band.
    pub fn set_intensity(mut self, intensity: f32) -> Result<Self, ConfigError> {
        self.config.intensity = non_negative("intensity value", intensity)?;
        Ok(self)
    }

    /// Width of the fade between the bright band and the base color.
    pub fn set_dropoff(mut self, dropoff: f32) -> Result<Self, ConfigError> {
        self.config.dropoff = non_negative("dropoff value", dropoff)?;
        Ok(self)
    }

    pub fn set_tilt(mut self, tilt: f32) -> Self {
        self.config.tilt = tilt;
        self
    }

    /// Alpha of the base color, clamped to `[0, 1]`.
    pub fn set_base_alpha(mut self, alpha: f32) -> Self {
        self.config.base_color = self.config.base_color.with_alpha_f32(alpha);
        self
    }

    /// Alpha of the highlight color, clamped to `[0, 1]`.
    pub fn set_highlight_alpha(mut self, alpha: f32) -> Self {
        self.config.highlight_color = self.config.highlight_color.with_alpha_f32(alpha);
        self
    }

    pub fn set_highlight_color(mut self, color: Rgba) -> Self {
        self.config.highlight_color = color;
        self
    }

    /// Replaces the base RGB channels; the base alpha is left untouched.
    pub fn set_base_color(mut self, color: Rgba) -> Self {
        self.config.base_color = self.config.base_color.with_rgb_of(color);
        self
    }

    pub fn set_clip_to_children(mut self, status: bool) -> Self {
        self.config.clip_to_children = status;
        self
    }

    pub fn set_auto_start(mut self, status: bool) -> Self {
        self.config.auto_start = status;
        self
    }

    pub fn set_repeat_count(mut self, repeat_count: RepeatCount) -> Self {
        self.config.repeat_count = repeat_count;
        self
    }

    pub fn set_repeat_count_code(self, code: i64) -> Result<Self, ConfigError> {
        let count = RepeatCount::from_code(code)
            .ok_or_else(|| ConfigError::InvalidArgument(format!("invalid repeat count: {code}")))?;
        Ok(self.set_repeat_count(count))
    }

    pub fn set_repeat_mode(mut self, mode: RepeatMode) -> Self {
        self.config.repeat_mode = mode;
        self
    }

    pub fn set_repeat_mode_code(self, code: i64) -> Result<Self, ConfigError> {
        let mode = RepeatMode::from_code(code)
            .ok_or_else(|| ConfigError::InvalidArgument(format!("unknown repeat mode: {code}")))?;
        Ok(self.set_repeat_mode(mode))
    }

    /// Hold between two sweeps, in milliseconds.
    pub fn set_repeat_delay_ms(mut self, millis: i64) -> Result<Self, ConfigError> {
        if millis < 0 {
            return Err(ConfigError::InvalidArgument(format!(
                "given a negative repeat delay: {millis}"
            )));
        }
        self.config.repeat_delay = Duration::from_millis(millis as u64);
        Ok(self)
    }

    /// Length of one full sweep, in milliseconds.
    pub fn set_duration_ms(mut self, millis: i64) -> Result<Self, ConfigError> {
        if millis < 0 {
            return Err(ConfigError::InvalidArgument(format!(
                "given a negative duration: {millis}"
            )));
        }
        self.config.duration = Duration::from_millis(millis as u64);
        Ok(self)
    }

    pub fn set_easing(mut self, easing: Easing) -> Self {
        self.config.easing = easing;
        self
    }

    pub fn build(mut self) -> ShimmerConfig {
        self.config.update_stops();
        self.config
    }
}

fn pixel_size(label: &str, value: i64) -> Result<u32, ConfigError> {
    u32::try_from(value)
        .map_err(|_| ConfigError::InvalidArgument(format!("given invalid {label}: {value}")))
}

fn non_negative(label: &str, value: f32) -> Result<f32, ConfigError> {
    if value.is_nan() || value < 0.0 {
        return Err(ConfigError::InvalidArgument(format!(
            "given invalid {label}: {value}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn linear_positions_are_ordered_for_unit_ranges() {
        for i in 0..=10 {
            for d in 0..=10 {
                let config = ShimmerBuilder::default()
                    .set_intensity(i as f32 / 10.0)
                    .unwrap()
                    .set_dropoff(d as f32 / 10.0)
                    .unwrap()
                    .build();
                let p = config.positions();
                assert!(0.0 <= p[0], "{p:?}");
                assert!(p[0] <= p[1] && p[1] <= p[2] && p[2] <= p[3], "{p:?}");
                assert!(p[3] <= 1.0, "{p:?}");
            }
        }
    }

    #[test]
    fn linear_band_keeps_minimum_width_at_zero_intensity() {
        let config = ShimmerBuilder::default().build();
        let p = config.positions();
        assert_close(p[0], 0.25);
        assert_close(p[1], 0.4995);
        assert_close(p[2], 0.5005);
        assert_close(p[3], 0.75);
        let base = config.base_color();
        let highlight = config.highlight_color();
        assert_eq!(config.colors(), &[base, highlight, highlight, base]);
    }

    #[test]
    fn radial_stops_follow_intensity_and_dropoff() {
        let config = ShimmerBuilder::default()
            .set_shape(Shape::Radial)
            .set_intensity(0.3)
            .unwrap()
            .set_dropoff(0.5)
            .unwrap()
            .build();
        let p = config.positions();
        assert_close(p[0], 0.0);
        assert_close(p[1], 0.3);
        assert_close(p[2], 0.8);
        assert_close(p[3], 1.0);
        let base = config.base_color();
        let highlight = config.highlight_color();
        assert_eq!(config.colors(), &[highlight, highlight, base, base]);
    }

    #[test]
    fn radial_positions_saturate_at_one() {
        let config = ShimmerBuilder::default()
            .set_shape(Shape::Radial)
            .set_intensity(1.4)
            .unwrap()
            .set_dropoff(0.9)
            .unwrap()
            .build();
        assert_eq!(config.positions(), &[0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn setters_reject_negative_values() {
        let builder = ShimmerBuilder::default;
        assert!(matches!(
            builder().set_fixed_width(-1),
            Err(ConfigError::InvalidArgument(_))
        ));
        assert!(builder().set_fixed_height(-1).is_err());
        assert!(builder().set_width_ratio(-0.5).is_err());
        assert!(builder().set_height_ratio(f32::NAN).is_err());
        assert!(builder().set_intensity(-0.1).is_err());
        assert!(builder().set_dropoff(-1.0).is_err());
        assert!(builder().set_repeat_delay_ms(-5).is_err());
        assert!(builder().set_duration_ms(-5).is_err());
        assert!(builder().set_direction_code(7).is_err());
        assert!(builder().set_shape_code(-1).is_err());
        assert!(builder().set_repeat_mode_code(3).is_err());
        assert!(builder().set_repeat_count_code(-4).is_err());
    }

    #[test]
    fn effective_size_prefers_fixed_dimensions() {
        let fixed = ShimmerBuilder::default()
            .set_fixed_width(100)
            .unwrap()
            .set_width_ratio(0.5)
            .unwrap()
            .build();
        assert_eq!(fixed.width(300), 100);

        let ratio = ShimmerBuilder::default()
            .set_fixed_width(0)
            .unwrap()
            .set_width_ratio(0.5)
            .unwrap()
            .set_height_ratio(0.25)
            .unwrap()
            .build();
        assert_eq!(ratio.width(300), 150);
        assert_eq!(ratio.height(10), 3);
    }

    #[test]
    fn draw_bounds_pad_for_tilt() {
        let flat = ShimmerBuilder::default().set_tilt(0.0).build();
        assert_eq!(
            flat.draw_bounds(200, 100),
            DrawBounds {
                left: 0,
                top: 0,
                right: 200,
                bottom: 100
            }
        );

        // 200 / cos(20°) = 212.84, so padding = 3 * round(6.42) = 18.
        let tilted = ShimmerBuilder::default().build();
        let bounds = tilted.draw_bounds(200, 100);
        assert_eq!(bounds.left, -18);
        assert_eq!(bounds.top, -18);
        assert_eq!(bounds.right, 218);
        assert_eq!(bounds.bottom, 118);
        assert_eq!(bounds.width(), 236);
    }

    #[test]
    fn draw_bounds_saturate_near_right_angle_tilt() {
        for tilt in [89.99999, -89.99999] {
            let bounds = ShimmerBuilder::default()
                .set_tilt(tilt)
                .build()
                .draw_bounds(200, 100);
            assert!(bounds.left < -1_000_000, "tilt {tilt}: {bounds:?}");
            assert_eq!(bounds.top, bounds.left);
            assert!(bounds.right > 200);
            assert!(bounds.bottom > 100);
            assert!(bounds.width() > 0);
            assert!(bounds.height() > 0);
        }
    }

    #[test]
    fn alpha_setters_only_touch_alpha() {
        let config = ShimmerBuilder::color_highlight()
            .set_highlight_color(Rgba::from_argb(0xFF11_2233))
            .set_highlight_alpha(0.5)
            .set_base_color(Rgba::from_argb(0xFF44_5566))
            .set_base_alpha(1.0)
            .build();
        assert_eq!(config.highlight_color(), Rgba::from_argb(0x7F11_2233));
        assert_eq!(config.base_color(), Rgba::from_argb(0xFF44_5566));
    }

    #[test]
    fn base_color_keeps_existing_alpha() {
        let config = ShimmerBuilder::color_highlight()
            .set_base_color(Rgba::from_argb(0xFF00_00FF))
            .build();
        assert_eq!(config.base_color(), Rgba::from_argb(0x4C00_00FF));
    }

    #[test]
    fn copy_from_reproduces_every_field() {
        let original = ShimmerBuilder::color_highlight()
            .set_direction(Direction::BottomToTop)
            .set_shape(Shape::Radial)
            .set_fixed_width(40)
            .unwrap()
            .set_fixed_height(20)
            .unwrap()
            .set_width_ratio(0.7)
            .unwrap()
            .set_height_ratio(0.2)
            .unwrap()
            .set_intensity(0.3)
            .unwrap()
            .set_dropoff(0.1)
            .unwrap()
            .set_tilt(-15.0)
            .set_clip_to_children(false)
            .set_auto_start(false)
            .set_repeat_count(RepeatCount::Times(4))
            .set_repeat_mode(RepeatMode::Reverse)
            .set_repeat_delay_ms(250)
            .unwrap()
            .set_duration_ms(1500)
            .unwrap()
            .set_easing(Easing::Linear)
            .set_highlight_color(Rgba::from_argb(0xCC12_3456))
            .set_base_color(Rgba::from_argb(0xFF65_4321))
            .build();

        let copy = ShimmerBuilder::color_highlight().copy_from(&original).build();
        assert_eq!(copy, original);
    }

    #[test]
    fn copy_from_keeps_builder_mode() {
        let colored = ShimmerBuilder::color_highlight().build();
        let copy = ShimmerBuilder::alpha_highlight().copy_from(&colored).build();
        assert!(copy.alpha_shimmer());
        assert_eq!(copy.opacity(), SurfaceOpacity::Translucent);
    }

    #[test]
    fn opacity_is_opaque_only_for_unclipped_color_mode() {
        let opaque = ShimmerBuilder::color_highlight()
            .set_clip_to_children(false)
            .build();
        assert_eq!(opaque.opacity(), SurfaceOpacity::Opaque);
        let clipped = ShimmerBuilder::color_highlight().build();
        assert_eq!(clipped.opacity(), SurfaceOpacity::Translucent);
    }
}
