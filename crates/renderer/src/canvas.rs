use shimmerconfig::Rgba;
use tiny_skia::{
    BlendMode, Color, GradientStop, LinearGradient, Paint, Pixmap, RadialGradient, Rect, Shader,
    SpreadMode, Transform,
};

use crate::types::{ColorStop, Composite, FillRect, Gradient};

/// Destination for the renderer's draw commands.
pub trait Canvas {
    fn fill_rect(&mut self, command: &FillRect<'_>);
}

/// Rasterizes commands into a tiny-skia [`Pixmap`].
pub struct PixmapCanvas<'a> {
    pixmap: &'a mut Pixmap,
}

impl<'a> PixmapCanvas<'a> {
    pub fn new(pixmap: &'a mut Pixmap) -> Self {
        Self { pixmap }
    }
}

impl Canvas for PixmapCanvas<'_> {
    fn fill_rect(&mut self, command: &FillRect<'_>) {
        let Some(shader) = gradient_shader(command) else {
            tracing::trace!(
                gradient = ?command.gradient,
                stops = command.stops.len(),
                "skipping fill with degenerate gradient"
            );
            return;
        };

        let mut paint = Paint::default();
        paint.shader = shader;
        paint.blend_mode = blend_mode(command.composite);
        self.pixmap
            .fill_rect(command.rect, &paint, Transform::identity(), None);
    }
}

fn blend_mode(composite: Composite) -> BlendMode {
    match composite {
        Composite::DestinationIn => BlendMode::DestinationIn,
        Composite::SourceIn => BlendMode::SourceIn,
    }
}

pub(crate) fn skia_color(color: Rgba) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn gradient_shader(command: &FillRect<'_>) -> Option<Shader<'static>> {
    if command.stops.is_empty() {
        return None;
    }
    let stops: Vec<GradientStop> = command
        .stops
        .iter()
        .map(|stop| GradientStop::new(stop.position, skia_color(stop.color)))
        .collect();

    match command.gradient {
        Gradient::Linear { start, end } => {
            LinearGradient::new(start, end, stops, SpreadMode::Pad, command.transform)
        }
        Gradient::Radial { center, radius } => RadialGradient::new(
            center,
            center,
            radius,
            stops,
            SpreadMode::Pad,
            command.transform,
        ),
    }
}

/// Owned copy of a [`FillRect`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFill {
    pub rect: Rect,
    pub gradient: Gradient,
    pub stops: Vec<ColorStop>,
    pub transform: Transform,
    pub composite: Composite,
}

/// Canvas that keeps every command it receives, for inspection.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    fills: Vec<RecordedFill>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fills(&self) -> &[RecordedFill] {
        &self.fills
    }

    pub fn clear(&mut self) {
        self.fills.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, command: &FillRect<'_>) {
        self.fills.push(RecordedFill {
            rect: command.rect,
            gradient: command.gradient,
            stops: command.stops.to_vec(),
            transform: command.transform,
            composite: command.composite,
        });
    }
}
