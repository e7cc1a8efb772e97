use std::rc::Rc;
use std::time::Instant;

use shimmerconfig::ShimmerConfig;
use tiny_skia::{Point, Rect, Transform};

use crate::animator::Animator;
use crate::canvas::Canvas;
use crate::host::SurfaceHost;
use crate::mask::RevealMask;
use crate::sweep::{sweep_transform, SweepShader};
use crate::types::{Composite, FillRect, Gradient, RenderState, SurfaceSize};
use crate::RenderError;

/// Drives one shimmer effect over a host surface.
///
/// The host reports bounds through [`ShimmerRenderer::on_bounds_changed`] and
/// forwards its frame clock to [`ShimmerRenderer::on_frame`] while the frame
/// callback is registered. Every recompute ends with a redraw request; the
/// host then calls [`ShimmerRenderer::draw`] with its canvas.
#[derive(Default)]
pub struct ShimmerRenderer {
    config: Option<ShimmerConfig>,
    host: Option<Rc<dyn SurfaceHost>>,
    animator: Option<Animator>,
    sweep: Option<SweepShader>,
    transform: Transform,
    mask: RevealMask,
    state: RenderState,
}

impl ShimmerRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `config` to `host`, replacing any previous config.
    ///
    /// The animator is rebuilt from the new timing; if the previous one was
    /// running the new one starts right away.
    pub fn attach(&mut self, config: ShimmerConfig, host: Rc<dyn SurfaceHost>) {
        let was_started = self.is_running();
        self.stop();

        tracing::debug!(
            shape = %config.shape(),
            direction = %config.direction(),
            duration_ms = config.duration().as_millis() as u64,
            restarted = was_started,
            "attached shimmer config"
        );

        let bounds = host.bounds();
        self.animator = Some(Animator::from_config(&config));
        self.config = Some(config);
        self.host = Some(host);

        if bounds.is_empty() {
            self.sweep = None;
        } else {
            self.state.surface_bounds = bounds;
            self.recompute();
        }
        if was_started {
            self.start();
        } else {
            self.maybe_start();
        }
        self.request_redraw();
    }

    /// Stops the animation and releases the host handle and cached shaders.
    pub fn detach(&mut self) {
        self.stop();
        self.config = None;
        self.host = None;
        self.animator = None;
        self.sweep = None;
        self.transform = Transform::identity();
        self.mask.release();
        self.state = RenderState {
            item_count: self.state.item_count,
            ..RenderState::default()
        };
        tracing::debug!("detached shimmer renderer");
    }

    pub fn config(&self) -> Option<&ShimmerConfig> {
        self.config.as_ref()
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn end_value(&self) -> f32 {
        self.animator
            .as_ref()
            .map_or(1.0, |animator| animator.end_value())
    }

    /// Starts the animator. Does nothing when already running, when no config
    /// is attached or while the host is off screen.
    pub fn start(&mut self) {
        let Some(host) = self.host.as_ref() else {
            return;
        };
        let Some(animator) = self.animator.as_mut() else {
            return;
        };
        if animator.is_started() || !host.is_attached() {
            return;
        }
        animator.start();
        host.register_frame_callback();
        self.state.is_running = true;
        tracing::debug!("shimmer started");
    }

    pub fn stop(&mut self) {
        let Some(animator) = self.animator.as_mut() else {
            return;
        };
        if !animator.is_started() {
            return;
        }
        animator.cancel();
        if let Some(host) = self.host.as_ref() {
            host.unregister_frame_callback();
        }
        self.state.is_running = false;
        tracing::debug!("shimmer stopped");
    }

    /// Starts the animation if the config asks for auto start.
    pub fn maybe_start(&mut self) {
        if self.config.as_ref().is_some_and(|config| config.auto_start()) {
            self.start();
        }
    }

    /// Re-resolves the sweep gradient and the mask for a new surface size.
    ///
    /// An empty size keeps the previous shader until a usable size arrives.
    pub fn on_bounds_changed(&mut self, width: u32, height: u32) {
        let bounds = SurfaceSize::new(width, height);
        if bounds.is_empty() {
            tracing::warn!(width, height, "ignoring empty shimmer bounds");
            return;
        }
        tracing::debug!(width, height, "shimmer bounds changed");
        self.state.surface_bounds = bounds;
        self.recompute();
        self.maybe_start();
        self.request_redraw();
    }

    /// Frame clock callback: samples the animator and renders its value.
    pub fn on_frame(&mut self, now: Instant) {
        let Some(sample) = self
            .animator
            .as_mut()
            .and_then(|animator| animator.sample(now))
        else {
            return;
        };
        self.render_frame(sample.value);
        if sample.finished {
            if let Some(host) = self.host.as_ref() {
                host.unregister_frame_callback();
            }
            self.state.is_running = false;
            tracing::debug!("shimmer finished");
        }
    }

    /// Moves the effect to animator value `progress`.
    ///
    /// The mask follows the fraction of the cycle (`progress / end_value`),
    /// the sweep follows the raw value so the repeat delay holds the band
    /// past the far edge.
    pub fn render_frame(&mut self, progress: f32) {
        let Some(config) = self.config.as_ref() else {
            return;
        };
        self.state.animation_value = progress;
        self.state.animation_progress = (progress / self.end_value()).clamp(0.0, 1.0);
        self.mask.update(self.state.animation_progress);
        self.transform = sweep_transform(config, self.state.surface_bounds, progress);
        tracing::trace!(progress, fraction = self.state.animation_progress, "shimmer frame");
        self.request_redraw();
    }

    /// Number of stacked rows the mask reveals one after another.
    pub fn set_item_count(&mut self, item_count: u32) -> Result<(), RenderError> {
        if item_count == 0 {
            return Err(RenderError::InvalidItemCount(item_count));
        }
        self.state.item_count = item_count;
        self.mask.set_item_count(item_count);
        self.mask.update(self.current_fraction());
        Ok(())
    }

    /// Share of the surface height covered by the mask bands, clamped to `[0, 1]`.
    pub fn set_reveal_fraction(&mut self, reveal_fraction: f32) {
        self.mask.set_reveal_fraction(reveal_fraction);
        self.mask.update(self.current_fraction());
    }

    pub fn reveal_fraction(&self) -> f32 {
        self.mask.reveal_fraction()
    }

    /// Issues the mask fill followed by the sweep fill.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let (Some(config), Some(sweep)) = (self.config.as_ref(), self.sweep.as_ref()) else {
            return;
        };
        let bounds = self.state.surface_bounds;
        let width = bounds.width as f32;
        let height = bounds.height as f32;

        if let Some(rect) = Rect::from_ltrb(0.0, 0.0, width, height) {
            canvas.fill_rect(&FillRect {
                rect,
                gradient: Gradient::Linear {
                    start: Point::zero(),
                    end: Point::from_xy(0.0, config.height(bounds.height) as f32),
                },
                stops: self.mask.stops(),
                transform: Transform::identity(),
                composite: Composite::DestinationIn,
            });
        }

        let padded = config.draw_bounds(bounds.width, bounds.height);
        let Some(rect) = Rect::from_ltrb(
            (padded.left as f32).min(0.0),
            (padded.top as f32).min(0.0),
            (padded.right as f32).max(width),
            (padded.bottom as f32).max(height),
        ) else {
            return;
        };
        let composite = if config.alpha_shimmer() {
            Composite::DestinationIn
        } else {
            Composite::SourceIn
        };
        canvas.fill_rect(&FillRect {
            rect,
            gradient: sweep.gradient(),
            stops: sweep.stops(),
            transform: self.transform,
            composite,
        });
    }

    fn current_fraction(&self) -> f32 {
        self.state.animation_progress
    }

    fn recompute(&mut self) {
        let Some(config) = self.config.as_ref() else {
            return;
        };
        let bounds = self.state.surface_bounds;
        self.sweep = SweepShader::new(config, bounds);
        self.transform = sweep_transform(config, bounds, self.state.animation_value);
        self.mask.update(self.current_fraction());
    }

    fn request_redraw(&self) {
        if let Some(host) = self.host.as_ref() {
            host.request_redraw();
        }
    }
}
