use std::rc::Rc;
use std::time::Instant;

use shimmerconfig::{Rgba, ShimmerConfig};
use tiny_skia::{Pixmap, PixmapPaint, Transform};

use crate::canvas::{skia_color, PixmapCanvas};
use crate::host::{HeadlessHost, SurfaceHost};
use crate::shimmer::ShimmerRenderer;
use crate::types::SurfaceSize;
use crate::RenderError;

/// Container that draws its content and overlays a shimmer on top.
///
/// With `clip_to_children` the shimmer only touches the content layer, which
/// is composited over the background afterwards. Without it the shimmer is
/// applied to the finished frame, background included.
pub struct ShimmerFrame {
    host: Rc<HeadlessHost>,
    renderer: ShimmerRenderer,
    config: ShimmerConfig,
    content: Option<Pixmap>,
    shimmer_visible: bool,
}

impl ShimmerFrame {
    pub fn new(config: ShimmerConfig) -> Self {
        let host = Rc::new(HeadlessHost::default());
        let mut renderer = ShimmerRenderer::new();
        renderer.attach(config.clone(), host.clone());
        Self {
            host,
            renderer,
            config,
            content: None,
            shimmer_visible: true,
        }
    }

    pub fn set_config(&mut self, config: ShimmerConfig) {
        self.config = config.clone();
        let host: Rc<dyn SurfaceHost> = self.host.clone();
        self.renderer.attach(config, host);
    }

    pub fn config(&self) -> &ShimmerConfig {
        &self.config
    }

    pub fn renderer(&self) -> &ShimmerRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut ShimmerRenderer {
        &mut self.renderer
    }

    pub fn host(&self) -> &HeadlessHost {
        &self.host
    }

    pub fn bounds(&self) -> SurfaceSize {
        self.host.bounds()
    }

    pub fn attach_to_window(&mut self) {
        self.host.set_attached(true);
        self.renderer.maybe_start();
    }

    pub fn detach_from_window(&mut self) {
        self.renderer.stop();
        self.host.set_attached(false);
    }

    pub fn layout(&mut self, width: u32, height: u32) {
        self.host.set_bounds(SurfaceSize::new(width, height));
        self.renderer.on_bounds_changed(width, height);
    }

    pub fn set_content(&mut self, content: Pixmap) {
        self.content = Some(content);
        self.host.request_redraw();
    }

    pub fn start_shimmer(&mut self) {
        self.renderer.start();
    }

    pub fn stop_shimmer(&mut self) {
        self.renderer.stop();
    }

    /// Makes the shimmer visible again, optionally restarting it.
    pub fn show_shimmer(&mut self, start: bool) {
        if self.shimmer_visible {
            return;
        }
        self.shimmer_visible = true;
        if start {
            self.start_shimmer();
        }
    }

    /// Hides the shimmer and stops its animation.
    pub fn hide_shimmer(&mut self) {
        if !self.shimmer_visible {
            return;
        }
        self.stop_shimmer();
        self.shimmer_visible = false;
        self.host.request_redraw();
    }

    pub fn is_shimmer_visible(&self) -> bool {
        self.shimmer_visible
    }

    pub fn is_shimmer_started(&self) -> bool {
        self.renderer.is_running()
    }

    /// Delivers a frame tick if the renderer asked for one.
    pub fn tick(&mut self, now: Instant) {
        if self.host.frame_callback_registered() {
            self.renderer.on_frame(now);
        }
    }

    /// Renders the current frame over an opaque `background`.
    pub fn compose(&self, background: Rgba) -> Result<Pixmap, RenderError> {
        let bounds = self.host.bounds();
        let allocate = || {
            Pixmap::new(bounds.width, bounds.height).ok_or(RenderError::SurfaceAllocation {
                width: bounds.width,
                height: bounds.height,
            })
        };

        let mut frame = allocate()?;
        frame.fill(skia_color(background));
        let paint = PixmapPaint::default();

        if self.config.clip_to_children() {
            let mut layer = allocate()?;
            if let Some(content) = self.content.as_ref() {
                layer.draw_pixmap(0, 0, content.as_ref(), &paint, Transform::identity(), None);
            }
            if self.shimmer_visible {
                self.renderer.draw(&mut PixmapCanvas::new(&mut layer));
            }
            frame.draw_pixmap(0, 0, layer.as_ref(), &paint, Transform::identity(), None);
        } else {
            if let Some(content) = self.content.as_ref() {
                frame.draw_pixmap(0, 0, content.as_ref(), &paint, Transform::identity(), None);
            }
            if self.shimmer_visible {
                self.renderer.draw(&mut PixmapCanvas::new(&mut frame));
            }
        }
        Ok(frame)
    }
}
