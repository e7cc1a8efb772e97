use std::cell::Cell;

use crate::types::SurfaceSize;

/// Collaborator a [`ShimmerRenderer`](crate::ShimmerRenderer) draws for.
///
/// Handed to the renderer at attach time; the renderer only ever asks the
/// host to repaint or to (un)schedule frame callbacks, it never reaches back
/// into host state.
pub trait SurfaceHost {
    /// Current size of the target surface.
    fn bounds(&self) -> SurfaceSize;
    /// Schedules a repaint of the surface.
    fn request_redraw(&self);
    /// Starts delivering `on_frame` ticks to the renderer.
    fn register_frame_callback(&self);
    /// Stops delivering `on_frame` ticks.
    fn unregister_frame_callback(&self);
    /// True while the surface is visible on a window.
    fn is_attached(&self) -> bool;
}

/// Off-screen host with no window system behind it.
///
/// Records redraw requests and the frame-callback registration so a driver
/// loop (or a test) can decide when to tick the renderer.
#[derive(Debug)]
pub struct HeadlessHost {
    bounds: Cell<SurfaceSize>,
    attached: Cell<bool>,
    frame_callback: Cell<bool>,
    redraws: Cell<u64>,
}

impl HeadlessHost {
    pub fn new(bounds: SurfaceSize) -> Self {
        Self {
            bounds: Cell::new(bounds),
            attached: Cell::new(true),
            frame_callback: Cell::new(false),
            redraws: Cell::new(0),
        }
    }

    pub fn set_bounds(&self, bounds: SurfaceSize) {
        self.bounds.set(bounds);
    }

    pub fn set_attached(&self, attached: bool) {
        self.attached.set(attached);
    }

    pub fn frame_callback_registered(&self) -> bool {
        self.frame_callback.get()
    }

    /// Number of redraws requested so far.
    pub fn redraw_count(&self) -> u64 {
        self.redraws.get()
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(SurfaceSize::default())
    }
}

impl SurfaceHost for HeadlessHost {
    fn bounds(&self) -> SurfaceSize {
        self.bounds.get()
    }

    fn request_redraw(&self) {
        self.redraws.set(self.redraws.get().saturating_add(1));
    }

    fn register_frame_callback(&self) {
        self.frame_callback.set(true);
    }

    fn unregister_frame_callback(&self) {
        self.frame_callback.set(false);
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_host_tracks_requests() {
        let host = HeadlessHost::new(SurfaceSize::new(32, 16));
        assert!(host.is_attached());
        assert_eq!(host.bounds(), SurfaceSize::new(32, 16));

        host.request_redraw();
        host.request_redraw();
        assert_eq!(host.redraw_count(), 2);

        host.register_frame_callback();
        assert!(host.frame_callback_registered());
        host.unregister_frame_callback();
        assert!(!host.frame_callback_registered());

        host.set_attached(false);
        assert!(!host.is_attached());
    }
}
