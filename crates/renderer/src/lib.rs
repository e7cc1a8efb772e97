//! Software renderer for shimmer placeholders.
//!
//! The crate turns a [`shimmerconfig::ShimmerConfig`] into per-frame draw
//! commands and rasterizes them with `tiny-skia`. The overall flow is:
//!
//! ```text
//!   SurfaceHost ── bounds ──▶ ShimmerRenderer::on_bounds_changed ─▶ SweepShader
//!        │                            │
//!        └── frame tick ──▶ on_frame ─┴─▶ Animator ─▶ RevealMask + sweep transform
//!                                                          │
//!                          ShimmerRenderer::draw ◀─────────┘
//!                                 │ FillRect (mask, then sweep)
//!                                 ▼
//!                     Canvas (PixmapCanvas / RecordingCanvas)
//! ```
//!
//! [`ShimmerRenderer`] holds the mutable per-surface state; the host it is
//! attached to only receives redraw and frame-callback requests. Everything
//! runs on the caller's thread. [`ShimmerFrame`] and [`SkeletonList`] are
//! ready-made hosts/content for off-screen rendering, and [`export`] writes
//! finished frames as PNG files.

mod animator;
mod canvas;
pub mod export;
mod frame;
mod host;
mod mask;
mod runtime;
mod shimmer;
mod skeleton;
mod sweep;
mod types;

pub use animator::{Animator, AnimatorSample};
pub use canvas::{Canvas, PixmapCanvas, RecordedFill, RecordingCanvas};
pub use frame::ShimmerFrame;
pub use host::{HeadlessHost, SurfaceHost};
pub use mask::{band_opacity, RevealMask};
pub use runtime::{
    clock_for_policy, BoxedFrameClock, ClockPolicy, FrameClock, FrameTick, SteppedClock,
    SystemClock,
};
pub use shimmer::ShimmerRenderer;
pub use skeleton::{dp, SkeletonList, SkeletonMetrics, SkeletonRow};
pub use sweep::{sweep_offset, sweep_transform, SweepShader};
pub use types::{ColorStop, Composite, FillRect, Gradient, RenderState, SurfaceSize};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("item count must be at least 1, got {0}")]
    InvalidItemCount(u32),
    #[error("cannot allocate a {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },
}
