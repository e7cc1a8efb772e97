use std::time::{Duration, Instant};

use anyhow::{bail, Result};

/// How frame timestamps are produced for a shimmer host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockPolicy {
    /// Follow the system monotonic clock.
    Realtime,
    /// Advance by a fixed step per frame, independent of wall-clock time.
    Stepped {
        /// Simulated frames per second.
        fps: f32,
    },
}

/// Snapshot handed to the renderer on every frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Timestamp the animator samples at.
    pub now: Instant,
    /// Monotonic frame counter since the clock was built.
    pub frame_index: u64,
}

impl FrameTick {
    pub fn new(now: Instant, frame_index: u64) -> Self {
        Self { now, frame_index }
    }
}

/// Abstraction over where frame timestamps originate from.
pub trait FrameClock {
    /// Produces the tick for the next frame.
    fn tick(&mut self) -> FrameTick;
}

/// Clock backed by `Instant::now()`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    frame: u64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { frame: 0 }
    }
}

impl FrameClock for SystemClock {
    fn tick(&mut self) -> FrameTick {
        let tick = FrameTick::new(Instant::now(), self.frame);
        self.frame = self.frame.saturating_add(1);
        tick
    }
}

/// Deterministic clock: frame `n` is reported at `origin + n * step`.
#[derive(Debug, Clone, Copy)]
pub struct SteppedClock {
    origin: Instant,
    step: Duration,
    frame: u64,
}

impl SteppedClock {
    pub fn new(origin: Instant, step: Duration) -> Self {
        Self {
            origin,
            step,
            frame: 0,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }
}

impl FrameClock for SteppedClock {
    fn tick(&mut self) -> FrameTick {
        let offset = self.step.saturating_mul(self.frame.min(u64::from(u32::MAX)) as u32);
        let tick = FrameTick::new(self.origin + offset, self.frame);
        self.frame = self.frame.saturating_add(1);
        tick
    }
}

/// Convenient alias for owning clocks behind trait objects.
pub type BoxedFrameClock = Box<dyn FrameClock>;

/// Builds a clock suited to the requested policy.
pub fn clock_for_policy(policy: ClockPolicy) -> Result<BoxedFrameClock> {
    match policy {
        ClockPolicy::Realtime => Ok(Box::new(SystemClock::new())),
        ClockPolicy::Stepped { fps } => {
            if !fps.is_finite() || fps <= 0.0 {
                bail!("stepped clock needs a positive frame rate, got {fps}");
            }
            let step = Duration::from_secs_f64(1.0 / f64::from(fps));
            Ok(Box::new(SteppedClock::new(Instant::now(), step)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepped_clock_advances_by_fixed_step() {
        let origin = Instant::now();
        let mut clock = SteppedClock::new(origin, Duration::from_millis(40));
        assert_eq!(clock.tick(), FrameTick::new(origin, 0));
        assert_eq!(clock.tick().now, origin + Duration::from_millis(40));
        let third = clock.tick();
        assert_eq!(third.frame_index, 2);
        assert_eq!(third.now, origin + Duration::from_millis(80));
    }

    #[test]
    fn system_clock_counts_frames() {
        let mut clock = SystemClock::new();
        let first = clock.tick();
        let second = clock.tick();
        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
        assert!(second.now >= first.now);
    }

    #[test]
    fn stepped_policy_requires_positive_fps() {
        assert!(clock_for_policy(ClockPolicy::Stepped { fps: 0.0 }).is_err());
        assert!(clock_for_policy(ClockPolicy::Stepped { fps: 30.0 }).is_ok());
        assert!(clock_for_policy(ClockPolicy::Realtime).is_ok());
    }
}
