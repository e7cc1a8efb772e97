use std::time::{Duration, Instant};

use shimmerconfig::{Easing, RepeatCount, RepeatMode, ShimmerConfig};

/// Animator output for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorSample {
    /// Animated value in `[0, end_value]`.
    pub value: f32,
    /// Eased in-cycle fraction in `[0, 1]`.
    pub fraction: f32,
    /// True once a finite animator has played its last cycle.
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnimatorState {
    Idle,
    /// Started; the first sample anchors the cycle origin.
    Pending,
    Running { origin: Instant },
    Finished,
}

/// Value timer driving the sweep.
///
/// One cycle lasts `duration + repeat_delay` and animates the value from `0`
/// to `1 + repeat_delay / duration`, so the delay is spent with the band past
/// the far edge of the surface.
#[derive(Debug, Clone)]
pub struct Animator {
    duration: Duration,
    repeat_delay: Duration,
    repeat_count: RepeatCount,
    repeat_mode: RepeatMode,
    easing: Easing,
    state: AnimatorState,
}

impl Animator {
    pub fn new(
        duration: Duration,
        repeat_delay: Duration,
        repeat_count: RepeatCount,
        repeat_mode: RepeatMode,
        easing: Easing,
    ) -> Self {
        Self {
            duration,
            repeat_delay,
            repeat_count,
            repeat_mode,
            easing,
            state: AnimatorState::Idle,
        }
    }

    pub fn from_config(config: &ShimmerConfig) -> Self {
        Self::new(
            config.duration(),
            config.repeat_delay(),
            config.repeat_count(),
            config.repeat_mode(),
            config.easing(),
        )
    }

    /// Upper bound of the animated value.
    pub fn end_value(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            1.0 + (self.repeat_delay.as_secs_f64() / self.duration.as_secs_f64()) as f32
        }
    }

    /// Length of one cycle, delay included.
    pub fn cycle_length(&self) -> Duration {
        self.duration + self.repeat_delay
    }

    pub fn start(&mut self) {
        if !self.is_started() {
            self.state = AnimatorState::Pending;
        }
    }

    pub fn cancel(&mut self) {
        self.state = AnimatorState::Idle;
    }

    pub fn is_started(&self) -> bool {
        matches!(
            self.state,
            AnimatorState::Pending | AnimatorState::Running { .. }
        )
    }

    /// Samples the animator at `now`. Returns `None` unless started.
    pub fn sample(&mut self, now: Instant) -> Option<AnimatorSample> {
        let origin = match self.state {
            AnimatorState::Idle | AnimatorState::Finished => return None,
            AnimatorState::Pending => {
                self.state = AnimatorState::Running { origin: now };
                now
            }
            AnimatorState::Running { origin } => origin,
        };

        let cycle = self.cycle_length();
        if cycle.is_zero() {
            self.state = AnimatorState::Finished;
            return Some(self.sample_for(1.0, true));
        }

        let cycles = now.saturating_duration_since(origin).as_secs_f64() / cycle.as_secs_f64();
        let iteration = cycles.floor() as u64;

        if let RepeatCount::Times(repeats) = self.repeat_count {
            let last = u64::from(repeats);
            if iteration > last {
                self.state = AnimatorState::Finished;
                let raw = if self.reversed(last) { 0.0 } else { 1.0 };
                return Some(self.sample_for(raw, true));
            }
        }

        let in_cycle = (cycles - iteration as f64) as f32;
        let raw = if self.reversed(iteration) {
            1.0 - in_cycle
        } else {
            in_cycle
        };
        Some(self.sample_for(raw, false))
    }

    fn reversed(&self, iteration: u64) -> bool {
        self.repeat_mode == RepeatMode::Reverse && iteration % 2 == 1
    }

    fn sample_for(&self, raw: f32, finished: bool) -> AnimatorSample {
        let fraction = self.easing.sample(raw);
        AnimatorSample {
            value: fraction * self.end_value(),
            fraction,
            finished,
        }
    }
}
