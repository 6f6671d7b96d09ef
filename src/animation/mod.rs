mod animator;
mod library;
mod timing;

pub use animator::{AnimatorSet, Frame, Property, PropertyAnimator};
pub use library::{AnimationEngine, AnimationLibrary};
pub use timing::TimingFunction;

/// Timing of a single animation sub-step
#[derive(Clone, Debug, Default)]
pub struct Transition {
    /// Duration of the step in milliseconds
    pub duration_ms: u64,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Delay before the step starts, measured from the start of its set
    pub delay_ms: u64,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: u64, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0,
        }
    }

    /// A zero-length step that jumps straight to its end value
    pub fn instant() -> Self {
        Self::new(0, TimingFunction::Linear)
    }

    /// Set the delay before the step starts
    pub fn delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the duration of the step
    pub fn duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Time at which the step reaches its end value
    pub fn end_ms(&self) -> u64 {
        self.delay_ms.saturating_add(self.duration_ms)
    }
}
