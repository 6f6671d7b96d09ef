use std::time::Instant;

use super::Transition;
use crate::slots::{SlotId, SlotTransform};

/// Slot property driven by a [`PropertyAnimator`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property {
    /// Rotation around the horizontal axis, in degrees
    RotationX,
    /// Rotation around the vertical axis, in degrees
    RotationY,
    /// Opacity from 0.0 to 1.0
    Alpha,
}

impl Property {
    fn apply(self, transform: &mut SlotTransform, value: f32) {
        match self {
            Property::RotationX => transform.rotation_x = value,
            Property::RotationY => transform.rotation_y = value,
            Property::Alpha => transform.alpha = value,
        }
    }
}

/// One sub-step of an animation handle: a single property moving between two values
#[derive(Clone, Debug)]
pub struct PropertyAnimator {
    pub property: Property,
    pub from: f32,
    pub to: f32,
    pub transition: Transition,
}

impl PropertyAnimator {
    /// Create an instant step; use [`PropertyAnimator::transition`] to give it a length.
    pub fn new(property: Property, from: f32, to: f32) -> Self {
        Self {
            property,
            from,
            to,
            transition: Transition::instant(),
        }
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn duration_ms(&self) -> u64 {
        self.transition.duration_ms
    }

    pub fn set_duration_ms(&mut self, duration_ms: u64) {
        self.transition.duration_ms = duration_ms;
    }

    pub fn start_delay_ms(&self) -> u64 {
        self.transition.delay_ms
    }

    pub fn set_start_delay_ms(&mut self, delay_ms: u64) {
        self.transition.delay_ms = delay_ms;
    }

    /// Value of the property `elapsed_ms` after the owning set started.
    ///
    /// Returns `None` while the step is still waiting out its start delay, in
    /// which case the property keeps whatever value it already had.
    pub fn value_at(&self, elapsed_ms: u64) -> Option<f32> {
        let delay = self.transition.delay_ms;
        if elapsed_ms < delay {
            return None;
        }
        let duration = self.transition.duration_ms;
        let t = if duration == 0 {
            1.0
        } else {
            ((elapsed_ms - delay) as f32 / duration as f32).min(1.0)
        };
        let eased = self.transition.timing.evaluate(t);
        Some(self.from + (self.to - self.from) * eased)
    }
}

/// Output of advancing a running [`AnimatorSet`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub target: SlotId,
    pub transform: SlotTransform,
    pub finished: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Idle,
    /// Started, waiting for the first frame to stamp the start time
    Pending,
    Running {
        started_at: Instant,
    },
    Finished,
}

/// An animation handle: ordered sub-steps played together against one slot.
///
/// All steps share the set's start time; each step's own delay offsets it from
/// there. The set finishes once its latest step has reached its end value.
#[derive(Clone, Debug)]
pub struct AnimatorSet {
    steps: Vec<PropertyAnimator>,
    instant: bool,
    target: Option<SlotId>,
    base: SlotTransform,
    state: RunState,
}

impl AnimatorSet {
    pub fn new(steps: Vec<PropertyAnimator>) -> Self {
        Self {
            steps,
            instant: false,
            target: None,
            base: SlotTransform::IDENTITY,
            state: RunState::Idle,
        }
    }

    pub fn steps(&self) -> &[PropertyAnimator] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&PropertyAnimator> {
        self.steps.get(index)
    }

    pub fn step_mut(&mut self, index: usize) -> Option<&mut PropertyAnimator> {
        self.steps.get_mut(index)
    }

    /// Collapse every step to zero length without touching the stored timings.
    pub fn set_instant(&mut self, instant: bool) {
        self.instant = instant;
    }

    pub fn is_instant(&self) -> bool {
        self.instant
    }

    /// Total play time of the set in milliseconds
    pub fn total_duration_ms(&self) -> u64 {
        if self.instant {
            return 0;
        }
        self.steps
            .iter()
            .map(|step| step.transition.end_ms())
            .max()
            .unwrap_or(0)
    }

    pub fn target(&self) -> Option<SlotId> {
        self.target
    }

    /// Start playing against `target`, whose current transform is `from`.
    ///
    /// The start time is taken from the first call to [`AnimatorSet::advance`].
    pub fn start(&mut self, target: SlotId, from: SlotTransform) {
        self.target = Some(target);
        self.base = from;
        self.state = RunState::Pending;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RunState::Pending | RunState::Running { .. })
    }

    pub fn is_finished(&self) -> bool {
        self.state == RunState::Finished
    }

    /// Return to idle, forgetting the target.
    pub fn reset(&mut self) {
        self.target = None;
        self.state = RunState::Idle;
    }

    /// Transform of the target `elapsed_ms` after start.
    pub fn sample(&self, elapsed_ms: u64) -> SlotTransform {
        let elapsed_ms = if self.instant { u64::MAX } else { elapsed_ms };
        self.steps.iter().fold(self.base, |mut transform, step| {
            if let Some(value) = step.value_at(elapsed_ms) {
                step.property.apply(&mut transform, value);
            }
            transform
        })
    }

    /// Advance to `now`. Yields nothing when the set is not running.
    ///
    /// The frame with `finished == true` is produced exactly once per start.
    pub fn advance(&mut self, now: Instant) -> Option<Frame> {
        let elapsed_ms = match self.state {
            RunState::Idle | RunState::Finished => return None,
            RunState::Pending => {
                self.state = RunState::Running { started_at: now };
                0
            }
            RunState::Running { started_at } => {
                now.saturating_duration_since(started_at).as_millis() as u64
            }
        };

        if elapsed_ms >= self.total_duration_ms() {
            return self.finish();
        }

        Some(Frame {
            target: self.target?,
            transform: self.sample(elapsed_ms),
            finished: false,
        })
    }

    /// Jump straight to the end values and mark the set finished.
    pub fn finish(&mut self) -> Option<Frame> {
        if !self.is_running() {
            return None;
        }
        self.state = RunState::Finished;
        Some(Frame {
            target: self.target?,
            transform: self.sample(u64::MAX),
            finished: true,
        })
    }
}
