use std::time::Instant;

use crate::animation::{AnimatorSet, Frame};
use crate::slots::{SlotId, SlotTransform};

/// Out-animation step holding the flip duration
const OUT_PRIMARY: usize = 0;
/// Out-animation step that hides the face at half time
const OUT_SECONDARY: usize = 1;
/// In-animation step holding the flip duration (step 0 pre-hides the face)
const IN_PRIMARY: usize = 1;
/// In-animation step that reveals the face at half time
const IN_SECONDARY: usize = 2;

/// The two handles that together play one flip.
///
/// `out_anim` turns the visible slot away, `in_anim` turns the hidden slot
/// in. Both always start together and share the same total duration.
#[derive(Clone, Debug)]
pub struct AnimationPair {
    out_anim: AnimatorSet,
    in_anim: AnimatorSet,
}

impl AnimationPair {
    pub fn new(out_anim: AnimatorSet, in_anim: AnimatorSet) -> Self {
        Self { out_anim, in_anim }
    }

    pub fn out_anim(&self) -> &AnimatorSet {
        &self.out_anim
    }

    pub fn in_anim(&self) -> &AnimatorSet {
        &self.in_anim
    }

    /// A copy with the same timings and no run state.
    pub fn idle_copy(&self) -> Self {
        let mut pair = self.clone();
        pair.reset();
        pair
    }

    /// Retime both handles: the rotating step runs for `duration_ms` and the
    /// face swap starts at `duration_ms / 2`.
    pub fn set_duration(&mut self, duration_ms: u64) {
        let half = duration_ms / 2;
        if let Some(step) = self.out_anim.step_mut(OUT_PRIMARY) {
            step.set_duration_ms(duration_ms);
        }
        if let Some(step) = self.out_anim.step_mut(OUT_SECONDARY) {
            step.set_start_delay_ms(half);
        }
        if let Some(step) = self.in_anim.step_mut(IN_PRIMARY) {
            step.set_duration_ms(duration_ms);
        }
        if let Some(step) = self.in_anim.step_mut(IN_SECONDARY) {
            step.set_start_delay_ms(half);
        }
    }

    /// Duration of the rotating step, if the out handle has one
    pub fn duration_ms(&self) -> Option<u64> {
        self.out_anim.step(OUT_PRIMARY).map(|step| step.duration_ms())
    }

    pub fn set_instant(&mut self, instant: bool) {
        self.out_anim.set_instant(instant);
        self.in_anim.set_instant(instant);
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.out_anim
            .total_duration_ms()
            .max(self.in_anim.total_duration_ms())
    }

    /// Start both handles: `out_target` turns away, `in_target` turns in.
    pub fn start(
        &mut self,
        (out_target, out_from): (SlotId, SlotTransform),
        (in_target, in_from): (SlotId, SlotTransform),
    ) {
        self.out_anim.start(out_target, out_from);
        self.in_anim.start(in_target, in_from);
    }

    /// True while either handle is still playing
    pub fn is_running(&self) -> bool {
        self.out_anim.is_running() || self.in_anim.is_running()
    }

    /// True once both handles have played to the end
    pub fn is_finished(&self) -> bool {
        self.out_anim.is_finished() && self.in_anim.is_finished()
    }

    pub fn advance(&mut self, now: Instant) -> [Option<Frame>; 2] {
        [self.out_anim.advance(now), self.in_anim.advance(now)]
    }

    /// Jump both running handles to their end values.
    pub fn finish(&mut self) -> [Option<Frame>; 2] {
        [self.out_anim.finish(), self.in_anim.finish()]
    }

    pub fn reset(&mut self) {
        self.out_anim.reset();
        self.in_anim.reset();
    }
}
