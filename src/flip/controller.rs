use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{AnimationPair, FlipConfig, FlipSide};
use crate::animation::{AnimationEngine, Frame};
use crate::error::{FlipError, Result};
use crate::gesture::Gesture;
use crate::slots::{SlotId, SlotTransform, ViewSlotProvider, Visibility, CAMERA_DISTANCE};

/// Callback for completed flips (receives the side now showing)
pub type FlipCallback = Arc<dyn Fn(FlipSide) + Send + Sync>;

enum PairState {
    Unconfigured,
    Ready(AnimationPair),
}

/// Owns the current side of a two-slot flip view and the animation pair that
/// moves between them.
///
/// A flip runs from [`trigger`](Self::trigger) until both handles of the pair
/// have finished, which the host observes by calling
/// [`advance`](Self::advance) once per frame. The side only changes when the
/// pair completes; triggers that arrive meanwhile are dropped.
pub struct FlipController<P: ViewSlotProvider> {
    provider: P,
    engine: Box<dyn AnimationEngine>,
    config: FlipConfig,
    pair: PairState,
    // Pair from a configure() issued mid-flip, installed on completion
    staged: Option<AnimationPair>,
    side: FlipSide,
    animating: bool,
    front: Option<SlotId>,
    back: Option<SlotId>,
    on_flip: Option<FlipCallback>,
    // At most one flip back is pending; a newer request replaces it
    scheduled_flip_back: Option<Duration>,
    bypass_enabled: bool,
}

impl<P: ViewSlotProvider> FlipController<P> {
    /// Create an unconfigured controller. It cannot flip until
    /// [`configure`](Self::configure) succeeds.
    pub fn new(provider: P, engine: impl AnimationEngine + 'static) -> Self {
        Self {
            provider,
            engine: Box::new(engine),
            config: FlipConfig::default(),
            pair: PairState::Unconfigured,
            staged: None,
            side: FlipSide::Front,
            animating: false,
            front: None,
            back: None,
            on_flip: None,
            scheduled_flip_back: None,
            bypass_enabled: false,
        }
    }

    pub fn with_config(
        provider: P,
        engine: impl AnimationEngine + 'static,
        config: FlipConfig,
    ) -> Result<Self> {
        let mut controller = Self::new(provider, engine);
        controller.configure(config)?;
        Ok(controller)
    }

    /// Validate and apply `config`.
    ///
    /// The pair is reloaded from the engine when the axis or origin edge
    /// changes and retimed otherwise. While a flip is running the new pair is
    /// held back and installed once the running pair completes.
    pub fn configure(&mut self, config: FlipConfig) -> Result<()> {
        config.validate()?;

        let current = self.staged.as_ref().or(match &self.pair {
            PairState::Ready(pair) => Some(pair),
            PairState::Unconfigured => None,
        });
        let direction_changed =
            config.axis != self.config.axis || config.origin_edge != self.config.origin_edge;

        let mut next = match current {
            Some(pair) if !direction_changed => pair.idle_copy(),
            _ => {
                let pair = self.engine.load_pair(config.axis, config.origin_edge)?;
                log::info!(
                    "Loaded flip animations: {:?} axis from {:?}",
                    config.axis,
                    config.origin_edge
                );
                pair
            }
        };
        next.set_duration(config.duration_ms as u64);
        self.config = config;

        if self.animating {
            self.staged = Some(next);
        } else {
            self.pair = PairState::Ready(next);
        }
        Ok(())
    }

    /// Change only the flip duration. See [`configure`](Self::configure).
    pub fn set_duration(&mut self, duration_ms: i32) -> Result<()> {
        let config = FlipConfig {
            duration_ms,
            ..self.config.clone()
        };
        self.configure(config)
    }

    /// Register the callback invoked after every completed flip.
    pub fn set_on_flip<F: Fn(FlipSide) + Send + Sync + 'static>(&mut self, callback: F) {
        self.on_flip = Some(Arc::new(callback));
    }

    /// Add a slot on top of the stack. A third slot is rejected.
    pub fn bind_slot(&mut self, slot: SlotId) -> Result<()> {
        let count = self.provider.slot_count();
        if count >= 2 {
            return Err(FlipError::StructuralViolation { slots: count + 1 });
        }
        self.provider.add_slot(slot);
        self.find_slots();
        Ok(())
    }

    /// Pick up slots the provider held when it was handed to the controller.
    pub fn adopt_slots(&mut self) -> Result<()> {
        let count = self.provider.slot_count();
        if count > 2 {
            return Err(FlipError::StructuralViolation { slots: count });
        }
        self.find_slots();
        Ok(())
    }

    /// Remove every slot and return to the front side. A running flip is dropped.
    pub fn clear_slots(&mut self) {
        self.provider.remove_all_slots();
        if self.animating {
            if let PairState::Ready(pair) = &mut self.pair {
                pair.reset();
            }
            self.animating = false;
            self.install_staged();
        }
        self.side = FlipSide::Front;
        self.find_slots();
    }

    /// Start flipping to the other side.
    ///
    /// Does nothing when the view is disabled, has fewer than two slots, is
    /// configured to flip once and already shows the back, or is mid-flip.
    pub fn trigger(&mut self) {
        if !self.config.enabled && !self.bypass_enabled {
            log::trace!("Flip ignored: disabled");
            return;
        }
        let (Some(front), Some(back)) = (self.front, self.back) else {
            log::trace!("Flip ignored: needs two slots");
            return;
        };
        if self.config.flip_once && self.side == FlipSide::Back {
            log::trace!("Flip ignored: already flipped once");
            return;
        }
        if self.animating {
            log::trace!("Flip ignored: flip in progress");
            return;
        }
        let PairState::Ready(pair) = &mut self.pair else {
            log::trace!("Flip ignored: animations not configured");
            return;
        };

        self.provider.set_visibility(front, Visibility::Visible);
        self.provider.set_visibility(back, Visibility::Visible);

        let (out_slot, in_slot) = match self.side {
            FlipSide::Front => (front, back),
            FlipSide::Back => (back, front),
        };
        // Every flip starts flat so a rotation left behind by a pair on the
        // other axis never leaks into this one
        pair.start(
            (out_slot, SlotTransform::IDENTITY),
            (in_slot, SlotTransform::IDENTITY),
        );
        self.animating = true;
        log::debug!(
            "Flipping {:?} -> {:?} over {}ms",
            self.side,
            self.side.flipped(),
            pair.total_duration_ms()
        );

        if pair.total_duration_ms() == 0 {
            let frames = pair.finish();
            self.apply_frames(frames);
            self.on_pair_completed();
        }
    }

    /// Flip to the other side, optionally without animation.
    ///
    /// Without animation the pair is collapsed to zero length for this one
    /// flip, which then completes before this returns. The enabled switch is
    /// bypassed in that case; the once-only policy and a running flip are not.
    pub fn flip_immediate(&mut self, with_animation: bool) {
        if with_animation {
            self.trigger();
            return;
        }

        self.set_pair_instant(true);
        self.bypass_enabled = true;
        self.trigger();
        self.bypass_enabled = false;
        self.set_pair_instant(false);
    }

    /// Drive the running flip to `now`, pushing slot transforms to the provider.
    pub fn advance(&mut self, now: Instant) {
        if !self.animating {
            return;
        }
        let PairState::Ready(pair) = &mut self.pair else {
            return;
        };
        let frames = pair.advance(now);
        let finished = pair.is_finished();
        self.apply_frames(frames);
        if finished {
            self.on_pair_completed();
        }
    }

    /// Translate a gesture into a flip. Returns whether the gesture was consumed.
    ///
    /// Flings and drags never flip the view.
    pub fn on_gesture(&mut self, gesture: Gesture) -> bool {
        let accepts = self.config.enabled && self.config.trigger_on_gesture;
        match gesture {
            Gesture::Down => accepts,
            Gesture::Tap => {
                if accepts {
                    self.trigger();
                }
                accepts
            }
            Gesture::Drag { .. } | Gesture::Fling { .. } => false,
        }
    }

    /// Take the pending auto-flip-back delay, if any.
    ///
    /// The delay asks the host for one deferred call to
    /// [`trigger`](Self::trigger); a trigger that is no longer allowed by then
    /// is simply ignored. Only the latest request is kept.
    pub fn take_scheduled_flip_back(&mut self) -> Option<Duration> {
        self.scheduled_flip_back.take()
    }

    pub fn current_side(&self) -> FlipSide {
        self.side
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn config(&self) -> &FlipConfig {
        &self.config
    }

    /// The active pair, once configured
    pub fn pair(&self) -> Option<&AnimationPair> {
        match &self.pair {
            PairState::Ready(pair) => Some(pair),
            PairState::Unconfigured => None,
        }
    }

    pub fn front_slot(&self) -> Option<SlotId> {
        self.front
    }

    pub fn back_slot(&self) -> Option<SlotId> {
        self.back
    }

    /// Read-only view of the slots. Slots are added and removed only through
    /// [`bind_slot`](Self::bind_slot) and [`clear_slots`](Self::clear_slots).
    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn on_pair_completed(&mut self) {
        if let PairState::Ready(pair) = &mut self.pair {
            pair.reset();
        }
        self.install_staged();

        self.side = self.side.flipped();
        let (shown, hidden) = match self.side {
            FlipSide::Front => (self.front, self.back),
            FlipSide::Back => (self.back, self.front),
        };
        if let Some(slot) = hidden {
            self.provider.set_visibility(slot, Visibility::Hidden);
        }
        if let Some(slot) = shown {
            self.provider.set_visibility(slot, Visibility::Visible);
        }
        self.animating = false;
        log::debug!("Flip completed, showing {:?}", self.side);

        if let Some(callback) = &self.on_flip {
            callback(self.side);
        }

        if self.side == FlipSide::Back && self.config.auto_flip_back {
            let delay = self.config.auto_flip_back_delay_ms.max(0) as u64;
            self.scheduled_flip_back = Some(Duration::from_millis(delay));
        }
    }

    fn install_staged(&mut self) {
        if let Some(pair) = self.staged.take() {
            self.pair = PairState::Ready(pair);
        }
    }

    fn set_pair_instant(&mut self, instant: bool) {
        if let PairState::Ready(pair) = &mut self.pair {
            pair.set_instant(instant);
        }
    }

    fn apply_frames(&mut self, frames: [Option<Frame>; 2]) {
        for frame in frames.into_iter().flatten() {
            self.provider.set_transform(frame.target, frame.transform);
        }
    }

    /// Re-read the slot stack: the topmost slot is the front, the one below
    /// it the back.
    fn find_slots(&mut self) {
        self.front = None;
        self.back = None;
        match self.provider.slot_count() {
            0 => return,
            1 => {
                self.side = FlipSide::Front;
                self.front = self.provider.slot(0);
            }
            _ => {
                self.front = self.provider.slot(1);
                self.back = self.provider.slot(0);
            }
        }

        let depth = self.provider.display_density() * CAMERA_DISTANCE;
        let (shown, hidden) = match self.side {
            FlipSide::Front => (self.front, self.back),
            FlipSide::Back => (self.back, self.front),
        };
        for slot in [shown, hidden].into_iter().flatten() {
            self.provider.set_depth_hint(slot, depth);
        }
        if let Some(slot) = shown {
            self.provider.set_visibility(slot, Visibility::Visible);
        }
        if let Some(slot) = hidden {
            self.provider.set_visibility(slot, Visibility::Hidden);
        }
    }
}
