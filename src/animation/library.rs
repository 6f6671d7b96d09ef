use std::collections::HashMap;

use super::{AnimatorSet, Property, PropertyAnimator, TimingFunction, Transition};
use crate::error::{FlipError, Result};
use crate::flip::{AnimationPair, FlipAxis, OriginEdge, DEFAULT_FLIP_DURATION_MS};

/// Source of the animation handles a flip view plays.
pub trait AnimationEngine {
    /// Load a fresh, idle pair for the given flip direction.
    fn load_pair(&self, axis: FlipAxis, edge: OriginEdge) -> Result<AnimationPair>;
}

/// Registry of animation pairs keyed by flip direction.
///
/// [`AnimationLibrary::builtin`] (also the `Default`) carries one pair for
/// every axis and origin edge combination.
#[derive(Clone, Debug)]
pub struct AnimationLibrary {
    pairs: HashMap<(FlipAxis, OriginEdge), AnimationPair>,
}

impl AnimationLibrary {
    /// A library with no animations registered
    pub fn empty() -> Self {
        Self {
            pairs: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut library = Self::empty();
        for (axis, edge) in [
            (FlipAxis::Horizontal, OriginEdge::Left),
            (FlipAxis::Horizontal, OriginEdge::Right),
            (FlipAxis::Vertical, OriginEdge::Top),
            (FlipAxis::Vertical, OriginEdge::Front),
        ] {
            library.register(axis, edge, builtin_pair(axis, edge));
        }
        library
    }

    /// Register (or replace) the pair for a direction.
    pub fn register(&mut self, axis: FlipAxis, edge: OriginEdge, pair: AnimationPair) {
        self.pairs.insert((axis, edge), pair);
    }

    pub fn remove(&mut self, axis: FlipAxis, edge: OriginEdge) -> Option<AnimationPair> {
        self.pairs.remove(&(axis, edge))
    }

    pub fn contains(&self, axis: FlipAxis, edge: OriginEdge) -> bool {
        self.pairs.contains_key(&(axis, edge))
    }
}

impl Default for AnimationLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AnimationEngine for AnimationLibrary {
    fn load_pair(&self, axis: FlipAxis, edge: OriginEdge) -> Result<AnimationPair> {
        self.pairs
            .get(&(axis, edge))
            .map(AnimationPair::idle_copy)
            .ok_or(FlipError::MissingAnimationResources { axis, edge })
    }
}

fn builtin_pair(axis: FlipAxis, edge: OriginEdge) -> AnimationPair {
    let duration = DEFAULT_FLIP_DURATION_MS as u64;
    let property = match axis {
        FlipAxis::Horizontal => Property::RotationY,
        FlipAxis::Vertical => Property::RotationX,
    };
    // Left and Top turn towards +180, Right and Front towards -180
    let turn = match edge {
        OriginEdge::Left | OriginEdge::Top => 180.0,
        OriginEdge::Right | OriginEdge::Front => -180.0,
    };
    AnimationPair::new(
        flip_out(property, turn, duration),
        flip_in(property, -turn, duration),
    )
}

/// `[rotate 0 -> turn, hide at half time]`
fn flip_out(property: Property, turn: f32, duration: u64) -> AnimatorSet {
    AnimatorSet::new(vec![
        PropertyAnimator::new(property, 0.0, turn)
            .transition(Transition::new(duration, TimingFunction::AccelerateDecelerate)),
        PropertyAnimator::new(Property::Alpha, 1.0, 0.0)
            .transition(Transition::instant().delay(duration / 2)),
    ])
}

/// `[hide, rotate from -> 0, reveal at half time]`
fn flip_in(property: Property, from: f32, duration: u64) -> AnimatorSet {
    AnimatorSet::new(vec![
        PropertyAnimator::new(Property::Alpha, 1.0, 0.0),
        PropertyAnimator::new(property, from, 0.0)
            .transition(Transition::new(duration, TimingFunction::AccelerateDecelerate)),
        PropertyAnimator::new(Property::Alpha, 0.0, 1.0)
            .transition(Transition::instant().delay(duration / 2)),
    ])
}
