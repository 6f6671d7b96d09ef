//! The flip state machine and its configuration.

mod attributes;
mod config;
mod controller;
mod pair;

pub use attributes::FlipAttributes;
pub use config::{
    FlipAxis, FlipConfig, OriginEdge, DEFAULT_AUTO_FLIP_BACK_MS, DEFAULT_FLIP_DURATION_MS,
};
pub use controller::{FlipCallback, FlipController};
pub use pair::AnimationPair;

/// Which slot is currently shown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FlipSide {
    #[default]
    Front,
    Back,
}

impl FlipSide {
    /// The other side
    pub fn flipped(self) -> Self {
        match self {
            FlipSide::Front => FlipSide::Back,
            FlipSide::Back => FlipSide::Front,
        }
    }
}
