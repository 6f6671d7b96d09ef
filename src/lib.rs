//! A two-sided flip card.
//!
//! A flip view hosts exactly two stacked slots, front and back, and turns
//! between them with a 3D-style flip around the horizontal or vertical axis.
//! [`flip::FlipController`] owns the current side and the pair of animation
//! handles that play each flip; the host supplies the slots through
//! [`slots::ViewSlotProvider`] and drives frames, either itself via
//! [`flip::FlipController::advance`] or with [`runtime::FlipLoop`].

pub mod animation;
pub mod error;
pub mod flip;
pub mod gesture;
pub mod runtime;
pub mod slots;
pub mod transform;

pub use error::{FlipError, Result};

pub mod prelude {
    pub use crate::animation::{AnimationEngine, AnimationLibrary, TimingFunction};
    pub use crate::error::{FlipError, Result};
    pub use crate::flip::{
        AnimationPair, FlipAttributes, FlipAxis, FlipConfig, FlipController, FlipSide, OriginEdge,
    };
    pub use crate::gesture::{Gesture, PointerEvent, TapDetector};
    pub use crate::runtime::FlipLoop;
    pub use crate::slots::{
        SlotChanges, SlotId, SlotStack, SlotTransform, ViewSlotProvider, Visibility,
    };
    pub use crate::transform::Transform;
}
