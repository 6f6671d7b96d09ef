//! Content slots hosted by a flip view and the provider that owns them.

use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;

use crate::transform::Transform;

/// Camera distance per unit of display density, in pixels
pub const CAMERA_DISTANCE: f32 = 8000.0;

/// Unique identifier for a content slot
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SlotId(u64);

static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(1);

impl SlotId {
    /// Generate a new unique slot ID
    pub fn next() -> Self {
        SlotId(NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// Animated visual state of a slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotTransform {
    /// Rotation around the horizontal axis, in degrees
    pub rotation_x: f32,
    /// Rotation around the vertical axis, in degrees
    pub rotation_y: f32,
    pub alpha: f32,
}

impl SlotTransform {
    /// Flat, fully opaque
    pub const IDENTITY: Self = Self {
        rotation_x: 0.0,
        rotation_y: 0.0,
        alpha: 1.0,
    };

    /// Projection matrix for a `width` x `height` slot rotating around its center,
    /// viewed from `camera_distance` (the slot's depth hint).
    pub fn to_matrix(&self, width: f32, height: f32, camera_distance: f32) -> Transform {
        let (cx, cy) = (width / 2.0, height / 2.0);
        Transform::translate(cx, cy)
            .then(&Transform::perspective(camera_distance))
            .then(&Transform::rotate_x_degrees(self.rotation_x))
            .then(&Transform::rotate_y_degrees(self.rotation_y))
            .then(&Transform::translate(-cx, -cy))
    }
}

impl Default for SlotTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Host container holding the (at most two) slots of a flip view.
///
/// Slots are stacked in insertion order; index 0 is the bottom of the stack.
pub trait ViewSlotProvider {
    fn slot_count(&self) -> usize;
    fn slot(&self, index: usize) -> Option<SlotId>;
    fn add_slot(&mut self, slot: SlotId);
    fn remove_all_slots(&mut self);
    fn set_visibility(&mut self, slot: SlotId, visibility: Visibility);
    /// Cosmetic perspective parameter (camera distance) for 3D rotation.
    fn set_depth_hint(&mut self, slot: SlotId, depth: f32);
    fn set_transform(&mut self, slot: SlotId, transform: SlotTransform);

    fn display_density(&self) -> f32 {
        1.0
    }
}

bitflags! {
    /// What changed on a slot since the host last looked
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct SlotChanges: u8 {
        const VISIBILITY = 0b001;
        const TRANSFORM  = 0b010;
        const DEPTH      = 0b100;
    }
}

/// State of one slot in a [`SlotStack`]
#[derive(Clone, Debug, PartialEq)]
pub struct SlotState {
    pub id: SlotId,
    pub visibility: Visibility,
    pub depth_hint: f32,
    pub transform: SlotTransform,
    changes: SlotChanges,
}

/// In-memory [`ViewSlotProvider`] that records what the controller asked for.
///
/// Hosts read the recorded state when painting and use
/// [`SlotStack::take_changes`] to find slots that need a repaint.
#[derive(Debug)]
pub struct SlotStack {
    slots: Vec<SlotState>,
    density: f32,
}

impl SlotStack {
    pub fn new() -> Self {
        Self::with_density(1.0)
    }

    pub fn with_density(density: f32) -> Self {
        Self {
            slots: Vec::new(),
            density,
        }
    }

    pub fn get(&self, slot: SlotId) -> Option<&SlotState> {
        self.slots.iter().find(|s| s.id == slot)
    }

    pub fn visibility(&self, slot: SlotId) -> Option<Visibility> {
        self.get(slot).map(|s| s.visibility)
    }

    pub fn transform(&self, slot: SlotId) -> Option<SlotTransform> {
        self.get(slot).map(|s| s.transform)
    }

    pub fn depth_hint(&self, slot: SlotId) -> Option<f32> {
        self.get(slot).map(|s| s.depth_hint)
    }

    /// Return and clear the change flags of a slot.
    pub fn take_changes(&mut self, slot: SlotId) -> SlotChanges {
        self.get_mut(slot)
            .map(|s| std::mem::take(&mut s.changes))
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotState> {
        self.slots.iter()
    }

    fn get_mut(&mut self, slot: SlotId) -> Option<&mut SlotState> {
        self.slots.iter_mut().find(|s| s.id == slot)
    }
}

impl Default for SlotStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewSlotProvider for SlotStack {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, index: usize) -> Option<SlotId> {
        self.slots.get(index).map(|s| s.id)
    }

    fn add_slot(&mut self, slot: SlotId) {
        self.slots.push(SlotState {
            id: slot,
            visibility: Visibility::Visible,
            depth_hint: 0.0,
            transform: SlotTransform::IDENTITY,
            changes: SlotChanges::all(),
        });
    }

    fn remove_all_slots(&mut self) {
        self.slots.clear();
    }

    fn set_visibility(&mut self, slot: SlotId, visibility: Visibility) {
        if let Some(state) = self.get_mut(slot) {
            if state.visibility != visibility {
                state.visibility = visibility;
                state.changes |= SlotChanges::VISIBILITY;
            }
        }
    }

    fn set_depth_hint(&mut self, slot: SlotId, depth: f32) {
        if let Some(state) = self.get_mut(slot) {
            state.depth_hint = depth;
            state.changes |= SlotChanges::DEPTH;
        }
    }

    fn set_transform(&mut self, slot: SlotId, transform: SlotTransform) {
        if let Some(state) = self.get_mut(slot) {
            if state.transform != transform {
                state.transform = transform;
                state.changes |= SlotChanges::TRANSFORM;
            }
        }
    }

    fn display_density(&self) -> f32 {
        self.density
    }
}
