//! Pointer gesture recognition for tap-to-flip.
//!
//! [`TapDetector`] turns raw pointer events into [`Gesture`]s. Only
//! [`Gesture::Tap`] flips a view; drags and flings are reported so the host
//! can route them elsewhere.

use std::time::{Duration, Instant};

/// Movement in logical pixels before a press stops counting as a tap
pub const TOUCH_SLOP: f32 = 8.0;
/// Presses held longer than this are not taps
pub const TAP_TIMEOUT: Duration = Duration::from_millis(500);
/// Release speed in logical pixels per second above which a drag is a fling
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Raw pointer input in view coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Cancel,
}

/// Recognised gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// A press started
    Down,
    /// A short press released in place
    Tap,
    /// The pointer moved past the touch slop (offset from the press point)
    Drag { dx: f32, dy: f32 },
    /// A drag released at speed (pixels per second)
    Fling { velocity_x: f32, velocity_y: f32 },
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: (f32, f32),
    pressed_at: Instant,
    last: (f32, f32),
    last_at: Instant,
    dragging: bool,
}

#[derive(Debug)]
pub struct TapDetector {
    density: f32,
    press: Option<Press>,
}

impl TapDetector {
    pub fn new() -> Self {
        Self::with_density(1.0)
    }

    /// Thresholds are scaled by `density` to stay constant in physical size.
    pub fn with_density(density: f32) -> Self {
        Self {
            density,
            press: None,
        }
    }

    pub fn feed(&mut self, event: PointerEvent, at: Instant) -> Option<Gesture> {
        match event {
            PointerEvent::Down { x, y } => {
                self.press = Some(Press {
                    origin: (x, y),
                    pressed_at: at,
                    last: (x, y),
                    last_at: at,
                    dragging: false,
                });
                Some(Gesture::Down)
            }
            PointerEvent::Move { x, y } => {
                let slop = TOUCH_SLOP * self.density;
                let press = self.press.as_mut()?;
                press.last = (x, y);
                press.last_at = at;
                if !press.dragging && distance(press.origin, (x, y)) > slop {
                    press.dragging = true;
                }
                press.dragging.then(|| Gesture::Drag {
                    dx: x - press.origin.0,
                    dy: y - press.origin.1,
                })
            }
            PointerEvent::Up { x, y } => {
                let press = self.press.take()?;
                if !press.dragging && distance(press.origin, (x, y)) <= TOUCH_SLOP * self.density
                {
                    let held = at.saturating_duration_since(press.pressed_at);
                    return (held <= TAP_TIMEOUT).then_some(Gesture::Tap);
                }
                Some(self.release(press, (x, y), at))
            }
            PointerEvent::Cancel => {
                self.press = None;
                None
            }
        }
    }

    fn release(&self, press: Press, (x, y): (f32, f32), at: Instant) -> Gesture {
        // Velocity over the last segment, or the whole press if the pointer
        // was released without a final move
        let (from, since) = if at > press.last_at {
            (press.last, press.last_at)
        } else {
            (press.origin, press.pressed_at)
        };
        let secs = at.saturating_duration_since(since).as_secs_f32();
        if secs > 0.0 {
            let velocity_x = (x - from.0) / secs;
            let velocity_y = (y - from.1) / secs;
            if velocity_x.hypot(velocity_y) >= MIN_FLING_VELOCITY * self.density {
                return Gesture::Fling {
                    velocity_x,
                    velocity_y,
                };
            }
        }
        Gesture::Drag {
            dx: x - press.origin.0,
            dy: y - press.origin.1,
        }
    }
}

impl Default for TapDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    (b.0 - a.0).hypot(b.1 - a.1)
}
