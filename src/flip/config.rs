use crate::error::{FlipError, Result};

pub const DEFAULT_FLIP_DURATION_MS: i32 = 400;
pub const DEFAULT_AUTO_FLIP_BACK_MS: i32 = 1000;

/// Axis the card turns around
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FlipAxis {
    Horizontal,
    #[default]
    Vertical,
}

/// Edge the flip visually starts from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OriginEdge {
    /// Horizontal flips only
    Left,
    /// Horizontal flips only
    Right,
    /// Vertical flips only
    Top,
    /// Vertical flips only
    Front,
}

impl OriginEdge {
    /// Whether this edge is meaningful for `axis`
    pub fn fits(self, axis: FlipAxis) -> bool {
        match axis {
            FlipAxis::Horizontal => matches!(self, OriginEdge::Left | OriginEdge::Right),
            FlipAxis::Vertical => matches!(self, OriginEdge::Top | OriginEdge::Front),
        }
    }
}

/// Behaviour of a flip view.
///
/// Built with chainable setters and applied through
/// [`FlipController::configure`](super::FlipController::configure), which
/// validates it.
#[derive(Clone, Debug, PartialEq)]
pub struct FlipConfig {
    pub axis: FlipAxis,
    pub origin_edge: OriginEdge,
    pub duration_ms: i32,
    /// Flip when the view is tapped
    pub trigger_on_gesture: bool,
    /// When false, `trigger()` does nothing
    pub enabled: bool,
    /// Once the back is showing, never flip again
    pub flip_once: bool,
    /// Flip back to the front automatically after showing the back
    pub auto_flip_back: bool,
    pub auto_flip_back_delay_ms: i32,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            axis: FlipAxis::Vertical,
            origin_edge: OriginEdge::Top,
            duration_ms: DEFAULT_FLIP_DURATION_MS,
            trigger_on_gesture: true,
            enabled: true,
            flip_once: false,
            auto_flip_back: false,
            auto_flip_back_delay_ms: DEFAULT_AUTO_FLIP_BACK_MS,
        }
    }
}

impl FlipConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set axis and origin edge together
    pub fn direction(mut self, axis: FlipAxis, origin_edge: OriginEdge) -> Self {
        self.axis = axis;
        self.origin_edge = origin_edge;
        self
    }

    pub fn duration_ms(mut self, duration_ms: i32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn trigger_on_gesture(mut self, trigger_on_gesture: bool) -> Self {
        self.trigger_on_gesture = trigger_on_gesture;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn flip_once(mut self, flip_once: bool) -> Self {
        self.flip_once = flip_once;
        self
    }

    pub fn auto_flip_back(mut self, auto_flip_back: bool) -> Self {
        self.auto_flip_back = auto_flip_back;
        self
    }

    pub fn auto_flip_back_delay_ms(mut self, delay_ms: i32) -> Self {
        self.auto_flip_back_delay_ms = delay_ms;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.duration_ms < 0 {
            return Err(FlipError::InvalidConfig(format!(
                "flip duration must not be negative, got {}ms",
                self.duration_ms
            )));
        }
        if self.auto_flip_back_delay_ms < 0 {
            return Err(FlipError::InvalidConfig(format!(
                "auto flip back delay must not be negative, got {}ms",
                self.auto_flip_back_delay_ms
            )));
        }
        if !self.origin_edge.fits(self.axis) {
            return Err(FlipError::InvalidConfig(format!(
                "origin edge {:?} does not apply to the {:?} axis",
                self.origin_edge, self.axis
            )));
        }
        Ok(())
    }
}
