//! Interpolators for flip sub-steps.
//!
//! A timing function maps linear progress `t` in `[0, 1]` to eased progress.
//! The built-in flip animations rotate with
//! [`TimingFunction::AccelerateDecelerate`] and switch alpha instantly, so the
//! curve only matters for the rotating step.

use std::f32::consts::PI;
use std::sync::Arc;

/// Easing curve applied to a sub-step's progress
#[derive(Clone, Default)]
pub enum TimingFunction {
    /// Constant speed
    #[default]
    Linear,
    /// Starts slow, ends fast
    Accelerate,
    /// Starts fast, ends slow
    Decelerate,
    /// Slow at both ends, fastest at the midpoint (cosine curve)
    AccelerateDecelerate,
    /// User-defined curve
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl TimingFunction {
    /// Evaluate the curve at `t`, clamped to `[0, 1]`. The endpoints are exact.
    pub fn evaluate(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            TimingFunction::Linear => t,
            TimingFunction::Accelerate => t * t,
            TimingFunction::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            TimingFunction::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            TimingFunction::Custom(f) => f(t),
        }
    }

    /// Create a custom timing function from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::Accelerate => write!(f, "Accelerate"),
            TimingFunction::Decelerate => write!(f, "Decelerate"),
            TimingFunction::AccelerateDecelerate => write!(f, "AccelerateDecelerate"),
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}
