use thiserror::Error;

use crate::flip::{FlipAxis, OriginEdge};

/// Errors raised while binding slots or configuring a flip view.
///
/// Rejected flips are not errors: `trigger()` on a busy, disabled or
/// exhausted view simply does nothing.
#[derive(Error, Debug)]
pub enum FlipError {
    #[error("a flip view hosts at most two slots, got {slots}")]
    StructuralViolation { slots: usize },
    #[error("no flip animations found for {axis:?} axis from {edge:?}")]
    MissingAnimationResources { axis: FlipAxis, edge: OriginEdge },
    #[error("invalid flip configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown flip attribute '{0}'")]
    UnknownAttribute(String),
    #[error("invalid value '{value}' for flip attribute '{key}'")]
    InvalidAttribute { key: String, value: String },
    #[error("event loop error: {0}")]
    EventLoop(#[from] calloop::Error),
}

pub type Result<T> = std::result::Result<T, FlipError>;
