//! Error taxonomy for the scene core.
//!
//! Construction-time validation fails fast with [`SceneError::InvalidConfiguration`].
//! Nothing here is ever allowed to escape a running frame tick: the scheduler
//! logs and skips animators that report an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("missing observation target: {0}")]
    MissingObservationTarget(String),
    #[error("animator `{0}` could not reach its scene node")]
    AnimatorUnavailable(&'static str),
    #[error("scene state is being updated, `{0}` is unavailable")]
    StateBusy(&'static str),
}

pub type Result<T> = std::result::Result<T, SceneError>;

#[inline]
pub(crate) fn invalid(msg: impl Into<String>) -> SceneError {
    SceneError::InvalidConfiguration(msg.into())
}
