//! Control panel errors.

use lightlab_scene::SceneError;
use thiserror::Error;

use crate::ControlId;

/// Errors raised while binding or writing controls.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("Unknown control {0:?}")]
    UnknownControl(ControlId),

    #[error("Control '{name}' is not a {expected} control")]
    KindMismatch { name: String, expected: &'static str },

    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    /// The bound object or property does not exist, or a listener failed
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for control operations.
pub type ControlResult<T> = std::result::Result<T, ControlError>;
