//! Renderer errors.

use lightlab_scene::SceneError;
use thiserror::Error;

/// Errors raised while drawing a frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Render target must be non-zero, got {width}x{height}")]
    ZeroSizedTarget { width: u32, height: u32 },

    /// The scene refers to an object that is missing or of the wrong kind
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

impl From<RenderError> for lightlab_core::Error {
    fn from(err: RenderError) -> Self {
        lightlab_core::Error::Render(err.to_string())
    }
}
