//! Error types shared across lightlab crates.

use thiserror::Error;

/// Main error type for lightlab.
#[derive(Error, Debug)]
pub enum Error {
    /// Window creation or surface errors
    #[error("Window error: {0}")]
    Window(String),

    /// Rendering or presentation errors
    #[error("Render error: {0}")]
    Render(String),

    /// Asset loading errors
    #[error("Resource error: {0}")]
    Resource(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using lightlab's Error type.
pub type Result<T> = std::result::Result<T, Error>;
