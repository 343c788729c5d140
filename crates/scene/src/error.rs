//! Error types for scene access.

use thiserror::Error;

use crate::ObjectId;

/// Error type for scene lookups and property access.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// No object with this id was ever added.
    #[error("Unknown object {0}")]
    UnknownObject(ObjectId),

    /// The object exists but has no such property.
    #[error("Object {object} has no property '{property}'")]
    MissingProperty {
        /// Object that was addressed.
        object: ObjectId,
        /// Property name.
        property: &'static str,
    },

    /// The object was expected to be a light.
    #[error("Object {0} is not a light")]
    NotALight(ObjectId),

    /// The object was expected to be a light helper.
    #[error("Object {0} is not a light helper")]
    NotAHelper(ObjectId),

    /// A directional light points at an object that does not exist.
    #[error("Light {light} targets missing object {target}")]
    MissingTarget {
        /// The light.
        light: ObjectId,
        /// Its dangling target.
        target: ObjectId,
    },
}

/// Result type alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
