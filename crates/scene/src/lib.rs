//! Scene graph and components.
//!
//! This crate provides scene management:
//! - Transforms with an explicitly refreshed world matrix
//! - Perspective camera and orbit controller
//! - Light definitions and the directional light helper
//! - The scene container and property paths into its objects

pub mod camera;
pub mod error;
pub mod graph;
pub mod helper;
pub mod light;
pub mod object;
pub mod property;
pub mod transform;

pub use camera::{Camera, OrbitController, OrbitInput};
pub use error::{SceneError, SceneResult};
pub use graph::{Scene, SceneNode};
pub use helper::DirectionalLightHelper;
pub use light::{Light, LightKind};
pub use lightlab_resources::Color;
pub use object::{MeshObject, ObjectId, ObjectKind, SceneObject};
pub use property::{Axis, ColorProperty, ScalarProperty};
pub use transform::Transform;
