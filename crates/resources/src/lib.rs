//! Resource definitions and loading.
//!
//! This crate handles the data meshes are built from:
//! - Procedural geometry (plane, box, sphere)
//! - Materials and colors
//! - Textures and asynchronous image loading

pub mod color;
pub mod error;
pub mod geometry;
pub mod material;
pub mod texture;

pub use color::Color;
pub use error::{ResourceError, ResourceResult};
pub use geometry::Geometry;
pub use material::{Material, MaterialKind, Side};
pub use texture::{ColorSpace, Filter, Texture, TextureImage, TextureLoader, Wrapping};
