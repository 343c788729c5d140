//! Scene rendering.
//!
//! This crate turns a [`Scene`] seen through a [`Camera`] into pixels:
//! - Near-plane clipping and edge-function triangle rasterization
//! - Depth-tested Bresenham lines for light helpers
//! - Basic and Phong shading with ambient, hemisphere and directional lights
//! - An RGBA8 frame buffer ready for upload or encoding

mod error;
pub mod framebuffer;
pub mod raster;
pub mod shading;
mod software;

use lightlab_scene::{Camera, Scene};

pub use error::{RenderError, RenderResult};
pub use framebuffer::{FrameBuffer, Rgba8};
pub use software::{RenderStats, SoftwareRenderer};

/// Draws scenes.
pub trait SceneRenderer {
    /// Resize the drawing target, in physical pixels.
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Draw one frame of `scene` as seen from `camera`.
    fn render(&mut self, scene: &Scene, camera: &Camera) -> RenderResult<()>;
}
