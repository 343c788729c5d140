//! Color and depth targets.
//!
//! Pixels are stored row-major from the top-left corner as tightly packed
//! RGBA8, so [`FrameBuffer::as_bytes`] can be uploaded or encoded directly.

use bytemuck::{Pod, Zeroable};
use lightlab_scene::Color;

use crate::{RenderError, RenderResult};

/// One RGBA8 pixel.
///
/// # Memory Layout
///
/// Four bytes in `r, g, b, a` order with no padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque pixel from a color, clamping each channel.
    pub fn from_color(color: Color) -> Self {
        let [r, g, b] = color.to_rgb8();
        Self::new(r, g, b, 255)
    }
}

/// Depth value of a cleared depth buffer (the far plane).
pub const DEPTH_CLEAR: f32 = 1.0;

/// Render target with a color buffer and a depth buffer of the same size.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    color: Vec<Rgba8>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::ZeroSizedTarget { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            color: vec![Rgba8::default(); len],
            depth: vec![DEPTH_CLEAR; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate both buffers. Contents are cleared to black.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        *self = Self::new(width, height)?;
        Ok(())
    }

    pub fn clear(&mut self, color: Color) {
        self.color.fill(Rgba8::from_color(color));
        self.depth.fill(DEPTH_CLEAR);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.index(x, y).map(|i| self.color[i])
    }

    pub fn depth(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Write a pixel if `depth` is nearer than what is stored.
    ///
    /// Depth is in `[0, 1]`, 0 at the near plane. Returns whether the pixel
    /// was written.
    pub fn write_depth_tested(&mut self, x: u32, y: u32, depth: f32, color: Rgba8) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if !(0.0..=1.0).contains(&depth) || depth >= self.depth[i] {
            return false;
        }
        self.depth[i] = depth;
        self.color[i] = color;
        true
    }

    /// Whether `depth` would pass the depth test at a pixel.
    pub fn depth_passes(&self, x: u32, y: u32, depth: f32) -> bool {
        self.index(x, y)
            .is_some_and(|i| (0.0..=1.0).contains(&depth) && depth < self.depth[i])
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.color
    }

    /// Color buffer as raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}
