//! Software scene renderer.

use glam::{Mat3, Mat4, Vec3};
use lightlab_scene::{Camera, Color, DirectionalLightHelper, MeshObject, Scene, SceneObject};
use tracing::{debug, info, trace};

use crate::framebuffer::{FrameBuffer, Rgba8};
use crate::raster::{ClipVertex, Fragment, rasterize_line, rasterize_triangle};
use crate::shading::{Lighting, SurfacePoint, shade};
use crate::{RenderResult, SceneRenderer};

/// Counters for the last rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub meshes: usize,
    pub triangles: usize,
    pub fragments: usize,
    pub line_pixels: usize,
}

/// Draws a scene into an in-memory [`FrameBuffer`].
#[derive(Debug)]
pub struct SoftwareRenderer {
    target: FrameBuffer,
    stats: RenderStats,
    frames_rendered: u64,
}

impl SoftwareRenderer {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        info!("Software renderer: {}x{}", width, height);
        Ok(Self {
            target: FrameBuffer::new(width, height)?,
            stats: RenderStats::default(),
            frames_rendered: 0,
        })
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.target
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    fn draw_mesh(
        &mut self,
        mesh: &MeshObject,
        view_projection: Mat4,
        lighting: &Lighting,
        eye: Vec3,
    ) {
        let model = mesh.transform.local_matrix();
        let normal_matrix = Mat3::from_mat4(mesh.transform.normal_matrix());
        let mvp = view_projection * model;
        let geometry = &mesh.geometry;

        let vertices: Vec<ClipVertex> = (0..geometry.vertex_count())
            .map(|i| {
                let position = geometry.positions[i];
                ClipVertex {
                    clip: mvp * position.extend(1.0),
                    world: model.transform_point3(position),
                    normal: normal_matrix * geometry.normals[i],
                    uv: geometry.uvs[i],
                }
            })
            .collect();

        let (width, height) = (self.target.width(), self.target.height());
        let material = &mesh.material;
        let target = &mut self.target;
        let mut fragments = 0;
        let mut emit = |fragment: &Fragment| {
            if !target.depth_passes(fragment.x, fragment.y, fragment.depth) {
                return;
            }
            let point = SurfacePoint {
                position: fragment.world,
                normal: fragment.normal,
                uv: fragment.uv,
                front_facing: fragment.front_facing,
            };
            let color = shade(material, lighting, &point, eye);
            let pixel = Rgba8::from_color(Color::from_vec3(color));
            target.write_depth_tested(fragment.x, fragment.y, fragment.depth, pixel);
        };

        for [a, b, c] in geometry.triangles() {
            let triangle = [vertices[a], vertices[b], vertices[c]];
            fragments += rasterize_triangle(&triangle, width, height, material.side, &mut emit);
        }

        self.stats.meshes += 1;
        self.stats.triangles += geometry.triangle_count();
        self.stats.fragments += fragments;
    }

    fn draw_helper(&mut self, helper: &DirectionalLightHelper, view_projection: Mat4) {
        let (width, height) = (self.target.width(), self.target.height());
        let pixel = Rgba8::from_color(helper.line_color());
        let target = &mut self.target;
        let mut emit = |x: u32, y: u32, depth: f32| {
            target.write_depth_tested(x, y, depth, pixel);
        };

        for (start, end) in helper.segments() {
            self.stats.line_pixels += rasterize_line(
                view_projection * start.extend(1.0),
                view_projection * end.extend(1.0),
                width,
                height,
                &mut emit,
            );
        }
    }
}

impl SceneRenderer for SoftwareRenderer {
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        debug!("Resizing render target to {}x{}", width, height);
        self.target.resize(width, height)
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> RenderResult<()> {
        self.stats = RenderStats::default();
        self.target.clear(scene.background);

        let lighting = Lighting::gather(scene)?;
        let view_projection = camera.view_projection_matrix();

        for (_, node) in scene.iter() {
            match &node.object {
                SceneObject::Mesh(mesh) => {
                    self.draw_mesh(mesh, view_projection, &lighting, camera.position)
                }
                SceneObject::LightHelper(helper) => self.draw_helper(helper, view_projection),
                SceneObject::Light(_) | SceneObject::Empty(_) => {}
            }
        }

        self.frames_rendered += 1;
        trace!("Frame {} rendered: {:?}", self.frames_rendered, self.stats);
        Ok(())
    }
}
