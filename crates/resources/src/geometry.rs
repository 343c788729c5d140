//! Procedural geometry.
//!
//! All generators produce indexed triangle lists with counter-clockwise
//! front faces, per-vertex normals and texture coordinates with `v = 1` at
//! the top edge.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

/// Indexed triangle geometry.
#[derive(Debug, Default, Clone)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// A `width` x `height` rectangle in the XY plane facing +Z.
    pub fn plane(width: f32, height: f32) -> Self {
        Self::plane_segments(width, height, 1, 1)
    }

    /// A subdivided rectangle in the XY plane facing +Z.
    pub fn plane_segments(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let mut geometry = Self::default();
        geometry.push_grid(
            GridFace {
                axes: (0, 1, 2),
                u_dir: 1.0,
                v_dir: -1.0,
                width,
                height,
                depth: 0.0,
                normal_sign: 1.0,
            },
            width_segments.max(1),
            height_segments.max(1),
        );
        geometry
    }

    /// An axis-aligned box centered on the origin, one grid per face.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let mut geometry = Self::default();
        // (u, v, w) axes, u/v directions, face extents along u/v, offset along w
        let faces = [
            ((2, 1, 0), -1.0, -1.0, depth, height, width, 1.0),
            ((2, 1, 0), 1.0, -1.0, depth, height, width, -1.0),
            ((0, 2, 1), 1.0, 1.0, width, depth, height, 1.0),
            ((0, 2, 1), 1.0, -1.0, width, depth, height, -1.0),
            ((0, 1, 2), 1.0, -1.0, width, height, depth, 1.0),
            ((0, 1, 2), -1.0, -1.0, width, height, depth, -1.0),
        ];
        for (axes, u_dir, v_dir, face_w, face_h, extent, sign) in faces {
            geometry.push_grid(
                GridFace {
                    axes,
                    u_dir,
                    v_dir,
                    width: face_w,
                    height: face_h,
                    depth: extent * sign,
                    normal_sign: sign,
                },
                1,
                1,
            );
        }
        geometry
    }

    /// A UV sphere centered on the origin.
    ///
    /// The pole rows get their `u` shifted by half a segment so the seam
    /// triangles sample the middle of their texel column.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);
        let mut geometry = Self::default();
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let u_offset = if iy == 0 {
                0.5 / width_segments as f32
            } else if iy == height_segments {
                -0.5 / width_segments as f32
            } else {
                0.0
            };

            let mut row = Vec::with_capacity(width_segments as usize + 1);
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let (sin_theta, cos_theta) = (v * PI).sin_cos();
                let (sin_phi, cos_phi) = (u * 2.0 * PI).sin_cos();
                let position = Vec3::new(
                    -radius * cos_phi * sin_theta,
                    radius * cos_theta,
                    radius * sin_phi * sin_theta,
                );

                row.push(geometry.positions.len() as u32);
                geometry.positions.push(position);
                geometry.normals.push(position.normalize_or_zero());
                geometry.uvs.push(Vec2::new(u + u_offset, 1.0 - v));
            }
            grid.push(row);
        }

        for iy in 0..height_segments as usize {
            for ix in 0..width_segments as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];

                if iy != 0 {
                    geometry.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments as usize - 1 {
                    geometry.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        geometry
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as vertex index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Axis-aligned bounds, `None` for empty geometry.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    fn push_grid(&mut self, face: GridFace, grid_x: u32, grid_y: u32) {
        let (u, v, w) = face.axes;
        let segment_w = face.width / grid_x as f32;
        let segment_h = face.height / grid_y as f32;
        let half_w = face.width / 2.0;
        let half_h = face.height / 2.0;
        let half_d = face.depth / 2.0;
        let base = self.positions.len() as u32;

        for iy in 0..=grid_y {
            let y = iy as f32 * segment_h - half_h;
            for ix in 0..=grid_x {
                let x = ix as f32 * segment_w - half_w;

                let mut position = Vec3::ZERO;
                position[u] = x * face.u_dir;
                position[v] = y * face.v_dir;
                position[w] = half_d;

                let mut normal = Vec3::ZERO;
                normal[w] = face.normal_sign;

                self.positions.push(position);
                self.normals.push(normal);
                self.uvs.push(Vec2::new(
                    ix as f32 / grid_x as f32,
                    1.0 - iy as f32 / grid_y as f32,
                ));
            }
        }

        let stride = grid_x + 1;
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = base + ix + stride * iy;
                let b = base + ix + stride * (iy + 1);
                let c = base + ix + 1 + stride * (iy + 1);
                let d = base + ix + 1 + stride * iy;
                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
    }
}

struct GridFace {
    axes: (usize, usize, usize),
    u_dir: f32,
    v_dir: f32,
    width: f32,
    height: f32,
    depth: f32,
    normal_sign: f32,
}
