//! Perspective camera and orbit controls.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Quat, Vec2, Vec3};

/// A perspective camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Camera rotation; looks down local -Z
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            rotation: Quat::IDENTITY,
            fov_y: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Create a perspective camera; `fov_y_degrees` is the vertical field of view.
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
            ..Self::default()
        }
    }

    /// Update the aspect ratio from a viewport size.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// OpenGL-style projection, NDC z in [-1, 1], y up.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Turn to face `target`, keeping world +Y as up.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = target - self.position;
        if forward.length_squared() <= f32::EPSILON {
            return;
        }
        let forward = forward.normalize();
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        // look_at_rh builds the view matrix; the camera rotation is its inverse.
        let view = Mat4::look_at_rh(self.position, self.position + forward, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        self.rotation = rotation.normalize();
    }
}

/// Pointer input gathered since the previous frame, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitInput {
    /// Drag distance with the rotate button held
    pub rotate: Vec2,
    /// Drag distance with the pan button held
    pub pan: Vec2,
    /// Wheel steps; positive zooms in
    pub zoom: f32,
    /// Viewport height used to scale drags into angles
    pub viewport_height: f32,
}

impl OrbitInput {
    /// No movement of any kind.
    pub fn is_idle(&self) -> bool {
        self.rotate == Vec2::ZERO && self.pan == Vec2::ZERO && self.zoom == 0.0
    }
}

/// Orbits a camera around a target point.
///
/// Left drag rotates, right drag pans, the wheel dollies in and out.
/// Idle frames leave the camera untouched.
#[derive(Clone, Debug)]
pub struct OrbitController {
    target: Vec3,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Needs to re-aim the camera on the next update
    dirty: bool,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            dirty: true,
        }
    }
}

impl OrbitController {
    /// Polar angle limit keeping the camera off the poles.
    const POLE_EPSILON: f32 = 1e-6;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Set the orbit center; the camera turns to it on the next update.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.dirty = true;
    }

    /// Reconcile the camera with input since the last frame.
    ///
    /// Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera, input: &OrbitInput) -> bool {
        if input.is_idle() && !self.dirty {
            return false;
        }
        self.dirty = false;

        let height = input.viewport_height.max(1.0);
        let offset = camera.position - self.target;
        let mut radius = offset.length();
        // Azimuth around +Y measured from +Z, polar angle from +Y.
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        theta -= TAU * input.rotate.x / height * self.rotate_speed;
        phi -= TAU * input.rotate.y / height * self.rotate_speed;
        phi = phi.clamp(Self::POLE_EPSILON, PI - Self::POLE_EPSILON);

        if input.zoom != 0.0 {
            let scale = 0.95_f32.powf(self.zoom_speed * input.zoom.abs());
            radius = if input.zoom > 0.0 { radius * scale } else { radius / scale };
        }
        radius = radius.clamp(self.min_distance, self.max_distance);

        if input.pan != Vec2::ZERO {
            // Pan so the point under the cursor stays under the cursor at target depth.
            let world_per_pixel = 2.0 * radius * (camera.fov_y / 2.0).tan() / height;
            let shift = (-camera.right() * input.pan.x + camera.up() * input.pan.y)
                * world_per_pixel
                * self.pan_speed;
            self.target += shift;
        }

        let offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.position = self.target + offset;
        camera.look_at(self.target);
        true
    }
}
