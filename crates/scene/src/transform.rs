//! Transform component for scene objects.
//!
//! A [`Transform`] holds position, rotation and scale, plus a cached world
//! matrix. Editing the fields does not touch the cache; it is refreshed only
//! by [`Transform::update_matrix_world`]. Consumers that snapshot world
//! state (the light helper) read the cache, so they see edits only after an
//! explicit refresh.
//!
//! # Example
//!
//! ```
//! use lightlab_scene::Transform;
//! use glam::Vec3;
//!
//! let mut t = Transform::new().with_position(Vec3::new(1.0, 2.0, 3.0));
//! assert_eq!(t.world_position(), Vec3::new(1.0, 2.0, 3.0));
//!
//! t.position.x = 5.0;
//! // Cached matrix still holds the old position.
//! assert_eq!(t.world_position().x, 1.0);
//! t.update_matrix_world();
//! assert_eq!(t.world_position().x, 5.0);
//! ```

use glam::{Mat4, Quat, Vec3};

/// Position, rotation and scale with a cached world matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    matrix_world: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            matrix_world: Mat4::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the position and refresh the world matrix.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self.update_matrix_world();
        self
    }

    /// Builder: set the rotation and refresh the world matrix.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self.update_matrix_world();
        self
    }

    /// Builder: set the scale and refresh the world matrix.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self.update_matrix_world();
        self
    }

    /// Matrix built from the current fields.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Recompute the cached world matrix from the current fields.
    pub fn update_matrix_world(&mut self) {
        self.matrix_world = self.local_matrix();
    }

    /// Cached world matrix as of the last refresh.
    pub fn matrix_world(&self) -> Mat4 {
        self.matrix_world
    }

    /// Translation part of the cached world matrix.
    pub fn world_position(&self) -> Vec3 {
        self.matrix_world.w_axis.truncate()
    }

    /// Inverse transpose of the current local matrix, for normals.
    ///
    /// Falls back to identity when the matrix is singular (zero scale).
    pub fn normal_matrix(&self) -> Mat4 {
        const EPSILON: f32 = 1e-6;
        let model = self.local_matrix();
        if model.determinant().abs() < EPSILON {
            Mat4::IDENTITY
        } else {
            model.inverse().transpose()
        }
    }

    /// Euler rotation about X, the way the ground plane is laid flat.
    pub fn set_rotation_x(&mut self, radians: f32) {
        self.rotation = Quat::from_rotation_x(radians);
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}
