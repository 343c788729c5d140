//! Scene object variants.

use std::fmt;
use std::sync::Arc;

use lightlab_resources::{Geometry, Material};

use crate::{DirectionalLightHelper, Light, Transform};

/// Stable handle to an object in a [`Scene`](crate::Scene).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geometry paired with a material.
#[derive(Clone, Debug)]
pub struct MeshObject {
    pub geometry: Arc<Geometry>,
    pub material: Material,
    pub transform: Transform,
}

impl MeshObject {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry: Arc::new(geometry),
            material,
            transform: Transform::new(),
        }
    }
}

/// Everything a scene can hold.
#[derive(Clone, Debug)]
pub enum SceneObject {
    Mesh(MeshObject),
    Light(Light),
    /// An invisible positioned object, e.g. a light target
    Empty(Transform),
    LightHelper(DirectionalLightHelper),
}

/// Discriminant of [`SceneObject`], for counting and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Mesh,
    Light,
    Empty,
    LightHelper,
}

impl SceneObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SceneObject::Mesh(_) => ObjectKind::Mesh,
            SceneObject::Light(_) => ObjectKind::Light,
            SceneObject::Empty(_) => ObjectKind::Empty,
            SceneObject::LightHelper(_) => ObjectKind::LightHelper,
        }
    }

    /// Transform of positioned objects; helpers are drawn in world space.
    pub fn transform(&self) -> Option<&Transform> {
        match self {
            SceneObject::Mesh(mesh) => Some(&mesh.transform),
            SceneObject::Light(light) => Some(&light.transform),
            SceneObject::Empty(transform) => Some(transform),
            SceneObject::LightHelper(_) => None,
        }
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        match self {
            SceneObject::Mesh(mesh) => Some(&mut mesh.transform),
            SceneObject::Light(light) => Some(&mut light.transform),
            SceneObject::Empty(transform) => Some(transform),
            SceneObject::LightHelper(_) => None,
        }
    }
}

impl From<MeshObject> for SceneObject {
    fn from(mesh: MeshObject) -> Self {
        SceneObject::Mesh(mesh)
    }
}

impl From<Light> for SceneObject {
    fn from(light: Light) -> Self {
        SceneObject::Light(light)
    }
}

impl From<DirectionalLightHelper> for SceneObject {
    fn from(helper: DirectionalLightHelper) -> Self {
        SceneObject::LightHelper(helper)
    }
}
