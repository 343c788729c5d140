//! The scene container.

use glam::Vec3;
use tracing::trace;

use crate::light::direction_to_light;
use crate::{
    Color, ColorProperty, DirectionalLightHelper, Light, MeshObject, ObjectId, ObjectKind,
    ScalarProperty, SceneError, SceneObject, SceneResult,
};

/// A named object in the scene.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub object: SceneObject,
}

/// Owns every object for the lifetime of the session.
///
/// Objects are only ever added, so an [`ObjectId`] stays valid forever and
/// iteration follows insertion order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    pub background: Color,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            background: Color::BLACK,
        }
    }

    /// Insert an object and return its id.
    pub fn add(&mut self, name: impl Into<String>, object: impl Into<SceneObject>) -> ObjectId {
        let id = ObjectId::from_raw(self.nodes.len() as u32);
        let node = SceneNode {
            name: name.into(),
            object: object.into(),
        };
        trace!("Scene add {} '{}' ({:?})", id, node.name, node.object.kind());
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (ObjectId::from_raw(i as u32), node))
    }

    pub fn count(&self, kind: ObjectKind) -> usize {
        self.nodes.iter().filter(|n| n.object.kind() == kind).count()
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.iter().find(|(_, node)| node.name == name).map(|(id, _)| id)
    }

    pub fn node(&self, id: ObjectId) -> SceneResult<&SceneNode> {
        self.nodes
            .get(id.index())
            .ok_or(SceneError::UnknownObject(id))
    }

    pub fn get(&self, id: ObjectId) -> SceneResult<&SceneObject> {
        Ok(&self.node(id)?.object)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> SceneResult<&mut SceneObject> {
        self.nodes
            .get_mut(id.index())
            .map(|node| &mut node.object)
            .ok_or(SceneError::UnknownObject(id))
    }

    pub fn mesh(&self, id: ObjectId) -> SceneResult<&MeshObject> {
        match self.get(id)? {
            SceneObject::Mesh(mesh) => Ok(mesh),
            _ => Err(SceneError::MissingProperty {
                object: id,
                property: "geometry",
            }),
        }
    }

    pub fn light(&self, id: ObjectId) -> SceneResult<&Light> {
        match self.get(id)? {
            SceneObject::Light(light) => Ok(light),
            _ => Err(SceneError::NotALight(id)),
        }
    }

    pub fn light_mut(&mut self, id: ObjectId) -> SceneResult<&mut Light> {
        match self.get_mut(id)? {
            SceneObject::Light(light) => Ok(light),
            _ => Err(SceneError::NotALight(id)),
        }
    }

    pub fn helper(&self, id: ObjectId) -> SceneResult<&DirectionalLightHelper> {
        match self.get(id)? {
            SceneObject::LightHelper(helper) => Ok(helper),
            _ => Err(SceneError::NotAHelper(id)),
        }
    }

    /// Current position of any positioned object.
    pub fn position(&self, id: ObjectId) -> SceneResult<Vec3> {
        self.get(id)?
            .transform()
            .map(|t| t.position)
            .ok_or(SceneError::MissingProperty {
                object: id,
                property: "position",
            })
    }

    /// Unit vector from the scene toward a directional light, from live positions.
    pub fn light_direction(&self, id: ObjectId) -> SceneResult<Option<Vec3>> {
        let light = self.light(id)?;
        let Some(target) = light.target() else {
            return Ok(None);
        };
        let target_position = self
            .position(target)
            .map_err(|_| SceneError::MissingTarget { light: id, target })?;
        Ok(direction_to_light(light.transform.position, target_position))
    }

    /// Bring a light helper in line with its light and target.
    ///
    /// Refreshes the world matrices of the light and its target, then
    /// rebuilds the helper geometry from them. Until this runs, the helper
    /// keeps showing wherever the light was at the previous call.
    pub fn update_light_helper(&mut self, helper_id: ObjectId) -> SceneResult<()> {
        let light_id = self.helper(helper_id)?.light;
        let target_id = self
            .light(light_id)?
            .target()
            .ok_or(SceneError::MissingProperty {
                object: light_id,
                property: "target",
            })?;

        let target_position = {
            let transform = self
                .get_mut(target_id)
                .map_err(|_| SceneError::MissingTarget {
                    light: light_id,
                    target: target_id,
                })?
                .transform_mut()
                .ok_or(SceneError::MissingTarget {
                    light: light_id,
                    target: target_id,
                })?;
            transform.update_matrix_world();
            transform.world_position()
        };

        let (light_position, light_color) = {
            let light = self.light_mut(light_id)?;
            light.transform.update_matrix_world();
            (light.transform.world_position(), light.color)
        };

        if let SceneObject::LightHelper(helper) = self.get_mut(helper_id)? {
            helper.update(light_position, target_position, light_color);
            trace!(
                "Helper {} resynced: light {:?} -> target {:?}",
                helper_id, light_position, target_position
            );
        }
        Ok(())
    }

    /// Read a numeric field.
    pub fn scalar(&self, id: ObjectId, property: ScalarProperty) -> SceneResult<f32> {
        let object = self.get(id)?;
        let missing = SceneError::MissingProperty {
            object: id,
            property: property.name(),
        };
        match property {
            ScalarProperty::Position(axis) => object
                .transform()
                .map(|t| t.position[axis.index()])
                .ok_or(missing),
            ScalarProperty::Intensity => match object {
                SceneObject::Light(light) => Ok(light.intensity),
                _ => Err(missing),
            },
        }
    }

    /// Write a numeric field. Exactly one field of one object changes.
    pub fn set_scalar(&mut self, id: ObjectId, property: ScalarProperty, value: f32) -> SceneResult<()> {
        let object = self.get_mut(id)?;
        let missing = SceneError::MissingProperty {
            object: id,
            property: property.name(),
        };
        match property {
            ScalarProperty::Position(axis) => {
                let transform = object.transform_mut().ok_or(missing)?;
                transform.position[axis.index()] = value;
            }
            ScalarProperty::Intensity => match object {
                SceneObject::Light(light) => light.intensity = value,
                _ => return Err(missing),
            },
        }
        Ok(())
    }

    /// Read a color field.
    pub fn color(&self, id: ObjectId, property: ColorProperty) -> SceneResult<Color> {
        let light = self.light(id)?;
        match property {
            ColorProperty::Color => Ok(light.color),
            ColorProperty::GroundColor => light.ground_color().ok_or(SceneError::MissingProperty {
                object: id,
                property: property.name(),
            }),
        }
    }

    /// Write a color field.
    pub fn set_color(&mut self, id: ObjectId, property: ColorProperty, color: Color) -> SceneResult<()> {
        let light = self.light_mut(id)?;
        match property {
            ColorProperty::Color => light.color = color,
            ColorProperty::GroundColor => {
                let ground = light.ground_color_mut().ok_or(SceneError::MissingProperty {
                    object: id,
                    property: property.name(),
                })?;
                *ground = color;
            }
        }
        Ok(())
    }
}
