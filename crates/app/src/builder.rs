//! Builds the demo scene from configuration.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec2, Vec3};
use lightlab_core::{AppConfig, Error, LightKindConfig, Result};
use lightlab_resources::{
    Color, ColorSpace, Filter, Geometry, Material, Side, TextureLoader, Wrapping,
};
use lightlab_scene::{
    DirectionalLightHelper, Light, MeshObject, ObjectId, Scene, SceneError, SceneObject,
    Transform,
};
use tracing::{debug, info};

/// Edge length of the directional light helper's square.
const HELPER_SIZE: f32 = 1.0;

/// Ids of the objects the rest of the application refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneHandles {
    pub plane: ObjectId,
    pub cube: ObjectId,
    pub sphere: ObjectId,
    pub light: ObjectId,
    /// Only directional lights have a target
    pub target: Option<ObjectId>,
    /// Only directional lights have a helper
    pub helper: Option<ObjectId>,
}

fn parse_color(field: &str, text: &str) -> Result<Color> {
    Color::parse(text).map_err(|e| Error::Config(format!("{}: {}", field, e)))
}

fn scene_error(e: SceneError) -> Error {
    Error::Internal(e.to_string())
}

/// Populate a new scene from `config`.
///
/// The ground texture starts loading here and fills in later; a texture
/// that fails to load leaves the plane in its material color.
pub fn build_scene(config: &AppConfig, loader: &TextureLoader) -> Result<(Scene, SceneHandles)> {
    let settings = &config.scene;
    let mut scene = Scene::new();
    scene.background = parse_color("scene.background", &settings.background)?;

    let plane_size = settings.plane_size;
    let mut plane_material = Material::basic(Color::WHITE).with_side(Side::Double);
    if let Some(path) = &settings.texture {
        let texture = loader
            .load(path)
            .with_wrapping(Wrapping::Repeat)
            .with_mag_filter(Filter::Nearest)
            .with_color_space(ColorSpace::Srgb)
            .with_repeat(Vec2::splat(plane_size / 2.0));
        plane_material = plane_material.with_map(texture);
    }
    let mut plane = MeshObject::new(Geometry::plane(plane_size, plane_size), plane_material);
    plane.transform = Transform::new().with_rotation(Quat::from_rotation_x(-FRAC_PI_2));
    let plane = scene.add("plane", plane);

    let cube_size = settings.cube_size;
    let mut cube = MeshObject::new(
        Geometry::cuboid(cube_size, cube_size, cube_size),
        Material::phong(parse_color("scene.cube_color", &settings.cube_color)?),
    );
    cube.transform =
        Transform::new().with_position(Vec3::new(cube_size + 1.0, cube_size / 2.0, 0.0));
    let cube = scene.add("cube", cube);

    let radius = settings.sphere_radius;
    let mut sphere = MeshObject::new(
        Geometry::sphere(
            radius,
            settings.sphere_width_segments,
            settings.sphere_height_segments,
        ),
        Material::phong(parse_color("scene.sphere_color", &settings.sphere_color)?),
    );
    sphere.transform =
        Transform::new().with_position(Vec3::new(-(radius + 1.0), radius + 2.0, 0.0));
    let sphere = scene.add("sphere", sphere);

    let light_config = &config.light;
    let color = parse_color("light.color", &light_config.color)?;
    let (light, target, helper) = match light_config.kind {
        LightKindConfig::Directional => {
            let target = scene.add(
                "light target",
                SceneObject::Empty(Transform::new().with_position(light_config.target)),
            );
            let light = scene.add(
                "directional light",
                Light::directional(color, light_config.intensity, target)
                    .with_position(light_config.position),
            );
            let helper = scene.add("light helper", DirectionalLightHelper::new(light, HELPER_SIZE));
            scene.update_light_helper(helper).map_err(scene_error)?;
            (light, Some(target), Some(helper))
        }
        LightKindConfig::Ambient => {
            let light = scene.add("ambient light", Light::ambient(color, light_config.intensity));
            (light, None, None)
        }
        LightKindConfig::Hemisphere => {
            let ground = parse_color("light.ground_color", &light_config.ground_color)?;
            let light = scene.add(
                "hemisphere light",
                Light::hemisphere(color, ground, light_config.intensity)
                    .with_position(light_config.position),
            );
            (light, None, None)
        }
    };

    info!(
        "Scene built: {} objects, {:?} light",
        scene.len(),
        light_config.kind
    );
    debug!(
        "Cube at {}, sphere at {}",
        scene.position(cube).map_err(scene_error)?,
        scene.position(sphere).map_err(scene_error)?
    );

    Ok((
        scene,
        SceneHandles {
            plane,
            cube,
            sphere,
            light,
            target,
            helper,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightlab_scene::ObjectKind;

    fn untextured() -> AppConfig {
        let mut config = AppConfig::default();
        config.scene.texture = None;
        config
    }

    #[test]
    fn test_directional_scene_has_target_and_helper() {
        let (scene, handles) = build_scene(&untextured(), &TextureLoader::new()).unwrap();
        assert_eq!(scene.len(), 6);
        assert_eq!(scene.count(ObjectKind::Mesh), 3);
        assert!(handles.target.is_some());
        assert!(handles.helper.is_some());
    }

    #[test]
    fn test_other_light_kinds_have_no_helper() {
        for kind in [LightKindConfig::Ambient, LightKindConfig::Hemisphere] {
            let mut config = untextured();
            config.light.kind = kind;
            let (scene, handles) = build_scene(&config, &TextureLoader::new()).unwrap();
            assert_eq!(scene.len(), 4);
            assert_eq!(handles.helper, None);
            assert_eq!(handles.target, None);
        }
    }

    #[test]
    fn test_bad_color_is_config_error() {
        let mut config = untextured();
        config.scene.cube_color = "teal".to_string();
        let result = build_scene(&config, &TextureLoader::new());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_untextured_plane_has_no_map() {
        let (scene, handles) = build_scene(&untextured(), &TextureLoader::new()).unwrap();
        let plane = scene.mesh(handles.plane).unwrap();
        assert!(plane.material.map.is_none());
        assert_eq!(plane.material.side, Side::Double);
    }
}
