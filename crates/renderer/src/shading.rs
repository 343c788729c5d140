//! Per-pixel shading.
//!
//! Basic materials are unlit. Phong materials sum ambient, hemisphere and
//! directional contributions with a Blinn specular term. Light directions are
//! read from the live light and target positions every frame.

use glam::{Vec2, Vec3};
use lightlab_resources::{Material, MaterialKind};
use lightlab_scene::{LightKind, Scene, SceneObject};

use crate::RenderResult;

#[derive(Clone, Copy, Debug, PartialEq)]
struct DirectionalLight {
    /// Unit vector from surfaces toward the light
    direction: Vec3,
    radiance: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct HemisphereLight {
    up: Vec3,
    sky: Vec3,
    ground: Vec3,
}

/// Lights of a scene reduced to what the shader needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lighting {
    ambient: Vec3,
    hemispheres: Vec<HemisphereLight>,
    directionals: Vec<DirectionalLight>,
}

impl Lighting {
    /// Collect every light in the scene.
    pub fn gather(scene: &Scene) -> RenderResult<Self> {
        let mut lighting = Self::default();
        for (id, node) in scene.iter() {
            let SceneObject::Light(light) = &node.object else {
                continue;
            };
            let radiance = light.color.to_vec3() * light.intensity;
            match light.kind {
                LightKind::Ambient => lighting.ambient += radiance,
                LightKind::Hemisphere { ground_color } => {
                    lighting.hemispheres.push(HemisphereLight {
                        up: light.transform.position.try_normalize().unwrap_or(Vec3::Y),
                        sky: radiance,
                        ground: ground_color.to_vec3() * light.intensity,
                    });
                }
                LightKind::Directional { .. } => {
                    if let Some(direction) = scene.light_direction(id)? {
                        lighting
                            .directionals
                            .push(DirectionalLight { direction, radiance });
                    }
                }
            }
        }
        Ok(lighting)
    }

    pub fn directional_count(&self) -> usize {
        self.directionals.len()
    }

    /// Irradiance reaching a surface with the given normal, ignoring specular.
    fn diffuse(&self, normal: Vec3) -> Vec3 {
        let mut irradiance = self.ambient;
        for hemi in &self.hemispheres {
            let weight = 0.5 * normal.dot(hemi.up) + 0.5;
            irradiance += hemi.ground.lerp(hemi.sky, weight);
        }
        for light in &self.directionals {
            irradiance += light.radiance * normal.dot(light.direction).max(0.0);
        }
        irradiance
    }

    fn specular(&self, normal: Vec3, view: Vec3, shininess: f32) -> Vec3 {
        let mut total = Vec3::ZERO;
        for light in &self.directionals {
            if normal.dot(light.direction) <= 0.0 {
                continue;
            }
            let Some(half) = (light.direction + view).try_normalize() else {
                continue;
            };
            total += light.radiance * normal.dot(half).max(0.0).powf(shininess);
        }
        total
    }
}

/// Surface attributes at one pixel.
#[derive(Clone, Copy, Debug)]
pub struct SurfacePoint {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub front_facing: bool,
}

/// Final color of a surface point, before quantization.
pub fn shade(material: &Material, lighting: &Lighting, point: &SurfacePoint, eye: Vec3) -> Vec3 {
    let mut base = material.color.to_vec3();
    if let Some(texel) = material.map.as_ref().and_then(|map| map.sample(point.uv)) {
        base *= texel.truncate();
    }

    match material.kind {
        MaterialKind::Basic => base,
        MaterialKind::Phong => {
            let mut normal = point.normal.try_normalize().unwrap_or(Vec3::Y);
            if !point.front_facing {
                normal = -normal;
            }
            let view = (eye - point.position).try_normalize().unwrap_or(Vec3::Z);
            let diffuse = base * lighting.diffuse(normal);
            let specular =
                material.specular.to_vec3() * lighting.specular(normal, view, material.shininess);
            diffuse + specular
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightlab_scene::{Color, Light, ObjectId, Transform};

    const EPSILON: f32 = 1e-5;

    fn point(normal: Vec3) -> SurfacePoint {
        SurfacePoint {
            position: Vec3::ZERO,
            normal,
            uv: Vec2::ZERO,
            front_facing: true,
        }
    }

    fn directional_scene(light_position: Vec3, target_position: Vec3) -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        let target = scene.add(
            "target",
            SceneObject::Empty(Transform::new().with_position(target_position)),
        );
        let light = scene.add(
            "light",
            Light::directional(Color::WHITE, 1.0, target).with_position(light_position),
        );
        (scene, light)
    }

    #[test]
    fn test_basic_ignores_lights() {
        let lighting = Lighting::default();
        let material = Material::basic(Color::from_hex(0x336699));
        let color = shade(&material, &lighting, &point(Vec3::Y), Vec3::Z);
        assert!((color - Color::from_hex(0x336699).to_vec3()).length() < EPSILON);
    }

    #[test]
    fn test_phong_is_black_without_lights() {
        let material = Material::phong(Color::WHITE);
        let color = shade(&material, &Lighting::default(), &point(Vec3::Y), Vec3::Y);
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn test_directional_follows_live_target() {
        let (mut scene, light) = directional_scene(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        let mut material = Material::phong(Color::WHITE);
        material.specular = Color::BLACK;

        let lit = Lighting::gather(&scene).unwrap();
        let up = shade(&material, &lit, &point(Vec3::Y), Vec3::Y);
        assert!((up - Vec3::ONE).length() < EPSILON);

        // Move the light below the surface; it no longer faces the light.
        scene.light_mut(light).unwrap().transform.position = Vec3::new(0.0, -10.0, 0.0);
        let unlit = Lighting::gather(&scene).unwrap();
        assert_eq!(shade(&material, &unlit, &point(Vec3::Y), Vec3::Y), Vec3::ZERO);
    }

    #[test]
    fn test_intensity_scales_diffuse() {
        let (mut scene, light) = directional_scene(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        scene.light_mut(light).unwrap().intensity = 0.5;
        let mut material = Material::phong(Color::WHITE);
        material.specular = Color::BLACK;
        let color = shade(&material, &Lighting::gather(&scene).unwrap(), &point(Vec3::Y), Vec3::Y);
        assert!((color - Vec3::splat(0.5)).length() < EPSILON);
    }

    #[test]
    fn test_hemisphere_blends_sky_and_ground() {
        let mut scene = Scene::new();
        scene.add("hemi", Light::hemisphere(Color::WHITE, Color::BLACK, 1.0));
        let lighting = Lighting::gather(&scene).unwrap();
        let material = Material::phong(Color::WHITE);

        let up = shade(&material, &lighting, &point(Vec3::Y), Vec3::Y);
        let down = shade(&material, &lighting, &point(Vec3::NEG_Y), Vec3::Y);
        let side = shade(&material, &lighting, &point(Vec3::X), Vec3::Y);
        assert!((up - Vec3::ONE).length() < EPSILON);
        assert!(down.length() < EPSILON);
        assert!((side - Vec3::splat(0.5)).length() < EPSILON);
    }

    #[test]
    fn test_back_faces_use_flipped_normal() {
        let (scene, _) = directional_scene(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        let lighting = Lighting::gather(&scene).unwrap();
        let mut material = Material::phong(Color::WHITE);
        material.specular = Color::BLACK;
        let mut back = point(Vec3::NEG_Y);
        back.front_facing = false;
        let color = shade(&material, &lighting, &back, Vec3::Y);
        assert!((color - Vec3::ONE).length() < EPSILON);
    }

    #[test]
    fn test_ambient_adds_uniformly() {
        let mut scene = Scene::new();
        scene.add("ambient", Light::ambient(Color::WHITE, 0.25));
        let lighting = Lighting::gather(&scene).unwrap();
        assert_eq!(lighting.directional_count(), 0);
        let material = Material::phong(Color::WHITE);
        let color = shade(&material, &lighting, &point(Vec3::X), Vec3::Y);
        assert!((color - Vec3::splat(0.25)).length() < EPSILON);
    }
}
