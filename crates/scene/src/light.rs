//! Light definitions for the scene.

use glam::Vec3;

use crate::{Color, ObjectId, Transform};

/// Light variants.
#[derive(Clone, Debug, PartialEq)]
pub enum LightKind {
    /// Parallel rays travelling from the light's position toward its target.
    Directional {
        /// Scene object whose position the light points at
        target: ObjectId,
    },
    /// Uniform light from every direction.
    Ambient,
    /// Sky/ground gradient; `color` is the sky, blended by normal·up.
    Hemisphere {
        ground_color: Color,
    },
}

/// A light source.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    /// Position for directional lights, sky direction for hemisphere lights
    pub transform: Transform,
}

impl Light {
    /// A directional light at the origin aimed at `target`.
    pub fn directional(color: Color, intensity: f32, target: ObjectId) -> Self {
        Self {
            kind: LightKind::Directional { target },
            color,
            intensity,
            transform: Transform::new(),
        }
    }

    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity,
            transform: Transform::new(),
        }
    }

    /// A hemisphere light with the sky straight up.
    pub fn hemisphere(sky_color: Color, ground_color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Hemisphere { ground_color },
            color: sky_color,
            intensity,
            transform: Transform::new().with_position(Vec3::Y),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform = self.transform.with_position(position);
        self
    }

    /// Target object of a directional light.
    pub fn target(&self) -> Option<ObjectId> {
        match self.kind {
            LightKind::Directional { target } => Some(target),
            _ => None,
        }
    }

    pub fn ground_color(&self) -> Option<Color> {
        match self.kind {
            LightKind::Hemisphere { ground_color } => Some(ground_color),
            _ => None,
        }
    }

    pub fn ground_color_mut(&mut self) -> Option<&mut Color> {
        match &mut self.kind {
            LightKind::Hemisphere { ground_color } => Some(ground_color),
            _ => None,
        }
    }

    /// Short name of the variant, for logs and UI.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            LightKind::Directional { .. } => "directional",
            LightKind::Ambient => "ambient",
            LightKind::Hemisphere { .. } => "hemisphere",
        }
    }
}

/// Unit vector from a surface toward a directional light.
///
/// Computed from the live positions every call, so it always reflects the
/// latest edits. Returns `None` when light and target coincide.
pub fn direction_to_light(light_position: Vec3, target_position: Vec3) -> Option<Vec3> {
    (light_position - target_position).try_normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_points_from_target_to_light() {
        let dir = direction_to_light(Vec3::new(0.0, 10.0, 0.0), Vec3::new(-5.0, 0.0, 0.0)).unwrap();
        let expected = Vec3::new(5.0, 10.0, 0.0).normalize();
        assert!((dir - expected).length() < 1e-6);
    }

    #[test]
    fn test_coincident_light_and_target_has_no_direction() {
        assert!(direction_to_light(Vec3::ONE, Vec3::ONE).is_none());
    }

    #[test]
    fn test_variant_accessors() {
        let target = ObjectId::from_raw(7);
        let directional = Light::directional(Color::WHITE, 1.0, target);
        assert_eq!(directional.target(), Some(target));
        assert_eq!(directional.ground_color(), None);
        assert_eq!(directional.kind_name(), "directional");

        let mut hemi = Light::hemisphere(Color::from_hex(0xb1e1ff), Color::from_hex(0xb97a20), 1.0);
        assert_eq!(hemi.target(), None);
        *hemi.ground_color_mut().unwrap() = Color::BLACK;
        assert_eq!(hemi.ground_color(), Some(Color::BLACK));
        assert_eq!(hemi.transform.position, Vec3::Y);

        assert!(Light::ambient(Color::WHITE, 1.0).ground_color_mut().is_none());
    }
}
