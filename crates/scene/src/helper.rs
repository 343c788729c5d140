//! Directional light helper.
//!
//! The helper draws a square at the light, facing its target, plus a line
//! from the light to the target. Its geometry is a snapshot taken by
//! [`DirectionalLightHelper::update`]; moving the light or the target does
//! not change the helper until the next update. Scene code resyncs it with
//! [`Scene::update_light_helper`](crate::Scene::update_light_helper).

use glam::Vec3;

use crate::{Color, ObjectId};

/// Line-segment visualization of a directional light.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLightHelper {
    /// The light being visualized
    pub light: ObjectId,
    /// Half-extent of the square drawn at the light
    pub size: f32,
    /// Fixed line color; `None` follows the light color at each update
    pub color: Option<Color>,
    square: [Vec3; 4],
    line: [Vec3; 2],
    line_color: Color,
    revision: u64,
}

impl DirectionalLightHelper {
    pub fn new(light: ObjectId, size: f32) -> Self {
        Self {
            light,
            size,
            color: None,
            square: [Vec3::ZERO; 4],
            line: [Vec3::ZERO; 2],
            line_color: Color::WHITE,
            revision: 0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Rebuild the geometry from world-space light and target positions.
    pub fn update(&mut self, light_position: Vec3, target_position: Vec3, light_color: Color) {
        let forward = (target_position - light_position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Y);
        let reference = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let right = forward.cross(reference).normalize() * self.size;
        let up = right.cross(forward).normalize() * self.size;

        self.square = [
            light_position - right + up,
            light_position + right + up,
            light_position + right - up,
            light_position - right - up,
        ];
        self.line = [light_position, target_position];
        self.line_color = self.color.unwrap_or(light_color);
        self.revision += 1;
    }

    /// Corners of the square at the light, in drawing order.
    pub fn square(&self) -> [Vec3; 4] {
        self.square
    }

    /// Endpoints of the light-to-target line as of the last update.
    pub fn target_line(&self) -> [Vec3; 2] {
        self.line
    }

    pub fn line_color(&self) -> Color {
        self.line_color
    }

    /// Number of updates applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All line segments: four square edges then the target line.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        (0..4)
            .map(|i| (self.square[i], self.square[(i + 1) % 4]))
            .chain(std::iter::once((self.line[0], self.line[1])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_update_builds_square_facing_target() {
        let mut helper = DirectionalLightHelper::new(ObjectId::from_raw(0), 1.0);
        let light = Vec3::new(0.0, 10.0, 0.0);
        let target = Vec3::new(-5.0, 0.0, 0.0);
        helper.update(light, target, Color::WHITE);

        let forward = (target - light).normalize();
        let square = helper.square();
        let center = square.iter().copied().sum::<Vec3>() / 4.0;
        assert!((center - light).length() < EPSILON);
        for corner in square {
            assert!((corner - light).dot(forward).abs() < EPSILON);
            assert!(((corner - light).length() - 2.0_f32.sqrt()).abs() < EPSILON);
        }
        assert_eq!(helper.target_line(), [light, target]);
        assert_eq!(helper.revision(), 1);
    }

    #[test]
    fn test_color_follows_light_unless_fixed() {
        let mut helper = DirectionalLightHelper::new(ObjectId::from_raw(0), 1.0);
        helper.update(Vec3::Y, Vec3::ZERO, Color::from_hex(0xff0000));
        assert_eq!(helper.line_color(), Color::from_hex(0xff0000));

        let mut fixed = helper.clone().with_color(Color::WHITE);
        fixed.update(Vec3::Y, Vec3::ZERO, Color::from_hex(0xff0000));
        assert_eq!(fixed.line_color(), Color::WHITE);
    }

    #[test]
    fn test_straight_down_and_degenerate_targets_stay_finite() {
        let mut helper = DirectionalLightHelper::new(ObjectId::from_raw(0), 1.0);
        helper.update(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Color::WHITE);
        assert!(helper.square().iter().all(|c| c.is_finite()));

        helper.update(Vec3::ONE, Vec3::ONE, Color::WHITE);
        assert!(helper.square().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_segments_close_the_square() {
        let mut helper = DirectionalLightHelper::new(ObjectId::from_raw(0), 0.5);
        helper.update(Vec3::Y, Vec3::ZERO, Color::WHITE);
        let segments: Vec<_> = helper.segments().collect();
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[3].1, segments[0].0);
        assert_eq!(segments[4], (Vec3::Y, Vec3::ZERO));
    }
}
