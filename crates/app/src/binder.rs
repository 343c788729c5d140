//! Exposes the scene light on the control panel.

use lightlab_controls::{ControlPanel, ControlResult};
use lightlab_scene::{
    Axis, ColorProperty, LightKind, ObjectId, ScalarProperty, Scene, SceneError,
};
use tracing::debug;

use crate::SceneHandles;

pub const INTENSITY_RANGE: (f32, f32) = (0.0, 2.0);
pub const INTENSITY_STEP: f32 = 0.01;

/// Slider range per axis for light and target positions.
pub fn position_range(axis: Axis) -> (f32, f32) {
    match axis {
        Axis::X | Axis::Z => (-10.0, 10.0),
        Axis::Y => (0.0, 10.0),
    }
}

/// Add the controls for the scene's light, chosen by its kind.
pub fn bind_light_controls(
    panel: &mut ControlPanel,
    scene: &Scene,
    handles: &SceneHandles,
) -> ControlResult<()> {
    let light = scene.light(handles.light)?;
    match light.kind {
        LightKind::Directional { target } => {
            let helper = handles.helper.ok_or(SceneError::MissingProperty {
                object: handles.light,
                property: "helper",
            })?;
            bind_directional(panel, handles.light, target, helper);
        }
        LightKind::Ambient => {
            panel.add_color(handles.light, ColorProperty::Color);
        }
        LightKind::Hemisphere { .. } => {
            panel
                .add_color(handles.light, ColorProperty::Color)
                .name("skyColor");
            panel.add_color(handles.light, ColorProperty::GroundColor);
            add_intensity(panel, handles.light);
        }
    }
    debug!(
        "Bound {} controls for {} light",
        panel.len(),
        light.kind_name()
    );
    Ok(())
}

fn add_intensity(panel: &mut ControlPanel, light: ObjectId) {
    let (min, max) = INTENSITY_RANGE;
    panel
        .add_number(light, ScalarProperty::Intensity, min, max)
        .step(INTENSITY_STEP);
}

fn bind_directional(panel: &mut ControlPanel, light: ObjectId, target: ObjectId, helper: ObjectId) {
    panel.add_color(light, ColorProperty::Color);
    add_intensity(panel, light);
    add_xyz_folder(panel, "position", light, helper);
    add_xyz_folder(panel, "target", target, helper);
}

/// A folder of x/y/z sliders over `object`'s position; every write resyncs
/// `helper` so it shows the new direction on the next frame.
fn add_xyz_folder(panel: &mut ControlPanel, name: &str, object: ObjectId, helper: ObjectId) {
    let folder = panel.add_folder(name);
    for axis in Axis::ALL {
        let (min, max) = position_range(axis);
        panel
            .add_number(object, ScalarProperty::Position(axis), min, max)
            .folder(folder)
            .on_change(move |scene: &mut Scene| scene.update_light_helper(helper));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_scene;
    use lightlab_controls::ControlBinding;
    use lightlab_core::{AppConfig, LightKindConfig};
    use lightlab_resources::TextureLoader;

    fn bound(kind: LightKindConfig) -> (ControlPanel, Scene, SceneHandles) {
        let mut config = AppConfig::default();
        config.scene.texture = None;
        config.light.kind = kind;
        let (scene, handles) = build_scene(&config, &TextureLoader::new()).unwrap();
        let mut panel = ControlPanel::default();
        bind_light_controls(&mut panel, &scene, &handles).unwrap();
        (panel, scene, handles)
    }

    #[test]
    fn test_directional_layout() {
        let (panel, _, _) = bound(LightKindConfig::Directional);
        let names: Vec<&str> = panel.controls().map(|(_, c)| c.name()).collect();
        assert_eq!(names, ["color", "intensity", "x", "y", "z", "x", "y", "z"]);

        let folders: Vec<&str> = panel.folders().map(|(_, name)| name).collect();
        assert_eq!(folders, ["position", "target"]);

        let color = panel.control(panel.find(None, "color").unwrap()).unwrap();
        assert_eq!(color.listener_count(), 0);
        let intensity = panel.control(panel.find(None, "intensity").unwrap()).unwrap();
        assert_eq!(intensity.listener_count(), 0);
        match intensity.binding() {
            ControlBinding::Number(binding) => {
                assert_eq!((binding.min, binding.max), INTENSITY_RANGE);
                assert_eq!(binding.step, Some(INTENSITY_STEP));
            }
            other => panic!("unexpected binding {:?}", other),
        }
    }

    #[test]
    fn test_position_sliders_carry_one_listener() {
        let (panel, _, handles) = bound(LightKindConfig::Directional);
        for folder in ["position", "target"] {
            for axis in Axis::ALL {
                let id = panel.find(Some(folder), axis.name()).unwrap();
                let control = panel.control(id).unwrap();
                assert_eq!(control.listener_count(), 1);
                let ControlBinding::Number(binding) = control.binding() else {
                    panic!("{}.{} is not a slider", folder, axis.name());
                };
                let expected = if folder == "position" {
                    handles.light
                } else {
                    handles.target.unwrap()
                };
                assert_eq!(binding.object, expected);
                assert_eq!((binding.min, binding.max), position_range(axis));
            }
        }
    }

    #[test]
    fn test_ambient_has_color_only() {
        let (panel, _, _) = bound(LightKindConfig::Ambient);
        assert_eq!(panel.len(), 1);
        assert!(panel.find(None, "color").is_some());
    }

    #[test]
    fn test_hemisphere_controls() {
        let (panel, _, _) = bound(LightKindConfig::Hemisphere);
        let names: Vec<&str> = panel.controls().map(|(_, c)| c.name()).collect();
        assert_eq!(names, ["skyColor", "groundColor", "intensity"]);
        assert!(panel.controls().all(|(_, c)| c.listener_count() == 0));
    }
}
