//! Control panel model.

use std::fmt;

use lightlab_scene::{
    Color, ColorProperty, ObjectId, ScalarProperty, Scene, SceneResult,
};
use tracing::{trace, warn};

use crate::{ControlError, ControlResult};

/// Callback run after a control writes its property.
pub type Listener = Box<dyn FnMut(&mut Scene) -> SceneResult<()>>;

/// Handle to a control in a [`ControlPanel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlId(pub(crate) usize);

/// Handle to a folder in a [`ControlPanel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FolderId(pub(crate) usize);

/// A numeric property exposed as a slider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberBinding {
    pub object: ObjectId,
    pub property: ScalarProperty,
    pub min: f32,
    pub max: f32,
    /// Writes snap to multiples of this, counted from `min`
    pub step: Option<f32>,
}

impl NumberBinding {
    pub fn new(object: ObjectId, property: ScalarProperty, min: f32, max: f32) -> Self {
        Self {
            object,
            property,
            min,
            max,
            step: None,
        }
    }

    /// `value` limited to the range; NaN maps to `min`.
    fn bounded(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// The value a write of `value` actually stores.
    pub fn constrain(&self, value: f32) -> f32 {
        let clamped = self.bounded(value);
        match self.step {
            Some(step) if step > 0.0 => {
                let snapped = self.min + ((clamped - self.min) / step).round() * step;
                snapped.clamp(self.min, self.max)
            }
            _ => clamped,
        }
    }

    /// The value shown for a property currently holding `value`.
    pub fn display(&self, value: f32) -> f32 {
        self.bounded(value)
    }
}

/// A color property exposed as a picker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorBinding {
    pub object: ObjectId,
    pub property: ColorProperty,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlBinding {
    Number(NumberBinding),
    Color(ColorBinding),
}

impl ControlBinding {
    fn kind_name(&self) -> &'static str {
        match self {
            ControlBinding::Number(_) => "number",
            ControlBinding::Color(_) => "color",
        }
    }
}

/// A named, bound control and its listeners.
pub struct Control {
    pub(crate) name: String,
    pub(crate) folder: Option<FolderId>,
    pub(crate) binding: ControlBinding,
    listeners: Vec<Listener>,
}

impl Control {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn folder(&self) -> Option<FolderId> {
        self.folder
    }

    pub fn binding(&self) -> ControlBinding {
        self.binding
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn number(&self) -> ControlResult<NumberBinding> {
        match self.binding {
            ControlBinding::Number(binding) => Ok(binding),
            _ => Err(self.mismatch("number")),
        }
    }

    fn color(&self) -> ControlResult<ColorBinding> {
        match self.binding {
            ControlBinding::Color(binding) => Ok(binding),
            _ => Err(self.mismatch("color")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> ControlError {
        ControlError::KindMismatch {
            name: self.name.clone(),
            expected,
        }
    }

    fn notify(&mut self, scene: &mut Scene) -> SceneResult<()> {
        for listener in &mut self.listeners {
            listener(scene)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("name", &self.name)
            .field("folder", &self.folder)
            .field("binding", &self.binding)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Builder returned when a control is added.
pub struct ControlHandle<'a> {
    panel: &'a mut ControlPanel,
    id: ControlId,
}

impl ControlHandle<'_> {
    /// Snap writes to multiples of `step`. Ignored for color controls.
    pub fn step(self, step: f32) -> Self {
        match &mut self.panel.controls[self.id.0].binding {
            ControlBinding::Number(binding) => binding.step = Some(step),
            ControlBinding::Color(_) => warn!("step() ignored on color control {:?}", self.id),
        }
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.panel.controls[self.id.0].name = name.into();
        self
    }

    pub fn folder(self, folder: FolderId) -> Self {
        self.panel.controls[self.id.0].folder = Some(folder);
        self
    }

    pub fn on_change(self, listener: impl FnMut(&mut Scene) -> SceneResult<()> + 'static) -> Self {
        self.panel.controls[self.id.0]
            .listeners
            .push(Box::new(listener));
        self
    }

    pub fn id(self) -> ControlId {
        self.id
    }
}

/// A set of controls, optionally grouped into folders.
#[derive(Debug)]
pub struct ControlPanel {
    pub(crate) title: String,
    pub(crate) controls: Vec<Control>,
    pub(crate) folders: Vec<String>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new("Controls")
    }
}

impl ControlPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            controls: Vec::new(),
            folders: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Add a slider over `[min, max]`, named after the property.
    pub fn add_number(
        &mut self,
        object: ObjectId,
        property: ScalarProperty,
        min: f32,
        max: f32,
    ) -> ControlHandle<'_> {
        let binding = NumberBinding::new(object, property, min, max);
        self.push(property.name(), ControlBinding::Number(binding))
    }

    /// Add a color picker, named after the property.
    pub fn add_color(&mut self, object: ObjectId, property: ColorProperty) -> ControlHandle<'_> {
        let binding = ColorBinding { object, property };
        self.push(property.name(), ControlBinding::Color(binding))
    }

    pub fn add_folder(&mut self, name: impl Into<String>) -> FolderId {
        self.folders.push(name.into());
        FolderId(self.folders.len() - 1)
    }

    /// Register a listener run after every write through `id`.
    pub fn on_change(
        &mut self,
        id: ControlId,
        listener: impl FnMut(&mut Scene) -> SceneResult<()> + 'static,
    ) -> ControlResult<()> {
        self.control_mut(id)?.listeners.push(Box::new(listener));
        Ok(())
    }

    pub fn control(&self, id: ControlId) -> ControlResult<&Control> {
        self.controls.get(id.0).ok_or(ControlError::UnknownControl(id))
    }

    fn control_mut(&mut self, id: ControlId) -> ControlResult<&mut Control> {
        self.controls
            .get_mut(id.0)
            .ok_or(ControlError::UnknownControl(id))
    }

    /// Controls in insertion order.
    pub fn controls(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.controls
            .iter()
            .enumerate()
            .map(|(i, control)| (ControlId(i), control))
    }

    pub fn folders(&self) -> impl Iterator<Item = (FolderId, &str)> {
        self.folders
            .iter()
            .enumerate()
            .map(|(i, name)| (FolderId(i), name.as_str()))
    }

    /// Look up a control by folder name (`None` for top level) and control name.
    pub fn find(&self, folder: Option<&str>, name: &str) -> Option<ControlId> {
        self.controls()
            .find(|(_, control)| {
                let folder_name = control.folder.map(|f| self.folders[f.0].as_str());
                control.name == name && folder_name == folder
            })
            .map(|(id, _)| id)
    }

    pub(crate) fn ids_in(&self, folder: Option<FolderId>) -> Vec<ControlId> {
        self.controls()
            .filter(|(_, control)| control.folder == folder)
            .map(|(id, _)| id)
            .collect()
    }

    /// Write a numeric control, then run its listeners.
    ///
    /// The value is clamped to the range and snapped to the step first.
    /// Returns the value actually stored.
    pub fn set_number(&mut self, id: ControlId, value: f32, scene: &mut Scene) -> ControlResult<f32> {
        let control = self.control_mut(id)?;
        let binding = control.number()?;
        let stored = binding.constrain(value);
        scene.set_scalar(binding.object, binding.property, stored)?;
        trace!("Control '{}' set {} = {}", control.name, binding.property, stored);
        control.notify(scene)?;
        Ok(stored)
    }

    /// Value a numeric control displays, clamped to its range.
    pub fn number_value(&self, id: ControlId, scene: &Scene) -> ControlResult<f32> {
        let binding = self.control(id)?.number()?;
        Ok(binding.display(scene.scalar(binding.object, binding.property)?))
    }

    /// Write a color control, then run its listeners.
    pub fn set_color(&mut self, id: ControlId, color: Color, scene: &mut Scene) -> ControlResult<()> {
        let control = self.control_mut(id)?;
        let binding = control.color()?;
        scene.set_color(binding.object, binding.property, color)?;
        trace!("Control '{}' set {} = {}", control.name, binding.property, color);
        control.notify(scene)?;
        Ok(())
    }

    /// Write a color control from `#rrggbb` text.
    pub fn set_color_hex(&mut self, id: ControlId, text: &str, scene: &mut Scene) -> ControlResult<()> {
        let color =
            Color::parse(text).map_err(|_| ControlError::InvalidColor(text.to_string()))?;
        self.set_color(id, color, scene)
    }

    /// Current color of a color control as `#rrggbb`.
    pub fn color_hex(&self, id: ControlId, scene: &Scene) -> ControlResult<String> {
        let binding = self.control(id)?.color()?;
        Ok(scene.color(binding.object, binding.property)?.to_hex_string())
    }

    fn push(&mut self, name: &str, binding: ControlBinding) -> ControlHandle<'_> {
        trace!("Panel add {} control '{}'", binding.kind_name(), name);
        self.controls.push(Control {
            name: name.to_string(),
            folder: None,
            binding,
            listeners: Vec::new(),
        });
        let id = ControlId(self.controls.len() - 1);
        ControlHandle { panel: self, id }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;
    use lightlab_scene::{Axis, Light, SceneError, SceneObject, Transform};

    use super::*;

    const EPSILON: f32 = 1e-5;

    fn scene_with_light() -> (Scene, ObjectId, ObjectId) {
        let mut scene = Scene::new();
        let target = scene.add("target", SceneObject::Empty(Transform::new()));
        let light = scene.add(
            "light",
            Light::directional(Color::WHITE, 1.0, target).with_position(Vec3::new(0.0, 10.0, 0.0)),
        );
        (scene, light, target)
    }

    #[test]
    fn test_write_clamps_to_range() {
        let (mut scene, light, _) = scene_with_light();
        let mut panel = ControlPanel::default();
        let y = panel
            .add_number(light, ScalarProperty::Position(Axis::Y), 0.0, 10.0)
            .id();

        assert_eq!(panel.set_number(y, -4.0, &mut scene).unwrap(), 0.0);
        assert_eq!(scene.position(light).unwrap().y, 0.0);
        assert_eq!(panel.set_number(y, 25.0, &mut scene).unwrap(), 10.0);
        assert_eq!(scene.position(light).unwrap().y, 10.0);
    }

    #[test]
    fn test_non_finite_values_stay_in_range() {
        let (mut scene, light, _) = scene_with_light();
        let mut panel = ControlPanel::default();
        let y = panel
            .add_number(light, ScalarProperty::Position(Axis::Y), 0.0, 10.0)
            .id();

        assert_eq!(panel.set_number(y, f32::NAN, &mut scene).unwrap(), 0.0);
        assert_eq!(scene.position(light).unwrap().y, 0.0);
        assert_eq!(panel.set_number(y, f32::INFINITY, &mut scene).unwrap(), 10.0);
        assert_eq!(panel.set_number(y, f32::NEG_INFINITY, &mut scene).unwrap(), 0.0);

        scene
            .set_scalar(light, ScalarProperty::Position(Axis::Y), f32::NAN)
            .unwrap();
        assert_eq!(panel.number_value(y, &scene).unwrap(), 0.0);
        scene
            .set_scalar(light, ScalarProperty::Position(Axis::Y), f32::INFINITY)
            .unwrap();
        assert_eq!(panel.number_value(y, &scene).unwrap(), 10.0);
    }

    #[test]
    fn test_write_snaps_to_step() {
        let (mut scene, light, _) = scene_with_light();
        let mut panel = ControlPanel::default();
        let intensity = panel
            .add_number(light, ScalarProperty::Intensity, 0.0, 2.0)
            .step(0.01)
            .id();

        let stored = panel.set_number(intensity, 1.234, &mut scene).unwrap();
        assert!((stored - 1.23).abs() < EPSILON);
        let stored = panel.set_number(intensity, 1.999, &mut scene).unwrap();
        assert!((stored - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_display_clamps_values_forced_out_of_range() {
        let (mut scene, light, _) = scene_with_light();
        let mut panel = ControlPanel::default();
        let y = panel
            .add_number(light, ScalarProperty::Position(Axis::Y), 0.0, 10.0)
            .id();

        scene
            .set_scalar(light, ScalarProperty::Position(Axis::Y), -3.0)
            .unwrap();
        assert_eq!(panel.number_value(y, &scene).unwrap(), 0.0);
        assert_eq!(scene.position(light).unwrap().y, -3.0);
    }

    #[test]
    fn test_listeners_run_in_registration_order_after_write() {
        let (mut scene, light, _) = scene_with_light();
        let mut panel = ControlPanel::default();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&calls);
        let second = Rc::clone(&calls);
        let x = panel
            .add_number(light, ScalarProperty::Position(Axis::X), -10.0, 10.0)
            .on_change(move |scene| {
                first
                    .borrow_mut()
                    .push(("first", scene.position(light)?.x));
                Ok(())
            })
            .id();
        panel
            .on_change(x, move |scene| {
                second
                    .borrow_mut()
                    .push(("second", scene.position(light)?.x));
                Ok(())
            })
            .unwrap();

        panel.set_number(x, 3.0, &mut scene).unwrap();
        assert_eq!(*calls.borrow(), vec![("first", 3.0), ("second", 3.0)]);
        assert_eq!(panel.control(x).unwrap().listener_count(), 2);
    }

    #[test]
    fn test_failing_listener_surfaces_scene_error() {
        let (mut scene, light, _) = scene_with_light();
        let mut panel = ControlPanel::default();
        let helper = ObjectId::from_raw(99);
        let x = panel
            .add_number(light, ScalarProperty::Position(Axis::X), -10.0, 10.0)
            .on_change(move |scene| scene.update_light_helper(helper))
            .id();

        let err = panel.set_number(x, 1.0, &mut scene).unwrap_err();
        assert_eq!(err, ControlError::Scene(SceneError::UnknownObject(helper)));
        assert_eq!(scene.position(light).unwrap().x, 1.0);
    }

    #[test]
    fn test_color_controls_round_trip_hex() {
        let (mut scene, light, _) = scene_with_light();
        let mut panel = ControlPanel::default();
        let color = panel.add_color(light, ColorProperty::Color).id();

        assert_eq!(panel.color_hex(color, &scene).unwrap(), "#ffffff");
        panel.set_color_hex(color, "#336699", &mut scene).unwrap();
        assert_eq!(panel.color_hex(color, &scene).unwrap(), "#336699");
        assert_eq!(
            panel.set_color_hex(color, "not-a-color", &mut scene),
            Err(ControlError::InvalidColor("not-a-color".into()))
        );
    }

    #[test]
    fn test_kind_mismatch_and_unknown_control() {
        let (mut scene, light, _) = scene_with_light();
        let mut panel = ControlPanel::default();
        let color = panel.add_color(light, ColorProperty::Color).id();

        assert!(matches!(
            panel.set_number(color, 1.0, &mut scene),
            Err(ControlError::KindMismatch { expected: "number", .. })
        ));
        assert!(matches!(
            panel.number_value(ControlId(5), &scene),
            Err(ControlError::UnknownControl(_))
        ));
    }

    #[test]
    fn test_folders_scope_names() {
        let (_, light, target) = scene_with_light();
        let mut panel = ControlPanel::default();
        let position = panel.add_folder("position");
        let target_folder = panel.add_folder("target");
        let light_x = panel
            .add_number(light, ScalarProperty::Position(Axis::X), -10.0, 10.0)
            .folder(position)
            .id();
        let target_x = panel
            .add_number(target, ScalarProperty::Position(Axis::X), -10.0, 10.0)
            .folder(target_folder)
            .id();

        assert_eq!(panel.find(Some("position"), "x"), Some(light_x));
        assert_eq!(panel.find(Some("target"), "x"), Some(target_x));
        assert_eq!(panel.find(None, "x"), None);
        assert_eq!(panel.ids_in(Some(position)), vec![light_x]);
    }
}
