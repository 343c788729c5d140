//! egui view of the control panel.

use lightlab_scene::{Color, Scene};

use crate::panel::ControlBinding;
use crate::{ControlId, ControlPanel, ControlResult, FolderId};

impl ControlPanel {
    /// Draw the panel as a window in the top-right corner and apply edits.
    ///
    /// Returns whether any control was written this frame.
    pub fn show(&mut self, ctx: &egui::Context, scene: &mut Scene) -> ControlResult<bool> {
        let title = self.title.clone();
        let mut outcome = Ok(false);
        egui::Window::new(title)
            .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| outcome = self.ui(ui, scene));
        outcome
    }

    /// Draw top-level controls, then each folder as a collapsible section.
    pub fn ui(&mut self, ui: &mut egui::Ui, scene: &mut Scene) -> ControlResult<bool> {
        let mut changed = false;
        for id in self.ids_in(None) {
            changed |= self.control_ui(ui, id, scene)?;
        }

        for index in 0..self.folders.len() {
            let folder = FolderId(index);
            let ids = self.ids_in(Some(folder));
            let name = self.folders[index].clone();
            let response = egui::CollapsingHeader::new(name)
                .default_open(true)
                .show(ui, |ui| -> ControlResult<bool> {
                    let mut changed = false;
                    for id in ids {
                        changed |= self.control_ui(ui, id, scene)?;
                    }
                    Ok(changed)
                });
            if let Some(result) = response.body_returned {
                changed |= result?;
            }
        }
        Ok(changed)
    }

    fn control_ui(&mut self, ui: &mut egui::Ui, id: ControlId, scene: &mut Scene) -> ControlResult<bool> {
        let control = self.control(id)?;
        let name = control.name.clone();
        let binding = control.binding;

        match binding {
            ControlBinding::Number(binding) => {
                // Seed with the clamped value so an untouched slider never writes back.
                let mut value = self.number_value(id, scene)?;
                let mut slider =
                    egui::Slider::new(&mut value, binding.min..=binding.max).text(name.as_str());
                if let Some(step) = binding.step {
                    slider = slider.step_by(f64::from(step));
                }
                if ui.add(slider).changed() {
                    self.set_number(id, value, scene)?;
                    return Ok(true);
                }
            }
            ControlBinding::Color(binding) => {
                let mut rgb = scene.color(binding.object, binding.property)?.to_rgb8();
                let edited = ui
                    .horizontal(|ui| {
                        let edited = ui.color_edit_button_srgb(&mut rgb).changed();
                        ui.label(name.as_str());
                        edited
                    })
                    .inner;
                if edited {
                    self.set_color(id, Color::from_rgb8(rgb[0], rgb[1], rgb[2]), scene)?;
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}
