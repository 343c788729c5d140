//! Application state shared by the window and headless front ends.

use glam::Vec2;
use lightlab_controls::ControlPanel;
use lightlab_core::{AppConfig, Error, Result};
use lightlab_platform::InputState;
use lightlab_resources::TextureLoader;
use lightlab_scene::{Camera, OrbitController, OrbitInput, Scene, SceneObject};
use tracing::info;

use crate::{SceneHandles, bind_light_controls, build_scene};

/// Everything one session of the demo owns.
pub struct AppContext {
    pub config: AppConfig,
    pub scene: Scene,
    pub camera: Camera,
    pub orbit: OrbitController,
    pub panel: ControlPanel,
    pub handles: SceneHandles,
}

impl AppContext {
    /// Build the scene, camera and control panel described by `config`.
    pub fn new(config: AppConfig, loader: &TextureLoader) -> Result<Self> {
        let (scene, handles) = build_scene(&config, loader)?;

        let camera_config = &config.camera;
        let mut camera = Camera::perspective(
            camera_config.fov,
            config.window.width as f32 / config.window.height as f32,
            camera_config.near,
            camera_config.far,
        );
        camera.position = camera_config.position;
        camera.look_at(camera_config.orbit_target);

        let mut orbit = OrbitController::new();
        orbit.set_target(camera_config.orbit_target);

        let mut panel = ControlPanel::new("Light");
        bind_light_controls(&mut panel, &scene, &handles)
            .map_err(|e| Error::Internal(format!("binding controls: {}", e)))?;

        info!(
            "Context ready: {} objects, {} controls",
            scene.len(),
            panel.len()
        );

        Ok(Self {
            config,
            scene,
            camera,
            orbit,
            panel,
            handles,
        })
    }

    /// Whether every texture in the scene has finished loading or failed.
    pub fn textures_settled(&self) -> bool {
        self.scene.iter().all(|(_, node)| match &node.object {
            SceneObject::Mesh(mesh) => mesh.material.map.as_ref().is_none_or(|t| t.is_settled()),
            _ => true,
        })
    }
}

/// Orbit input from the pointer activity accumulated in `input`.
pub fn orbit_input(input: &InputState, viewport_height: u32) -> OrbitInput {
    let (rotate_x, rotate_y) = input.rotate_delta();
    let (pan_x, pan_y) = input.pan_delta();
    OrbitInput {
        rotate: Vec2::new(rotate_x, rotate_y),
        pan: Vec2::new(pan_x, pan_y),
        zoom: input.scroll_lines(),
        viewport_height: viewport_height as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightlab_platform::MouseButton;

    #[test]
    fn test_context_binds_panel() {
        let mut config = AppConfig::default();
        config.scene.texture = None;
        let context = AppContext::new(config, &TextureLoader::new()).unwrap();
        assert_eq!(context.panel.len(), 8);
        assert_eq!(context.orbit.target(), context.config.camera.orbit_target);
        assert!(context.textures_settled());
    }

    #[test]
    fn test_camera_aspect_follows_window() {
        let mut config = AppConfig::default();
        config.scene.texture = None;
        config.window.width = 800;
        config.window.height = 400;
        let context = AppContext::new(config, &TextureLoader::new()).unwrap();
        assert!((context.camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_input_from_drags() {
        let mut input = InputState::new();
        input.on_mouse_moved(0.0, 0.0);
        input.on_mouse_pressed(MouseButton::Left);
        input.on_mouse_moved(12.0, -3.0);
        input.on_scroll(2.0);

        let orbit = orbit_input(&input, 600);
        assert_eq!(orbit.rotate, Vec2::new(12.0, -3.0));
        assert_eq!(orbit.pan, Vec2::ZERO);
        assert_eq!(orbit.zoom, 2.0);
        assert_eq!(orbit.viewport_height, 600.0);
    }

    #[test]
    fn test_idle_input_is_idle_orbit() {
        assert!(orbit_input(&InputState::new(), 720).is_idle());
    }
}
