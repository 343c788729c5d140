//! Application configuration.
//!
//! Configuration is read from a TOML file. Every field has a default, so a
//! missing section (or a missing file, via [`AppConfig::default`]) yields the
//! stock demo scene.
//!
//! ```toml
//! [scene]
//! plane_size = 40.0
//! texture = "assets/checker.png"
//!
//! [light]
//! kind = "directional"
//! intensity = 1.5
//! position = [0.0, 10.0, 0.0]
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Top-level configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub light: LightConfig,
}

impl AppConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_toml(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scene builder cannot work with.
    ///
    /// NaN and infinities fail every check below.
    pub fn validate(&self) -> Result<()> {
        let scene = &self.scene;
        require_positive("scene.plane_size", scene.plane_size)?;
        require_positive("scene.cube_size", scene.cube_size)?;
        require_positive("scene.sphere_radius", scene.sphere_radius)?;
        if scene.sphere_width_segments < 3 || scene.sphere_height_segments < 2 {
            return Err(Error::Config(
                "sphere needs at least 3 width and 2 height segments".into(),
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::Config("window size must be non-zero".into()));
        }

        let camera = &self.camera;
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(Error::Config("camera.fov must be in (0, 180) degrees".into()));
        }
        require_positive("camera.near", camera.near)?;
        require_positive("camera.far", camera.far)?;
        if camera.far <= camera.near {
            return Err(Error::Config("camera requires 0 < near < far".into()));
        }
        require_finite("camera.position", camera.position)?;
        require_finite("camera.orbit_target", camera.orbit_target)?;

        let light = &self.light;
        if !(light.intensity >= 0.0 && light.intensity.is_finite()) {
            return Err(Error::Config("light.intensity must be finite and >= 0".into()));
        }
        require_finite("light.position", light.position)?;
        require_finite("light.target", light.target)?;
        Ok(())
    }
}

fn require_positive(field: &str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::Config(format!("{} must be positive and finite, got {}", field, value)))
    }
}

fn require_finite(field: &str, value: Vec3) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::Config(format!("{} must be finite, got {}", field, value)))
    }
}

/// Window settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "lightlab - directional light".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Perspective camera and orbit settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    /// Point the orbit controller circles around
    pub orbit_target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 10.0, 20.0),
            orbit_target: Vec3::new(0.0, 5.0, 0.0),
        }
    }
}

/// Static scene constants.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub plane_size: f32,
    /// Ground texture; `None` leaves the plane untextured
    pub texture: Option<PathBuf>,
    pub cube_size: f32,
    pub cube_color: String,
    pub sphere_radius: f32,
    pub sphere_width_segments: u32,
    pub sphere_height_segments: u32,
    pub sphere_color: String,
    pub background: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            plane_size: 40.0,
            texture: Some(PathBuf::from("assets/checker.png")),
            cube_size: 4.0,
            cube_color: "#8AC".to_string(),
            sphere_radius: 3.0,
            sphere_width_segments: 32,
            sphere_height_segments: 16,
            sphere_color: "#CA8".to_string(),
            background: "#000000".to_string(),
        }
    }
}

/// Which light variant the scene is built with.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LightKindConfig {
    #[default]
    Directional,
    Ambient,
    Hemisphere,
}

/// Light settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightConfig {
    pub kind: LightKindConfig,
    /// Light color (sky color for the hemisphere variant)
    pub color: String,
    /// Only used by the hemisphere variant
    pub ground_color: String,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            kind: LightKindConfig::Directional,
            color: "#FFFFFF".to_string(),
            ground_color: "#B97A20".to_string(),
            intensity: 1.0,
            position: Vec3::new(0.0, 10.0, 0.0),
            target: Vec3::new(-5.0, 0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_scene() {
        let config = AppConfig::default();
        assert_eq!(config.scene.plane_size, 40.0);
        assert_eq!(config.scene.cube_size, 4.0);
        assert_eq!(config.scene.sphere_radius, 3.0);
        assert_eq!(config.light.position, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(config.light.target, Vec3::new(-5.0, 0.0, 0.0));
        assert_eq!(config.camera.orbit_target, Vec3::new(0.0, 5.0, 0.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [scene]
            cube_size = 2.0

            [light]
            kind = "hemisphere"
            intensity = 0.5
            "#,
        )
        .expect("valid config");

        assert_eq!(config.scene.cube_size, 2.0);
        assert_eq!(config.scene.plane_size, 40.0);
        assert_eq!(config.light.kind, LightKindConfig::Hemisphere);
        assert_eq!(config.light.intensity, 0.5);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_vectors_parse_from_arrays() {
        let config = AppConfig::from_toml("[light]\nposition = [1.0, 2.0, 3.0]\n").unwrap();
        assert_eq!(config.light.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        let err = AppConfig::from_toml("[scene]\nplane_size = 0.0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        for text in [
            "[scene]\nplane_size = nan\n",
            "[scene]\ncube_size = inf\n",
            "[scene]\nsphere_radius = -inf\n",
            "[camera]\nfov = nan\n",
            "[camera]\nfar = inf\n",
            "[camera]\nposition = [0.0, nan, 20.0]\n",
            "[light]\nintensity = nan\n",
            "[light]\ntarget = [inf, 0.0, 0.0]\n",
        ] {
            let result = AppConfig::from_toml(text);
            assert!(matches!(result, Err(Error::Config(_))), "accepted {:?}", text);
        }
    }

    #[test]
    fn test_zero_intensity_is_valid() {
        let config = AppConfig::from_toml("[light]\nintensity = 0.0\n").unwrap();
        assert_eq!(config.light.intensity, 0.0);
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            AppConfig::from_toml("[scene\nplane_size = 1"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
