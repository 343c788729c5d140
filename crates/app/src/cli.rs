//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lightlab_core::{AppConfig, LightKindConfig};

#[derive(Parser, Debug)]
#[command(name = "lightlab")]
#[command(about = "Directional light demo: textured ground, cube and sphere under an adjustable light", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ground texture, overriding the configured one
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Window (or image) width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Window (or image) height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Light variant to build the scene with
    #[arg(long, value_enum)]
    pub light: Option<LightArg>,

    /// Render without a window and write the last frame to --output
    #[arg(long)]
    pub headless: bool,

    /// Number of frames to run in headless mode
    #[arg(long, default_value_t = 1)]
    pub frames: u32,

    /// Output image for headless mode
    #[arg(long, default_value = "lightlab.png")]
    pub output: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LightArg {
    Directional,
    Ambient,
    Hemisphere,
}

impl From<LightArg> for LightKindConfig {
    fn from(arg: LightArg) -> Self {
        match arg {
            LightArg::Directional => LightKindConfig::Directional,
            LightArg::Ambient => LightKindConfig::Ambient,
            LightArg::Hemisphere => LightKindConfig::Hemisphere,
        }
    }
}

impl Cli {
    /// Layer command-line overrides onto a loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(texture) = &self.texture {
            config.scene.texture = Some(texture.clone());
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(light) = self.light {
            config.light.kind = light.into();
        }
    }
}
