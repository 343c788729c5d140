//! Windowless rendering to an image file.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, ensure};
use lightlab_core::AppConfig;
use lightlab_renderer::{RenderStats, SceneRenderer, SoftwareRenderer};
use lightlab_resources::TextureLoader;
use lightlab_scene::OrbitInput;
use tracing::{info, warn};

use crate::{AppContext, FrameLoop, FrameScheduler};

/// Longest wait for the ground texture before rendering without it.
const TEXTURE_TIMEOUT: Duration = Duration::from_secs(5);

/// Counts frame requests instead of waking an event loop.
#[derive(Debug, Default)]
pub struct CountingScheduler {
    pub requested: u64,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requested += 1;
    }
}

/// Block until every scene texture is settled or `timeout` passes.
pub fn wait_for_textures(ctx: &AppContext, timeout: Duration) -> bool {
    let start = Instant::now();
    while !ctx.textures_settled() {
        if start.elapsed() >= timeout {
            return false;
        }
        thread::sleep(Duration::from_millis(5));
    }
    true
}

/// Run `frames` ticks of the frame loop without pointer input.
pub fn render_frames<R: SceneRenderer>(
    ctx: &mut AppContext,
    renderer: &mut R,
    frames: u32,
) -> Result<CountingScheduler> {
    let mut frame_loop = FrameLoop::new();
    let mut scheduler = CountingScheduler::default();
    let input = OrbitInput {
        viewport_height: ctx.config.window.height as f32,
        ..OrbitInput::default()
    };
    for frame in 0..frames {
        frame_loop
            .tick(ctx, &input, renderer, &mut scheduler)
            .with_context(|| format!("Failed to render frame {}", frame))?;
    }
    Ok(scheduler)
}

/// Render `frames` frames of the scene described by `config` and save the
/// last one as an image at `output`.
pub fn run(config: AppConfig, frames: u32, output: &Path) -> Result<RenderStats> {
    ensure!(frames > 0, "--frames must be at least 1");

    let (width, height) = (config.window.width, config.window.height);
    let mut ctx = AppContext::new(config, &TextureLoader::new())
        .context("Failed to build scene")?;
    if !wait_for_textures(&ctx, TEXTURE_TIMEOUT) {
        warn!("Textures still loading after {:?}; rendering without them", TEXTURE_TIMEOUT);
    }

    let mut renderer =
        SoftwareRenderer::new(width, height).context("Failed to create software renderer")?;
    render_frames(&mut ctx, &mut renderer, frames)?;
    let stats = renderer.stats();

    let frame = renderer.frame();
    let img = image::RgbaImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
        .context("Failed to create image from pixel data")?;
    img.save(output)
        .with_context(|| format!("Failed to save image to {}", output.display()))?;

    info!(
        "Wrote {} ({}x{}, {} frames, {} fragments)",
        output.display(),
        width,
        height,
        frames,
        stats.fragments
    );
    Ok(stats)
}
