//! The per-frame update.
//!
//! A tick reconciles the camera with pointer input, draws the scene and asks
//! the host for another tick. The loop only reads the scene; anything that
//! changes it (the control panel, listeners resyncing the light helper) runs
//! between ticks.

use lightlab_core::{FpsCounter, Timer};
use lightlab_renderer::{RenderResult, SceneRenderer};
use lightlab_scene::OrbitInput;
use tracing::debug;

use crate::AppContext;

/// Where the loop is between host callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    /// Waiting for the host to call [`FrameLoop::tick`]
    Scheduled,
    /// Inside a tick
    Running,
}

/// Requests the next tick from whatever drives the loop.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Drives one tick per host frame.
#[derive(Debug)]
pub struct FrameLoop {
    state: FrameState,
    frames: u64,
    timer: Timer,
    fps: FpsCounter,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: FrameState::Scheduled,
            frames: 0,
            timer: Timer::new(),
            fps: FpsCounter::default(),
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Ticks completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame.
    ///
    /// The next frame is requested even when rendering fails, so a transient
    /// error costs one frame rather than stopping the loop.
    pub fn tick<R, S>(
        &mut self,
        ctx: &mut AppContext,
        input: &OrbitInput,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> RenderResult<()>
    where
        R: SceneRenderer,
        S: FrameScheduler,
    {
        self.state = FrameState::Running;

        if let Some(fps) = self.fps.record(self.timer.tick()) {
            debug!("{:.1} fps over {} frames", fps, self.frames);
        }

        ctx.orbit.update(&mut ctx.camera, input);
        let result = renderer.render(&ctx.scene, &ctx.camera);

        scheduler.request_frame();
        self.frames += 1;
        self.state = FrameState::Scheduled;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightlab_core::AppConfig;
    use lightlab_renderer::RenderError;
    use lightlab_resources::TextureLoader;
    use lightlab_scene::{Camera, Scene};

    #[derive(Default)]
    struct Counter(u32);

    impl FrameScheduler for Counter {
        fn request_frame(&mut self) {
            self.0 += 1;
        }
    }

    /// Fails every render.
    struct Broken;

    impl SceneRenderer for Broken {
        fn resize(&mut self, _width: u32, _height: u32) -> RenderResult<()> {
            Ok(())
        }

        fn render(&mut self, _scene: &Scene, _camera: &Camera) -> RenderResult<()> {
            Err(RenderError::ZeroSizedTarget {
                width: 0,
                height: 0,
            })
        }
    }

    fn context() -> AppContext {
        let mut config = AppConfig::default();
        config.scene.texture = None;
        AppContext::new(config, &TextureLoader::new()).unwrap()
    }

    #[test]
    fn test_failed_render_still_schedules() {
        let mut ctx = context();
        let mut frame_loop = FrameLoop::new();
        let mut scheduler = Counter::default();

        let result = frame_loop.tick(&mut ctx, &OrbitInput::default(), &mut Broken, &mut scheduler);
        assert!(result.is_err());
        assert_eq!(scheduler.0, 1);
        assert_eq!(frame_loop.frames(), 1);
        assert_eq!(frame_loop.state(), FrameState::Scheduled);
    }

    #[test]
    fn test_drag_moves_camera() {
        let mut ctx = context();
        let mut frame_loop = FrameLoop::new();
        let mut scheduler = Counter::default();
        let mut renderer = lightlab_renderer::SoftwareRenderer::new(4, 4).unwrap();

        frame_loop
            .tick(&mut ctx, &OrbitInput::default(), &mut renderer, &mut scheduler)
            .unwrap();
        let before = ctx.camera.position;

        let drag = OrbitInput {
            rotate: glam::Vec2::new(50.0, 0.0),
            viewport_height: 4.0,
            ..OrbitInput::default()
        };
        frame_loop.tick(&mut ctx, &drag, &mut renderer, &mut scheduler).unwrap();
        assert!(ctx.camera.position.distance(before) > 1e-3);
        assert_eq!(renderer.frames_rendered(), 2);
    }
}
