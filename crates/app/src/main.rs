//! lightlab - Main Entry Point
//!
//! Opens a window showing a textured ground plane, a cube and a sphere lit
//! by an adjustable light, with a control panel for the light's color,
//! intensity, position and target.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use lightlab_app::context::orbit_input;
use lightlab_app::{AppContext, Cli, FrameLoop, FrameScheduler, headless};
use lightlab_core::AppConfig;
use lightlab_platform::{InputState, KeyCode, Presenter, Window};
use lightlab_renderer::{SceneRenderer, SoftwareRenderer};
use lightlab_resources::TextureLoader;
use lightlab_scene::OrbitInput;

/// Asks winit for another redraw.
struct RedrawScheduler<'a>(&'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

/// Everything that exists once the window is up.
struct Session {
    window: Window,
    presenter: Presenter,
    renderer: SoftwareRenderer,
    ctx: AppContext,
}

impl Session {
    fn new(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self> {
        let window = Window::new(
            event_loop,
            config.window.width,
            config.window.height,
            &config.window.title,
        )
        .context("Failed to create window")?;
        let presenter = Presenter::new(&window).context("Failed to create presenter")?;

        let mut renderer = SoftwareRenderer::new(config.window.width, config.window.height)
            .context("Failed to create renderer")?;
        renderer
            .resize(window.width(), window.height())
            .context("Failed to size renderer to window")?;

        let mut ctx = AppContext::new(config.clone(), &TextureLoader::new())
            .context("Failed to build scene")?;
        ctx.camera.set_viewport(window.width(), window.height());

        Ok(Self {
            window,
            presenter,
            renderer,
            ctx,
        })
    }

    /// Reconfigure the surface only. The frame and camera keep their
    /// startup size and the presenter stretches the frame to the window.
    fn resize(&mut self, width: u32, height: u32) {
        self.window.resize(width, height);
        if self.window.is_minimized() {
            return;
        }
        self.presenter.resize(width, height);
    }
}

struct App {
    config: AppConfig,
    session: Option<Session>,
    input: InputState,
    frame_loop: FrameLoop,
    /// Startup failure reported from `main` after the loop exits
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            session: None,
            input: InputState::new(),
            frame_loop: FrameLoop::new(),
            error: None,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.window.is_minimized() {
            return;
        }

        let input = if session.presenter.wants_pointer() {
            OrbitInput {
                viewport_height: session.window.height() as f32,
                ..OrbitInput::default()
            }
        } else {
            orbit_input(&self.input, session.window.height())
        };

        let Session {
            window,
            presenter,
            renderer,
            ctx,
        } = session;

        if let Err(e) = self.frame_loop.tick(
            ctx,
            &input,
            renderer,
            &mut RedrawScheduler(window),
        ) {
            error!("Render error: {}", e);
        }

        let result = presenter.present(window, renderer.frame(), |egui_ctx| {
            if let Err(e) = ctx.panel.show(egui_ctx, &mut ctx.scene) {
                warn!("Control update failed: {}", e);
            }
        });
        if let Err(e) = result {
            error!("Present failed: {}", e);
            event_loop.exit();
        }

        self.input.begin_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match Session::new(event_loop, &self.config) {
            Ok(session) => {
                info!("Initialization complete, entering main loop");
                session.window.request_redraw();
                self.session = Some(session);
            }
            Err(e) => {
                error!("Startup failed: {:#}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let consumed = session.presenter.on_window_event(&session.window, &event);
        if !consumed {
            self.input.handle_window_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                info!("Window resized to {}x{}", size.width, size.height);
                session.resize(size.width, size.height);
                session.window.request_redraw();
            }
            WindowEvent::KeyboardInput { .. } if self.input.is_key_just_pressed(KeyCode::Escape) => {
                info!("Escape pressed, shutting down");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    lightlab_core::init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    cli.apply(&mut config);
    config.validate()?;

    if cli.headless {
        info!("Starting lightlab headless ({} frames)", cli.frames);
        headless::run(config, cli.frames, &cli.output)?;
        return Ok(());
    }

    info!("Starting lightlab");
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
