//! Application layer for lightlab.
//!
//! Builds the demo scene from configuration, binds the light to the control
//! panel and drives the per-frame update. The `lightlab` binary wires these
//! pieces to a window; [`headless`] runs them without one.

pub mod binder;
pub mod builder;
pub mod cli;
pub mod context;
pub mod frame_loop;
pub mod headless;

pub use binder::bind_light_controls;
pub use builder::{SceneHandles, build_scene};
pub use cli::Cli;
pub use context::AppContext;
pub use frame_loop::{FrameLoop, FrameScheduler, FrameState};
