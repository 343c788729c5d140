//! Platform layer for lightlab.
//!
//! This crate provides platform-specific functionality:
//! - Window management via winit
//! - Input handling (keyboard, mouse drags, wheel)
//! - Presentation of CPU frames through wgpu with an egui overlay

mod input;
mod presenter;
mod window;

pub use input::{InputState, KeyCode, MouseButton};
pub use presenter::Presenter;
pub use window::Window;

// Re-export winit types that users might need
pub use winit::event::WindowEvent;
pub use winit::event_loop::{ActiveEventLoop, EventLoop};
