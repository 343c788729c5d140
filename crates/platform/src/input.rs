//! Input handling for keyboard and mouse.
//!
//! Pointer motion and wheel steps accumulate between frames so that a frame
//! sees everything that happened since the previous one, however many
//! events arrived.

use std::collections::HashSet;

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

pub use winit::keyboard::KeyCode;

/// Pixels per wheel step for touchpads reporting pixel deltas.
const PIXELS_PER_LINE: f32 = 50.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Tracks keyboard and mouse state between frames.
#[derive(Debug, Default)]
pub struct InputState {
    pressed_keys: HashSet<KeyCode>,
    just_pressed_keys: HashSet<KeyCode>,
    pressed_buttons: HashSet<MouseButton>,

    /// Last known cursor position; `None` until the cursor enters the window
    mouse_position: Option<(f32, f32)>,
    /// Cursor travel per held button since the last frame
    drag_left: (f32, f32),
    drag_right: (f32, f32),
    /// Wheel steps since the last frame; positive is away from the user
    scroll_lines: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call once a frame has consumed the input.
    pub fn begin_frame(&mut self) {
        self.just_pressed_keys.clear();
        self.drag_left = (0.0, 0.0);
        self.drag_right = (0.0, 0.0);
        self.scroll_lines = 0.0;
    }

    /// Feed a window event. Returns whether the event was input.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.on_key_pressed(key),
                        ElementState::Released => self.on_key_released(key),
                    }
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = MouseButton::from_winit(*button) {
                    match state {
                        ElementState::Pressed => self.on_mouse_pressed(button),
                        ElementState::Released => self.on_mouse_released(button),
                    }
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_mouse_moved(position.x as f32, position.y as f32);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.on_scroll(lines);
                true
            }
            WindowEvent::Focused(false) => {
                self.pressed_keys.clear();
                self.pressed_buttons.clear();
                true
            }
            _ => false,
        }
    }

    pub fn on_key_pressed(&mut self, key: KeyCode) {
        if self.pressed_keys.insert(key) {
            self.just_pressed_keys.insert(key);
        }
    }

    pub fn on_key_released(&mut self, key: KeyCode) {
        self.pressed_keys.remove(&key);
    }

    pub fn on_mouse_pressed(&mut self, button: MouseButton) {
        self.pressed_buttons.insert(button);
    }

    pub fn on_mouse_released(&mut self, button: MouseButton) {
        self.pressed_buttons.remove(&button);
    }

    /// Handle cursor movement; travel counts toward every held drag button.
    pub fn on_mouse_moved(&mut self, x: f32, y: f32) {
        if let Some((old_x, old_y)) = self.mouse_position {
            let (dx, dy) = (x - old_x, y - old_y);
            if self.is_mouse_pressed(MouseButton::Left) {
                self.drag_left.0 += dx;
                self.drag_left.1 += dy;
            }
            if self.is_mouse_pressed(MouseButton::Right) || self.is_mouse_pressed(MouseButton::Middle) {
                self.drag_right.0 += dx;
                self.drag_right.1 += dy;
            }
        }
        self.mouse_position = Some((x, y));
    }

    pub fn on_scroll(&mut self, lines: f32) {
        self.scroll_lines += lines;
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    pub fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }

    /// Cursor travel with the left button held since the last frame.
    pub fn rotate_delta(&self) -> (f32, f32) {
        self.drag_left
    }

    /// Cursor travel with the right or middle button held since the last frame.
    pub fn pan_delta(&self) -> (f32, f32) {
        self.drag_right
    }

    pub fn scroll_lines(&self) -> f32 {
        self.scroll_lines
    }

    /// No pointer motion or wheel steps since the last frame.
    pub fn is_idle(&self) -> bool {
        self.drag_left == (0.0, 0.0) && self.drag_right == (0.0, 0.0) && self.scroll_lines == 0.0
    }
}
