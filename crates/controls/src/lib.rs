//! On-screen controls bound to scene properties.
//!
//! A [`ControlPanel`] holds numeric sliders and color pickers, each bound to
//! one property of one scene object. Writing a control mutates that single
//! field and then runs the control's listeners in registration order. The
//! panel is drawn with egui by [`ControlPanel::show`].

mod error;
mod panel;
mod ui;

pub use error::{ControlError, ControlResult};
pub use panel::{
    ColorBinding, Control, ControlBinding, ControlHandle, ControlId, ControlPanel, FolderId,
    Listener, NumberBinding,
};
