//! UI modules
//!
//! Rendering only: each module reads `EffectBrowserApp` state and sends
//! `BrowserAction`s back to the controller.

mod components;
mod demos_window;
mod detail_window;
mod dialogs;
mod effects_panel;
mod styles_panel;
pub mod theme;

pub use components::{render_about_dialog, render_loading_overlay, render_toasts};
pub use demos_window::render_demos_window;
pub use detail_window::render_detail_window;
pub use dialogs::{render_confirm_dialog, render_settings_window};
pub use effects_panel::render_effects_panel;
pub use styles_panel::render_styles_panel;
