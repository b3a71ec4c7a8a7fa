//! Application state modules
//!
//! Session selection, the loading overlay, toasts, and the requests the
//! controller hands to the UI layer because they need the windowing system.

mod overlay;
mod session;
mod ui;

pub use overlay::{LoadingGuard, LoadingOverlay, ToastKind, Toasts};
pub use session::{EffectKey, OpenEffect, PreviewState, Session};
pub use ui::{GenerateForm, UiState};

use crate::api::EffectSummary;
use crate::styles::style_display_name;

/// Work the controller cannot do without the window system.
/// The UI layer drains these every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformRequest {
    /// Open a URL in the system browser or video player
    OpenUrl(String),
    /// Put text on the clipboard
    CopyText(String),
    /// Ask where to save `url`, then download it
    SaveFile { url: String, file_name: String },
}

/// An action waiting for the user to confirm it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    /// Render previews for every effect of a style
    BatchPreview { style: String },
    /// Remove a saved demo clip
    DeleteDemo { path: String, filename: String },
}

impl PendingConfirm {
    pub fn title(&self) -> &'static str {
        match self {
            PendingConfirm::BatchPreview { .. } => "Generate Previews",
            PendingConfirm::DeleteDemo { .. } => "Delete Demo",
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            PendingConfirm::BatchPreview { style } => format!(
                "Generate previews for every {} effect?",
                style_display_name(style)
            ),
            PendingConfirm::DeleteDemo { filename, .. } => {
                format!("Are you sure you want to delete '{}'?", filename)
            }
        }
    }
}

/// What the central effect area shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EffectsView {
    /// No style selected yet
    #[default]
    NoSelection,
    /// The style has no effects; offer to generate some
    Empty { style: String },
    /// Cards for each effect of the style
    Grid {
        style: String,
        effects: Vec<EffectSummary>,
    },
}

impl EffectsView {
    pub fn from_effects(style: String, effects: Vec<EffectSummary>) -> Self {
        if effects.is_empty() {
            EffectsView::Empty { style }
        } else {
            EffectsView::Grid { style, effects }
        }
    }

    /// Effects shown as cards (empty for the other views)
    pub fn cards(&self) -> &[EffectSummary] {
        match self {
            EffectsView::Grid { effects, .. } => effects,
            _ => &[],
        }
    }
}
