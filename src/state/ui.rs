//! UI-related application state

use crate::styles::KNOWN_STYLES;
use crate::ui::theme::Theme;

/// Inputs of the "generate effects" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateForm {
    /// Selected style name; empty until the user picks one
    pub style: String,
    pub count: u32,
}

impl GenerateForm {
    pub fn new(count: u32) -> Self {
        Self {
            style: String::new(),
            count,
        }
    }

    /// Style names offered by the form
    pub fn choices() -> impl Iterator<Item = &'static str> {
        KNOWN_STYLES.iter().map(|s| s.name)
    }
}

/// UI-related state
pub struct UiState {
    /// Current theme
    pub current_theme: Theme,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
    /// Whether to show the settings window
    pub show_settings: bool,
    /// Generation form inputs
    pub generate_form: GenerateForm,
    /// Server URL being edited in settings
    pub server_url_input: String,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(theme: Theme, default_count: u32, server_url: String) -> Self {
        Self {
            current_theme: theme,
            theme_dirty: true, // Apply theme on first frame
            show_about_dialog: false,
            show_settings: false,
            generate_form: GenerateForm::new(default_count),
            server_url_input: server_url,
        }
    }
}
