use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

use crate::state::ToastKind;

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Studio,
    Slate,
    Sunset,
    Catppuccin,
}

impl ThemePreset {
    pub fn all() -> &'static [ThemePreset] {
        &[
            ThemePreset::Studio,
            ThemePreset::Slate,
            ThemePreset::Sunset,
            ThemePreset::Catppuccin,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Studio => "Studio",
            ThemePreset::Slate => "Slate",
            ThemePreset::Sunset => "Sunset",
            ThemePreset::Catppuccin => "Catppuccin Mocha",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Studio => Theme::studio(),
            ThemePreset::Slate => Theme::slate(),
            ThemePreset::Sunset => Theme::sunset(),
            ThemePreset::Catppuccin => Theme::catppuccin(),
        }
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg_darkest: Color32,
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub accent_hover: Color32,
    pub accent_muted: Color32,

    // Semantic colors
    pub info: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,

    // UI element colors
    pub border: Color32,
    pub selection: Color32,
}

impl Theme {
    /// Violet on near-black, the default look of the effect server's web page
    pub fn studio() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(15, 13, 24),
            bg_dark: Color32::from_rgb(23, 20, 36),
            bg_medium: Color32::from_rgb(33, 29, 51),
            bg_light: Color32::from_rgb(49, 43, 74),

            text_primary: Color32::from_rgb(246, 244, 255),
            text_secondary: Color32::from_rgb(198, 192, 224),
            text_muted: Color32::from_rgb(136, 130, 165),

            accent: Color32::from_rgb(124, 92, 246),        // Violet-500
            accent_hover: Color32::from_rgb(154, 128, 250), // Violet-400
            accent_muted: Color32::from_rgb(91, 64, 196),

            info: Color32::from_rgb(96, 165, 250),    // Blue-400
            success: Color32::from_rgb(52, 211, 153), // Emerald-400
            warning: Color32::from_rgb(251, 191, 36), // Amber-400
            error: Color32::from_rgb(248, 113, 113),  // Red-400

            border: Color32::from_rgb(66, 58, 96),
            selection: Color32::from_rgb(124, 92, 246).gamma_multiply(0.3),
        }
    }

    /// Neutral grays with a blue accent
    pub fn slate() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(11, 15, 23),
            bg_dark: Color32::from_rgb(17, 24, 39),
            bg_medium: Color32::from_rgb(30, 41, 59),
            bg_light: Color32::from_rgb(51, 65, 85),

            text_primary: Color32::from_rgb(241, 245, 249),
            text_secondary: Color32::from_rgb(203, 213, 225),
            text_muted: Color32::from_rgb(148, 163, 184),

            accent: Color32::from_rgb(59, 130, 246),        // Blue-500
            accent_hover: Color32::from_rgb(96, 165, 250),  // Blue-400
            accent_muted: Color32::from_rgb(37, 99, 235),

            info: Color32::from_rgb(125, 211, 252),   // Sky-300
            success: Color32::from_rgb(74, 222, 128), // Green-400
            warning: Color32::from_rgb(250, 204, 21), // Yellow-400
            error: Color32::from_rgb(251, 113, 133),  // Rose-400

            border: Color32::from_rgb(71, 85, 105),
            selection: Color32::from_rgb(59, 130, 246).gamma_multiply(0.3),
        }
    }

    /// Warm orange and magenta, for long color-grading sessions
    pub fn sunset() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(22, 14, 16),
            bg_dark: Color32::from_rgb(32, 20, 24),
            bg_medium: Color32::from_rgb(46, 29, 34),
            bg_light: Color32::from_rgb(66, 42, 48),

            text_primary: Color32::from_rgb(255, 247, 237),
            text_secondary: Color32::from_rgb(232, 206, 196),
            text_muted: Color32::from_rgb(168, 140, 132),

            accent: Color32::from_rgb(249, 115, 22),        // Orange-500
            accent_hover: Color32::from_rgb(251, 146, 60),  // Orange-400
            accent_muted: Color32::from_rgb(194, 65, 12),

            info: Color32::from_rgb(244, 114, 182),   // Pink-400
            success: Color32::from_rgb(163, 230, 53), // Lime-400
            warning: Color32::from_rgb(253, 224, 71), // Yellow-300
            error: Color32::from_rgb(239, 68, 68),    // Red-500

            border: Color32::from_rgb(92, 58, 64),
            selection: Color32::from_rgb(249, 115, 22).gamma_multiply(0.3),
        }
    }

    /// Catppuccin Mocha palette
    pub fn catppuccin() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(17, 17, 27),    // Crust
            bg_dark: Color32::from_rgb(24, 24, 37),       // Mantle
            bg_medium: Color32::from_rgb(30, 30, 46),     // Base
            bg_light: Color32::from_rgb(49, 50, 68),      // Surface0

            text_primary: Color32::from_rgb(205, 214, 244),   // Text
            text_secondary: Color32::from_rgb(186, 194, 222), // Subtext1
            text_muted: Color32::from_rgb(147, 153, 178),     // Overlay1

            accent: Color32::from_rgb(203, 166, 247),       // Mauve
            accent_hover: Color32::from_rgb(180, 190, 254), // Lavender
            accent_muted: Color32::from_rgb(160, 130, 200),

            info: Color32::from_rgb(137, 180, 250),    // Blue
            success: Color32::from_rgb(166, 227, 161), // Green
            warning: Color32::from_rgb(249, 226, 175), // Yellow
            error: Color32::from_rgb(243, 139, 168),   // Red

            border: Color32::from_rgb(69, 71, 90), // Surface1
            selection: Color32::from_rgb(203, 166, 247).gamma_multiply(0.3),
        }
    }

    /// Color used for a toast of the given severity
    pub fn toast_color(&self, kind: ToastKind) -> Color32 {
        match kind {
            ToastKind::Info => self.info,
            ToastKind::Success => self.success,
            ToastKind::Warning => self.warning,
            ToastKind::Error => self.error,
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.bg_dark;
        visuals.panel_fill = self.bg_dark;
        visuals.faint_bg_color = self.bg_medium;
        visuals.extreme_bg_color = self.bg_darkest;

        let widgets = &mut visuals.widgets;
        widgets.noninteractive.bg_fill = self.bg_medium;
        widgets.noninteractive.weak_bg_fill = self.bg_light;
        widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        widgets.inactive.bg_fill = self.bg_medium;
        widgets.inactive.weak_bg_fill = self.bg_light;
        widgets.inactive.bg_stroke = Stroke::new(1.0, self.border);
        widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);

        widgets.hovered.bg_fill = self.bg_light;
        widgets.hovered.weak_bg_fill = self.bg_light;
        widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        widgets.active.bg_fill = self.accent_muted;
        widgets.active.weak_bg_fill = self.accent_muted;
        widgets.active.bg_stroke = Stroke::new(1.0, self.accent_hover);
        widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        widgets.open.bg_fill = self.bg_light;
        widgets.open.weak_bg_fill = self.bg_light;
        widgets.open.bg_stroke = Stroke::new(1.0, self.accent);
        widgets.open.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent;

        // Flat windows; the loading overlay supplies its own dimming
        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_serializes_lowercase() {
        let json = serde_json::to_string(&ThemePreset::Catppuccin).unwrap();
        assert_eq!(json, "\"catppuccin\"");
        assert_eq!(ThemePreset::default(), ThemePreset::Studio);
    }

    #[test]
    fn test_toast_colors_distinct() {
        let theme = ThemePreset::Studio.theme();
        assert_ne!(theme.toast_color(ToastKind::Success), theme.toast_color(ToastKind::Error));
        assert_eq!(theme.toast_color(ToastKind::Warning), theme.warning);
    }
}
