//! Display metadata for the known effect styles.
//!
//! The server can report any style name; the six styles the generator ships
//! with get a dedicated icon and display name, everything else falls back to a
//! generic icon and the raw name.

/// Icon used for styles outside the known table
pub const FALLBACK_ICON: &str = "✨";

/// A known style's presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub display_name: &'static str,
}

/// Styles the generator knows how to produce, in form order
pub const KNOWN_STYLES: &[StyleInfo] = &[
    StyleInfo { name: "shake", icon: "〰", display_name: "Shake" },
    StyleInfo { name: "zoom", icon: "🔍", display_name: "Zoom" },
    StyleInfo { name: "blur", icon: "🌫", display_name: "Blur" },
    StyleInfo { name: "transition", icon: "⇄", display_name: "Transition" },
    StyleInfo { name: "glitch", icon: "⚡", display_name: "Glitch" },
    StyleInfo { name: "color", icon: "🎨", display_name: "Color" },
];

fn lookup(name: &str) -> Option<&'static StyleInfo> {
    KNOWN_STYLES.iter().find(|s| s.name == name)
}

/// Icon for a style name
pub fn style_icon(name: &str) -> &'static str {
    lookup(name).map(|s| s.icon).unwrap_or(FALLBACK_ICON)
}

/// Human-readable name for a style; unknown names are returned unchanged
pub fn style_display_name(name: &str) -> &str {
    lookup(name).map(|s| s.display_name).unwrap_or(name)
}

/// Heading shown above the effect grid for a style
pub fn effects_title(name: &str) -> String {
    format!("{} {} effects", style_icon(name), style_display_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_styles() {
        assert_eq!(style_display_name("zoom"), "Zoom");
        assert_eq!(style_icon("glitch"), "⚡");
        assert_eq!(KNOWN_STYLES.len(), 6);
    }

    #[test]
    fn test_unknown_style_fallback() {
        for name in ["sparkle", "", "SHAKE", "shake "] {
            assert_eq!(style_icon(name), FALLBACK_ICON);
            assert_eq!(style_display_name(name), name);
        }
    }

    #[test]
    fn test_effects_title() {
        assert_eq!(effects_title("blur"), "🌫 Blur effects");
        assert_eq!(effects_title("custom"), "✨ custom effects");
    }
}
