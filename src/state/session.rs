//! Selection state for one browsing session

use crate::api::{non_empty, Demo, EffectDetail};

/// Identifies one effect within a style
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectKey {
    pub style: String,
    pub effect_id: String,
}

impl EffectKey {
    pub fn new(style: impl Into<String>, effect_id: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            effect_id: effect_id.into(),
        }
    }
}

/// Whether the open effect has a rendered preview clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    /// Server-relative path of the clip
    Available(String),
    Missing,
}

/// The effect most recently opened in the detail window.
///
/// This is a snapshot: it is not re-validated against the effect list, so it
/// can outlive the effect on the server.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenEffect {
    pub key: EffectKey,
    pub detail: EffectDetail,
    pub preview: PreviewState,
}

impl OpenEffect {
    pub fn name(&self) -> &str {
        non_empty(self.detail.name.as_deref()).unwrap_or(&self.key.effect_id)
    }

    pub fn description(&self) -> &str {
        non_empty(self.detail.description.as_deref()).unwrap_or("No description")
    }

    pub fn author(&self) -> &str {
        non_empty(self.detail.author.as_deref()).unwrap_or("Unknown")
    }

    pub fn xml(&self) -> &str {
        &self.detail.xml_content
    }
}

/// What the user is currently looking at
#[derive(Debug, Default)]
pub struct Session {
    /// Style whose effects are shown in the grid
    pub current_style: Option<String>,
    /// Last effect opened in the detail window
    pub current_effect: Option<OpenEffect>,
    /// Every demo from the last gallery fetch
    pub all_demos: Vec<Demo>,
    /// Gallery search term
    pub demo_filter: String,
}

impl Session {
    /// Whether `key` is the effect currently open in the detail window
    pub fn is_open(&self, key: &EffectKey) -> bool {
        self.current_effect.as_ref().is_some_and(|open| &open.key == key)
    }

    pub fn is_current_style(&self, style: &str) -> bool {
        self.current_style.as_deref() == Some(style)
    }
}
