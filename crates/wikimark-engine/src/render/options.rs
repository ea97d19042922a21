use pulldown_cmark::Options;

use crate::model::Document;

/// What happens to raw HTML written in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SafeMode {
    /// Show the markup as text.
    #[default]
    Escape,
    /// Drop it.
    Remove,
    /// Substitute [`SafeMode::PLACEHOLDER`].
    Replace,
    /// Pass it through untouched.
    Off,
}

impl SafeMode {
    pub const PLACEHOLDER: &'static str = "[HTML_REMOVED]";

    /// Reads a configuration value. Unknown values fall back to escaping.
    pub fn from_setting(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "remove" => SafeMode::Remove,
            "replace" => SafeMode::Replace,
            "off" | "false" | "none" => SafeMode::Off,
            _ => SafeMode::Escape,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub safe_mode: SafeMode,
    /// Document types rendered when transcluded. Untyped documents always are.
    pub render_types: Vec<String>,
}

impl RenderOptions {
    pub const MARKDOWN_TYPE: &'static str = "text/x-markdown";

    pub fn with_safe_mode(mut self, safe_mode: SafeMode) -> Self {
        self.safe_mode = safe_mode;
        self
    }

    pub fn is_renderable(&self, document: &Document) -> bool {
        match &document.doc_type {
            None => true,
            Some(doc_type) => self.render_types.iter().any(|t| t == doc_type),
        }
    }

    pub(crate) fn parser_options(&self) -> Options {
        Options::ENABLE_FOOTNOTES
            | Options::ENABLE_TABLES
            | Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_HEADING_ATTRIBUTES
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            safe_mode: SafeMode::default(),
            render_types: vec![Self::MARKDOWN_TYPE.to_string()],
        }
    }
}
