//! Render options supplied by the caller

use crate::error::{RenderError, Result};
use crate::types::{ColorScheme, InlineAttachment};
use serde::{Deserialize, Serialize};

/// Default bound on `>` nesting before quoted content is kept flat
pub const DEFAULT_MAX_QUOTE_DEPTH: usize = 16;

/// Options controlling how a message body is normalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Drop previously-quoted content (thread view)
    pub trim_quotes: bool,

    /// Deepest quote level that is parsed into blocks
    pub max_quote_depth: usize,

    /// Theme for the sandboxed HTML surface
    pub color_scheme: ColorScheme,

    /// Inline parts available for `cid:` resolution
    pub attachments: Vec<InlineAttachment>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            trim_quotes: false,
            max_quote_depth: DEFAULT_MAX_QUOTE_DEPTH,
            color_scheme: ColorScheme::default(),
            attachments: Vec::new(),
        }
    }
}

impl RenderOptions {
    /// Options for showing one message inside a thread
    #[must_use]
    pub fn threaded() -> Self {
        Self {
            trim_quotes: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_trim_quotes(mut self, trim_quotes: bool) -> Self {
        self.trim_quotes = trim_quotes;
        self
    }

    #[must_use]
    pub fn with_max_quote_depth(mut self, depth: usize) -> Self {
        self.max_quote_depth = depth;
        self
    }

    #[must_use]
    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<InlineAttachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Load options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RenderError::Config(e.to_string()))
    }
}
