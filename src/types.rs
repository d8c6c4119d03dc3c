//! Core types for normalized email bodies

use serde::{Deserialize, Serialize};
use std::fmt;

/// One structurally distinct unit of a parsed email body.
///
/// Blocks are produced top-to-bottom in reading order. `Quote` and
/// `QuotedMessage` own their nested sequences; nothing points back up the
/// tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EmailBlock {
    /// One or more soft-wrapped lines of prose
    Paragraph { text: String },

    /// Short line ending in `:` that introduces the following content
    SectionHeader { text: String },

    /// A `>`-prefixed region, parsed recursively
    Quote { blocks: Vec<EmailBlock> },

    /// A quote merged with the attribution line that introduced it
    QuotedMessage {
        name: String,
        initials: String,
        blocks: Vec<EmailBlock>,
    },

    /// Attribution line whose sender could not be recovered
    QuoteAttribution { text: String },

    /// Everything after a signature delimiter
    Signature { lines: Vec<String> },

    UnorderedList { items: Vec<String> },

    OrderedList { items: Vec<String> },

    /// Horizontal rule or forwarded-message banner
    Divider,

    /// Indented block or forwarded header block, shown verbatim
    Preformatted { text: String },
}

impl EmailBlock {
    /// Create a paragraph block
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    /// True for a paragraph that carries no visible text
    #[must_use]
    pub fn is_empty_paragraph(&self) -> bool {
        matches!(self, Self::Paragraph { text } if text.trim().is_empty())
    }

    /// True for blocks that represent earlier messages in a thread
    #[must_use]
    pub const fn is_quoted(&self) -> bool {
        matches!(
            self,
            Self::Quote { .. } | Self::QuotedMessage { .. } | Self::QuoteAttribution { .. }
        )
    }

    /// Nested blocks of a quote, if any
    #[must_use]
    pub fn children(&self) -> Option<&[Self]> {
        match self {
            Self::Quote { blocks } | Self::QuotedMessage { blocks, .. } => {
                Some(blocks.as_slice())
            }
            _ => None,
        }
    }

    /// Text carried directly by this block (nested quotes excluded)
    #[must_use]
    pub fn text_content(&self) -> Vec<&str> {
        match self {
            Self::Paragraph { text }
            | Self::SectionHeader { text }
            | Self::QuoteAttribution { text }
            | Self::Preformatted { text } => vec![text.as_str()],
            Self::Signature { lines } => lines.iter().map(String::as_str).collect(),
            Self::UnorderedList { items } | Self::OrderedList { items } => {
                items.iter().map(String::as_str).collect()
            }
            Self::QuotedMessage { name, .. } => vec![name.as_str()],
            Self::Quote { .. } | Self::Divider => Vec::new(),
        }
    }
}

/// Sender recovered from a quote attribution line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Display name (e.g., "Niko Cunningham")
    pub name: String,

    /// One or two uppercase letters (e.g., "NC")
    pub initials: String,
}

impl fmt::Display for Attribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.initials)
    }
}

/// How a message body should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStrategy {
    /// Restructure the body into a block tree
    RichBlocks,

    /// Show the original markup in a sandboxed surface
    IsolatedHtml,
}

impl fmt::Display for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RichBlocks => write!(f, "rich_blocks"),
            Self::IsolatedHtml => write!(f, "isolated_html"),
        }
    }
}

/// Output handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum RenderedBody {
    RichBlocks { blocks: Vec<EmailBlock> },

    /// Raw markup to show verbatim; empty means the message has no content
    IsolatedHtml { html: String },
}

impl RenderedBody {
    #[must_use]
    pub const fn strategy(&self) -> RenderStrategy {
        match self {
            Self::RichBlocks { .. } => RenderStrategy::RichBlocks,
            Self::IsolatedHtml { .. } => RenderStrategy::IsolatedHtml,
        }
    }

    /// Blocks of a rich rendering
    #[must_use]
    pub fn blocks(&self) -> Option<&[EmailBlock]> {
        match self {
            Self::RichBlocks { blocks } => Some(blocks.as_slice()),
            Self::IsolatedHtml { .. } => None,
        }
    }

    /// True when there is nothing to show at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::RichBlocks { blocks } => blocks.is_empty(),
            Self::IsolatedHtml { html } => html.trim().is_empty(),
        }
    }
}

/// Theme the sandboxed HTML surface is presented in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Inline part referenced from HTML through a `cid:` URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineAttachment {
    /// Content-ID without angle brackets
    pub content_id: String,

    /// Location the rendering layer can load the part from
    pub url: String,
}

impl InlineAttachment {
    #[must_use]
    pub fn new(content_id: impl Into<String>, url: impl Into<String>) -> Self {
        let content_id: String = content_id.into();
        Self {
            content_id: content_id.trim().trim_matches(['<', '>']).to_string(),
            url: url.into(),
        }
    }
}
