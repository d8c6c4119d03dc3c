// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Body Normalization
//!
//! Turns a raw message body (plain text and/or HTML) into something a mail
//! client can render: either a tree of typed blocks recovered from the
//! conventions of plain-text email, or a decision to show designed HTML
//! verbatim in an isolated surface.
//!
//! # Features
//!
//! - Designed-HTML detection (newsletters and templates stay untouched)
//! - Provider-specific quote stripping for Gmail, Apple Mail, Outlook,
//!   Yahoo and ProtonMail HTML
//! - HTML to text conversion that keeps links, lists and headings
//! - Plain-text block parsing: paragraphs, lists, signatures, dividers,
//!   nested quotes and attribution lines
//! - Hard-wrap detection and reflow
//! - Quote trimming for thread views
//!
//! # Example
//!
//! ```rust
//! use email_blocks::{EmailBlock, RenderOptions, RenderedBody, render_body};
//!
//! let text = "Hi,\n\nCan you review this?\n\n\
//!             On Mon, Jan 5, 2026 at 9:00 AM Bob Lee <bob@co.com> wrote:\n\
//!             > Sure, attached.";
//! let body = render_body("", text, &RenderOptions::threaded());
//!
//! assert_eq!(
//!     body,
//!     RenderedBody::RichBlocks {
//!         blocks: vec![
//!             EmailBlock::paragraph("Hi,"),
//!             EmailBlock::paragraph("Can you review this?"),
//!         ],
//!     }
//! );
//! ```

mod attribution;
mod blocks;
mod classifier;
mod config;
mod error;
mod html_quotes;
mod html_text;
mod reflow;
mod render;
mod trim;
mod types;

pub use attribution::{initials, parse_attribution};
pub use blocks::{SECTION_HEADER_MAX_CHARS, parse, parse_with_depth_limit};
pub use classifier::{
    SUBSTANTIAL_TEXT_CHARS, choose_strategy, has_visible_text, is_designed_html,
    is_substantial_text,
};
pub use config::{DEFAULT_MAX_QUOTE_DEPTH, RenderOptions};
pub use error::{RenderError, Result};
pub use html_quotes::strip_html_quotes;
pub use html_text::html_to_text;
pub use reflow::{WRAP_RATIO_PERCENT, WRAP_WIDTH, is_hard_wrapped, reflow};
pub use render::{render_body, render_message, resolve_inline_images, sandbox_document};
pub use trim::trim_quotes;
pub use types::*;
