//! Choose between block restructuring and isolated HTML rendering

use crate::types::RenderStrategy;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Plain text longer than this (trimmed) is worth parsing structurally
pub const SUBSTANTIAL_TEXT_CHARS: usize = 20;

static TABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<table\b").unwrap());

static LAYOUT_TABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<table\b[^>]*\b(?:width|bgcolor|cellpadding|cellspacing|align)\s*=").unwrap()
});

static CENTER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<center\b").unwrap());

static SIZED_IMAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*\b(?:width|height)\s*=\s*["']?\d{3,}"#).unwrap()
});

static FONT_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<font\b[^>]*\bcolor\s*=").unwrap());

static BACKGROUND_STYLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bstyle\s*=\s*(?:"[^"]*|'[^']*)background-(?:color|image)"#).unwrap()
});

static INVISIBLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:style|script|head|title)\b.*?</(?:style|script|head|title)\s*>|<!--.*?-->")
        .unwrap()
});

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static ENTITY_SPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&(?:nbsp|#160|#xa0|zwnj|#8204);").unwrap());

/// Decide how a message body should be rendered.
#[must_use]
pub fn choose_strategy(body_html: &str, body_text: &str) -> RenderStrategy {
    let has_html = !body_html.trim().is_empty();
    let has_text = !body_text.trim().is_empty();

    let strategy = if !has_html {
        if has_text {
            RenderStrategy::RichBlocks
        } else {
            RenderStrategy::IsolatedHtml
        }
    } else if is_designed_html(body_html) {
        RenderStrategy::IsolatedHtml
    } else if is_substantial_text(body_text) || has_visible_text(body_html) {
        RenderStrategy::RichBlocks
    } else {
        RenderStrategy::IsolatedHtml
    };

    debug!("Chose {strategy} for body (html: {has_html}, text: {has_text})");
    strategy
}

/// True when the HTML looks like a template-authored layout.
#[must_use]
pub fn is_designed_html(html: &str) -> bool {
    let Some(marker) = designed_marker(html) else {
        return false;
    };
    debug!("HTML body is designed ({marker})");
    true
}

/// True when the plain-text alternative is long enough to parse
#[must_use]
pub fn is_substantial_text(text: &str) -> bool {
    text.trim().chars().count() > SUBSTANTIAL_TEXT_CHARS
}

/// True when the markup has any text left once tags are removed
#[must_use]
pub fn has_visible_text(html: &str) -> bool {
    let without_invisible = INVISIBLE_REGEX.replace_all(html, "");
    let without_tags = TAG_REGEX.replace_all(&without_invisible, "");
    !ENTITY_SPACE_REGEX
        .replace_all(&without_tags, " ")
        .trim()
        .is_empty()
}

fn designed_marker(html: &str) -> Option<&'static str> {
    if TABLE_REGEX.find_iter(html).nth(1).is_some() {
        Some("multiple tables")
    } else if LAYOUT_TABLE_REGEX.is_match(html) {
        Some("layout table")
    } else if CENTER_REGEX.is_match(html) {
        Some("center element")
    } else if SIZED_IMAGE_REGEX.is_match(html) {
        Some("sized image")
    } else if FONT_COLOR_REGEX.is_match(html) {
        Some("font color")
    } else if BACKGROUND_STYLE_REGEX.is_match(html) {
        Some("background style")
    } else {
        None
    }
}
