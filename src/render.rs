//! Entry points used by the message view

use crate::blocks::parse_with_depth_limit;
use crate::classifier::{choose_strategy, is_substantial_text};
use crate::config::RenderOptions;
use crate::error::{RenderError, Result};
use crate::html_quotes::strip_html_quotes;
use crate::html_text::html_to_text;
use crate::trim::trim_quotes;
use crate::types::{ColorScheme, InlineAttachment, RenderStrategy, RenderedBody};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

static CID_SRC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bsrc\s*=\s*(["']?)cid:<?([^"'\s>]+?)>?(["']?)(\s|/?>)"#).unwrap()
});

/// Normalize one message body for display.
///
/// With `trim_quotes` set, quoted replies are stripped from the HTML before
/// classification and cut from the parsed blocks afterwards.
#[must_use]
pub fn render_body(body_html: &str, body_text: &str, options: &RenderOptions) -> RenderedBody {
    let html: Cow<'_, str> = if options.trim_quotes && !body_html.trim().is_empty() {
        Cow::Owned(strip_html_quotes(body_html))
    } else {
        Cow::Borrowed(body_html)
    };

    match choose_strategy(&html, body_text) {
        RenderStrategy::IsolatedHtml => RenderedBody::IsolatedHtml {
            html: resolve_inline_images(&html, &options.attachments),
        },
        RenderStrategy::RichBlocks => {
            let text: Cow<'_, str> = if html.trim().is_empty() || is_substantial_text(body_text) {
                Cow::Borrowed(body_text)
            } else {
                Cow::Owned(html_to_text(&html))
            };

            let blocks = parse_with_depth_limit(&text, options.max_quote_depth);
            let blocks = if options.trim_quotes {
                trim_quotes(blocks)
            } else {
                blocks
            };
            RenderedBody::RichBlocks { blocks }
        }
    }
}

/// Parse a raw RFC 5322 message and normalize its displayable body.
pub fn render_message(raw: &[u8], options: &RenderOptions) -> Result<RenderedBody> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| RenderError::Structure(e.to_string()))?;
    let (text, html) = extract_body_parts(&parsed)?;

    debug!(
        "Message bodies: {} text bytes, {} html bytes",
        text.len(),
        html.as_deref().map_or(0, str::len)
    );

    Ok(render_body(html.as_deref().unwrap_or(""), &text, options))
}

/// Wrap isolated markup in a document shell that declares its color scheme.
#[must_use]
pub fn sandbox_document(html: &str, scheme: ColorScheme) -> String {
    let scheme = scheme.as_str();
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <meta name=\"color-scheme\" content=\"{scheme}\">\
         <style>:root {{ color-scheme: {scheme}; }}</style>\
         </head><body>{html}</body></html>"
    )
}

/// Point `cid:` image sources at the URLs of matching inline attachments.
#[must_use]
pub fn resolve_inline_images(html: &str, attachments: &[InlineAttachment]) -> String {
    if attachments.is_empty() {
        return html.to_string();
    }

    CID_SRC_REGEX
        .replace_all(html, |caps: &Captures<'_>| {
            let id = &caps[2];
            attachments
                .iter()
                .find(|a| a.content_id.eq_ignore_ascii_case(id))
                .map_or_else(
                    || caps[0].to_string(),
                    |a| format!("src=\"{}\"{}", a.url, &caps[4]),
                )
        })
        .into_owned()
}

fn extract_body_parts(parsed: &mailparse::ParsedMail) -> Result<(String, Option<String>)> {
    let mut text = String::new();
    let mut html: Option<String> = None;

    if parsed.subparts.is_empty() {
        let body = parsed
            .get_body()
            .map_err(|e| RenderError::Decode(e.to_string()))?;
        if parsed.ctype.mimetype.to_lowercase().contains("text/html") {
            html = Some(body);
        } else {
            text = body;
        }
    } else {
        extract_body_recursive(parsed, &mut text, &mut html);
    }

    Ok((text, html))
}

fn extract_body_recursive(
    parsed: &mailparse::ParsedMail,
    text: &mut String,
    html: &mut Option<String>,
) {
    for part in &parsed.subparts {
        let content_type = part.ctype.mimetype.to_lowercase();

        if part.subparts.is_empty() {
            if let Ok(body) = part.get_body() {
                if content_type.contains("text/plain") && text.is_empty() {
                    *text = body;
                } else if content_type.contains("text/html") && html.is_none() {
                    *html = Some(body);
                }
            }
        } else {
            extract_body_recursive(part, text, html);
        }
    }
}
