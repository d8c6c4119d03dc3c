//! Removal of quoted previous messages from HTML bodies
//!
//! Each rule targets markup that a single mail client emits around the
//! message being replied to. Unknown clients are left untouched: a visible
//! quote is acceptable, deleting the sender's own text is not.

use ego_tree::{NodeId, NodeRef};
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;
use tracing::debug;

static GMAIL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".gmail_quote, .gmail_quote_container, .gmail_attr, blockquote.gmail_quote")
        .unwrap()
});

static APPLE_CITE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"blockquote[type="cite"]"#).unwrap());

static OUTLOOK_APPEND_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#appendonsend").unwrap());

static OUTLOOK_REPLY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#divRplyFwdMsg").unwrap());

static YAHOO_PROTON_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".yahoo_quoted, .protonmail_quote").unwrap());

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

static DOCUMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:!doctype|html|head|body)\b").unwrap());

/// Strip provider-specific quoted-reply subtrees from an HTML body.
///
/// Nodes are collected in one read-only pass and detached afterwards.
/// Trailing `<br>` runs left behind at the top level are removed as well.
/// Input without any match is returned unchanged.
#[must_use]
pub fn strip_html_quotes(html: &str) -> String {
    let is_document = DOCUMENT_REGEX.is_match(html);
    let mut document = if is_document {
        Html::parse_document(html)
    } else {
        Html::parse_fragment(html)
    };

    let doomed = collect_quoted_nodes(&document);
    for id in &doomed {
        if let Some(mut node) = document.tree.get_mut(*id) {
            node.detach();
        }
    }

    let container = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element())
        .id();
    let trimmed_breaks = trim_trailing_breaks(&mut document, container);

    if doomed.is_empty() && trimmed_breaks == 0 {
        return html.to_string();
    }

    debug!(
        "Stripped {} quoted nodes and {trimmed_breaks} trailing breaks",
        doomed.len()
    );

    if is_document {
        document.html()
    } else {
        document.root_element().inner_html()
    }
}

fn collect_quoted_nodes(document: &Html) -> Vec<NodeId> {
    let mut doomed = Vec::new();

    let gmail = document.select(&GMAIL_SELECTOR).map(|el| el.id());
    log_rule("gmail", extend_counted(&mut doomed, gmail));

    let mut apple = Vec::new();
    for quote in document.select(&APPLE_CITE_SELECTOR) {
        apple.push(quote.id());
        if let Some(prev) = previous_significant_sibling(*quote)
            && text_of(prev).trim_end().ends_with("wrote:")
        {
            apple.push(prev.id());
        }
    }
    log_rule("apple mail", extend_counted(&mut doomed, apple));

    let mut outlook = Vec::new();
    for marker in document.select(&OUTLOOK_APPEND_SELECTOR) {
        outlook.push(marker.id());
        outlook.extend(marker.next_siblings().map(|n| n.id()));
    }
    for marker in document.select(&OUTLOOK_REPLY_SELECTOR) {
        outlook.push(marker.id());
        outlook.extend(marker.next_siblings().map(|n| n.id()));
        if let Some(prev) = previous_significant_sibling(*marker)
            && ElementRef::wrap(prev).is_some_and(|el| el.value().name() == "hr")
        {
            outlook.push(prev.id());
        }
    }
    log_rule("outlook", extend_counted(&mut doomed, outlook));

    let yahoo_proton = document.select(&YAHOO_PROTON_SELECTOR).map(|el| el.id());
    log_rule("yahoo/proton", extend_counted(&mut doomed, yahoo_proton));

    doomed
}

fn extend_counted(doomed: &mut Vec<NodeId>, ids: impl IntoIterator<Item = NodeId>) -> usize {
    let before = doomed.len();
    for id in ids {
        if !doomed.contains(&id) {
            doomed.push(id);
        }
    }
    doomed.len() - before
}

fn log_rule(rule: &str, count: usize) {
    if count > 0 {
        debug!("Quote rule {rule} matched {count} nodes");
    }
}

/// Closest preceding sibling that is not whitespace or a comment
fn previous_significant_sibling(node: NodeRef<'_, Node>) -> Option<NodeRef<'_, Node>> {
    let mut current = node.prev_sibling();
    while let Some(sibling) = current {
        match sibling.value() {
            Node::Text(text) if text.trim().is_empty() => {}
            Node::Comment(_) => {}
            _ => return Some(sibling),
        }
        current = sibling.prev_sibling();
    }
    None
}

fn text_of(node: NodeRef<'_, Node>) -> String {
    node.descendants()
        .filter_map(|n| n.value().as_text())
        .map(|t| &**t)
        .collect()
}

/// Detach `<br>` and whitespace nodes from the end of `container`
fn trim_trailing_breaks(document: &mut Html, container: NodeId) -> usize {
    let mut removed = 0;
    loop {
        let Some(last) = document.tree.get(container).and_then(|c| c.last_child()) else {
            return removed;
        };
        match last.value() {
            Node::Element(el) if el.name() == "br" => removed += 1,
            Node::Text(text) if text.trim().is_empty() => {}
            _ => return removed,
        }
        let id = last.id();
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}
