//! HTML to plain text conversion for the block parser
//!
//! The output is shaped so that [`crate::parse`] can recover structure from
//! it: block elements become paragraph breaks, list items get `•` or `N.`
//! markers and rules become `---`.

use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::Element;
use scraper::{Html, Node};
use std::sync::LazyLock;

static BLANK_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Convert an HTML body into plain text.
///
/// Entities are decoded by the HTML parser; runs of three or more newlines
/// collapse to a single blank line and the result is trimmed.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut writer = TextWriter::default();
    writer.walk(*document.root_element());

    let text = writer
        .out
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");

    BLANK_RUN_REGEX
        .replace_all(&text, "\n\n")
        .trim()
        .to_string()
}

#[derive(Default)]
struct TextWriter {
    out: String,
    pre_depth: usize,
    /// One entry per open list: the next number for `<ol>`, `None` for `<ul>`
    lists: Vec<Option<usize>>,
}

/// Pending work for the walk; `Close` runs after an element's children
enum Step<'a> {
    Enter(NodeRef<'a, Node>),
    Close(Close),
}

#[derive(Clone, Copy)]
enum Close {
    Block,
    List,
    Item,
    Pre,
    Row,
    Cell,
}

impl TextWriter {
    /// Depth-first walk over an explicit stack so deeply nested markup
    /// cannot exhaust the call stack
    fn walk(&mut self, root: NodeRef<'_, Node>) {
        let mut stack = Vec::new();
        push_children(&mut stack, root);

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(node) => match node.value() {
                    Node::Text(text) => self.push_text(text),
                    Node::Element(el) => self.open(&mut stack, node, el),
                    _ => {}
                },
                Step::Close(close) => self.close(close),
            }
        }
    }

    fn open<'a>(&mut self, stack: &mut Vec<Step<'a>>, node: NodeRef<'a, Node>, el: &Element) {
        let close = match el.name() {
            "script" | "style" | "head" | "title" | "meta" | "link" | "template" | "img" => {
                return;
            }
            "br" => {
                self.out.push('\n');
                return;
            }
            "hr" => {
                self.start_line();
                self.out.push_str("---\n");
                return;
            }
            "a" => {
                self.anchor(node, el);
                return;
            }
            "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" => {
                self.start_line();
                Some(Close::Block)
            }
            "ul" | "ol" => {
                let counter = (el.name() == "ol").then(|| {
                    el.attr("start")
                        .and_then(|s| s.trim().parse::<usize>().ok())
                        .unwrap_or(1)
                });
                self.start_line();
                self.lists.push(counter);
                Some(Close::List)
            }
            "li" => {
                self.start_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.out.push_str(&indent);
                self.out.push_str(&marker);
                Some(Close::Item)
            }
            "pre" => {
                self.start_line();
                self.pre_depth += 1;
                Some(Close::Pre)
            }
            "tr" => Some(Close::Row),
            "td" | "th" => Some(Close::Cell),
            _ => None,
        };

        if let Some(close) = close {
            stack.push(Step::Close(close));
        }
        push_children(stack, node);
    }

    fn close(&mut self, close: Close) {
        match close {
            Close::Block => self.out.push_str("\n\n"),
            Close::List => {
                self.lists.pop();
                self.start_line();
                if self.lists.is_empty() {
                    self.out.push('\n');
                }
            }
            Close::Item => self.out.push('\n'),
            Close::Pre => {
                self.pre_depth -= 1;
                self.out.push_str("\n\n");
            }
            Close::Row => self.start_line(),
            Close::Cell => self.out.push(' '),
        }
    }

    fn anchor(&mut self, node: NodeRef<'_, Node>, el: &Element) {
        let label = collapse_whitespace(&text_of(node));
        let label = label.trim();
        let href = el.attr("href").unwrap_or("").trim();

        // image-only links carry no text worth keeping
        if label.is_empty() {
            return;
        }

        let is_navigable =
            !(href.is_empty() || href.starts_with('#') || href.starts_with("javascript:"));
        if is_navigable && !label_matches_url(label, href) {
            self.push_text(&format!("{label} ( {href} )"));
        } else {
            self.push_text(label);
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.pre_depth > 0 {
            self.out.push_str(text);
            return;
        }

        let collapsed = collapse_whitespace(text);
        let at_line_start = self.out.is_empty() || self.out.ends_with('\n');
        let text = if at_line_start || self.out.ends_with(' ') {
            collapsed.trim_start()
        } else {
            &collapsed
        };
        self.out.push_str(text);
    }

    fn start_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }
}

fn push_children<'a>(stack: &mut Vec<Step<'a>>, node: NodeRef<'a, Node>) {
    let children: Vec<_> = node.children().collect();
    stack.extend(children.into_iter().rev().map(Step::Enter));
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").into_owned()
}

fn text_of(node: NodeRef<'_, Node>) -> String {
    node.descendants()
        .filter_map(|n| n.value().as_text())
        .map(|t| &**t)
        .collect()
}

/// True when the visible text of a link already shows its target
fn label_matches_url(label: &str, href: &str) -> bool {
    let target = href.strip_prefix("mailto:").unwrap_or(href);
    let without_scheme = strip_scheme(target);
    let host = url_host(target);

    [target, without_scheme, host].iter().any(|candidate| {
        let candidate = candidate.trim_end_matches('/');
        let label = label.trim_end_matches('/');
        label.eq_ignore_ascii_case(candidate)
            || label
                .strip_prefix("www.")
                .is_some_and(|l| l.eq_ignore_ascii_case(candidate))
    })
}

fn strip_scheme(url: &str) -> &str {
    url.split_once("://").map_or(url, |(_, rest)| rest)
}

fn url_host(url: &str) -> &str {
    let rest = strip_scheme(url);
    let host = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    host.strip_prefix("www.").unwrap_or(host)
}
