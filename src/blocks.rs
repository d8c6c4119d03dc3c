//! Plain-text body parser
//!
//! A single forward scan over lines. At each position the rules below are
//! tried in order and the first one that matches consumes one or more lines:
//!
//! 1. signature delimiter (`--` or a mobile-client footer)
//! 2. forwarded-message banner, with its header block
//! 3. divider rule
//! 4. quote attribution (may wrap over several lines)
//! 5. `>` quoted region, parsed recursively
//! 6. unordered / ordered list
//! 7. indented preformatted run
//! 8. paragraph (default)
//!
//! Each rule is a `match_*` function returning the produced block and the
//! number of lines consumed, so the order above is the only coupling
//! between them.

use crate::attribution::parse_attribution;
use crate::config::DEFAULT_MAX_QUOTE_DEPTH;
use crate::reflow::reflow;
use crate::types::EmailBlock;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static MOBILE_SIGNATURE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:sent from my .+|sent from (?:mail|outlook|yahoo mail|proton ?mail|gmail) for .+|sent from (?:outlook|yahoo mail|proton ?mail|mail for windows)(?: .*)?|get outlook for .+|sent with proton ?mail.*|envoyé de mon .+|envoyé depuis mon .+|von meinem .+ gesendet|gesendet von meinem .+|enviado desde mi .+|enviado do meu .+|inviato da(?:l mio)? .+|verzonden vanaf mijn .+|skickat från min .+)$",
    )
    .unwrap()
});

static FORWARD_BANNER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^-{3,}\s*(?:begin\s+)?forwarded message\s*:?\s*-{3,}$").unwrap()
});

static FORWARD_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:from|to|cc|date|subject|sent):").unwrap());

static DIVIDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-{3,}|={3,}|_{3,}|\*{3,})$").unwrap());

static ATTRIBUTION_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^On\s.+\swrote:$").unwrap());

static WROTE_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bwrote:$").unwrap());

static UNORDERED_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*•]\s+(.*)$").unwrap());

static ORDERED_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d{1,3}[.)]\s+(.*)$").unwrap());

/// Longest single line that can still be a section header
pub const SECTION_HEADER_MAX_CHARS: usize = 80;

/// Lines a wrapped attribution may continue over before it is abandoned
const ATTRIBUTION_MAX_CONTINUATION: usize = 3;

/// Indentation (in spaces) that starts a preformatted run
const PREFORMATTED_INDENT: usize = 4;

/// Indentation (in spaces) that continues the previous list item
const LIST_CONTINUATION_INDENT: usize = 2;

/// Parse a plain-text body into blocks.
#[must_use]
pub fn parse(text: &str) -> Vec<EmailBlock> {
    parse_with_depth_limit(text, DEFAULT_MAX_QUOTE_DEPTH)
}

/// Parse a plain-text body, recursing into at most `max_depth` quote levels.
///
/// Quoted regions deeper than the limit are kept verbatim as a single
/// `Preformatted` block.
#[must_use]
pub fn parse_with_depth_limit(text: &str, max_depth: usize) -> Vec<EmailBlock> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let blocks = Parser::new(max_depth).parse_lines(&lines, 0);
    debug!("Parsed {} lines into {} blocks", lines.len(), blocks.len());
    blocks
}

/// Kind of list marker a line starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// Outcome of a rule that matched at the current line
#[derive(Debug)]
struct Matched {
    blocks: Vec<EmailBlock>,
    consumed: usize,
}

impl Matched {
    fn one(block: EmailBlock, consumed: usize) -> Self {
        Self {
            blocks: vec![block],
            consumed,
        }
    }
}

struct Parser {
    max_depth: usize,
}

impl Parser {
    const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn parse_lines(&self, lines: &[&str], depth: usize) -> Vec<EmailBlock> {
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            if is_blank(lines[i]) {
                i += 1;
                continue;
            }

            if let Some(signature) = match_signature(lines, i) {
                blocks.extend(signature);
                break;
            }

            let matched = match_forward_banner(lines, i)
                .or_else(|| match_divider(lines, i))
                .or_else(|| match_attribution(lines, i))
                .or_else(|| self.match_quote(lines, i, depth))
                .or_else(|| match_list(lines, i))
                .or_else(|| match_preformatted(lines, i))
                .unwrap_or_else(|| match_paragraph(lines, i));

            blocks.extend(matched.blocks);
            i += matched.consumed.max(1);
        }

        merge_attributions(blocks)
    }

    fn match_quote(&self, lines: &[&str], start: usize, depth: usize) -> Option<Matched> {
        if !is_quoted(lines[start]) {
            return None;
        }

        let mut end = start;
        while end < lines.len() {
            if is_quoted(lines[end]) {
                end += 1;
                continue;
            }

            // a blank run stays inside the quote only when quoting resumes after it
            let next = next_non_blank(lines, end);
            if next > end && next < lines.len() && is_quoted(lines[next]) {
                end = next;
            } else {
                break;
            }
        }

        let region = &lines[start..end];

        if depth >= self.max_depth {
            warn!(
                "Quote nesting deeper than {} levels, keeping it flat",
                self.max_depth
            );
            let text = trim_trailing_blank(region).join("\n");
            return Some(Matched::one(EmailBlock::Preformatted { text }, end - start));
        }

        let inner: Vec<&str> = region.iter().map(|l| strip_quote_marker(l)).collect();
        let blocks = self.parse_lines(&inner, depth + 1);
        Some(Matched::one(EmailBlock::Quote { blocks }, end - start))
    }
}

/// Rule 1: `--` delimiter or mobile footer; consumes the rest of the input
fn match_signature(lines: &[&str], start: usize) -> Option<Option<EmailBlock>> {
    let line = lines[start].trim();
    let body = if line == "--" {
        &lines[start + 1..]
    } else if MOBILE_SIGNATURE_REGEX.is_match(line) {
        &lines[start..]
    } else {
        return None;
    };

    let body = trim_trailing_blank(trim_leading_blank(body));
    if body.is_empty() {
        return Some(None);
    }

    let lines = body.iter().map(|l| l.trim_end().to_string()).collect();
    Some(Some(EmailBlock::Signature { lines }))
}

/// Rule 2: forwarded-message banner followed by its header lines
fn match_forward_banner(lines: &[&str], start: usize) -> Option<Matched> {
    if !FORWARD_BANNER_REGEX.is_match(lines[start].trim()) {
        return None;
    }

    let headers: Vec<&str> = lines[start + 1..]
        .iter()
        .take_while(|l| FORWARD_HEADER_REGEX.is_match(l.trim()))
        .map(|l| l.trim())
        .collect();

    let mut blocks = vec![EmailBlock::Divider];
    if !headers.is_empty() {
        blocks.push(EmailBlock::Preformatted {
            text: headers.join("\n"),
        });
    }

    Some(Matched {
        consumed: 1 + headers.len(),
        blocks,
    })
}

/// Rule 3: a line of three or more `-`, `=`, `_` or `*`
fn match_divider(lines: &[&str], start: usize) -> Option<Matched> {
    is_divider(lines[start]).then(|| Matched::one(EmailBlock::Divider, 1))
}

/// Rule 4: `On ... wrote:`, possibly wrapped over a few lines
fn match_attribution(lines: &[&str], start: usize) -> Option<Matched> {
    let (text, consumed) = attribution_at(lines, start)?;
    Some(Matched::one(EmailBlock::QuoteAttribution { text }, consumed))
}

/// Rule 6: a run of list items of one kind
fn match_list(lines: &[&str], start: usize) -> Option<Matched> {
    let (kind, first) = list_item(lines[start])?;
    let mut items = vec![first];
    let mut end = start + 1;

    while end < lines.len() {
        let line = lines[end];
        if is_blank(line) {
            break;
        }
        match list_item(line) {
            Some((k, item)) if k == kind => items.push(item),
            Some(_) => break,
            None if indent_of(line) >= LIST_CONTINUATION_INDENT => {
                if let Some(last) = items.last_mut() {
                    if !last.is_empty() {
                        last.push(' ');
                    }
                    last.push_str(line.trim());
                }
            }
            None => break,
        }
        end += 1;
    }

    let block = match kind {
        ListKind::Unordered => EmailBlock::UnorderedList { items },
        ListKind::Ordered => EmailBlock::OrderedList { items },
    };
    Some(Matched::one(block, end - start))
}

/// Rule 7: indented run, blank lines included, trailing blanks dropped
fn match_preformatted(lines: &[&str], start: usize) -> Option<Matched> {
    if indent_of(lines[start]) < PREFORMATTED_INDENT {
        return None;
    }

    let end = lines[start..]
        .iter()
        .position(|l| !is_blank(l) && indent_of(l) < PREFORMATTED_INDENT)
        .map_or(lines.len(), |offset| start + offset);

    let run = trim_trailing_blank(&lines[start..end]);
    let text = run
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    Some(Matched::one(EmailBlock::Preformatted { text }, end - start))
}

/// Rule 8: contiguous plain lines, reflowed
fn match_paragraph(lines: &[&str], start: usize) -> Matched {
    let mut end = start + 1;
    while end < lines.len() && continues_paragraph(lines, end) {
        end += 1;
    }

    let collected: Vec<&str> = lines[start..end].iter().map(|l| l.trim_end()).collect();
    let text = reflow(&collected);

    let block = if is_section_header(&text) {
        EmailBlock::SectionHeader { text }
    } else {
        EmailBlock::Paragraph { text }
    };
    Matched::one(block, end - start)
}

fn continues_paragraph(lines: &[&str], i: usize) -> bool {
    let line = lines[i];
    !(is_blank(line)
        || is_signature_line(line)
        || FORWARD_BANNER_REGEX.is_match(line.trim())
        || is_divider(line)
        || attribution_at(lines, i).is_some()
        || is_quoted(line)
        || list_item(line).is_some()
        || indent_of(line) >= PREFORMATTED_INDENT)
}

/// Replace each attribution immediately followed by a quote with one
/// `QuotedMessage`, when the sender can be recovered.
fn merge_attributions(blocks: Vec<EmailBlock>) -> Vec<EmailBlock> {
    let mut merged = Vec::with_capacity(blocks.len());
    let mut iter = blocks.into_iter().peekable();

    while let Some(block) = iter.next() {
        if let EmailBlock::QuoteAttribution { text } = &block
            && matches!(iter.peek(), Some(EmailBlock::Quote { .. }))
            && let Some(attribution) = parse_attribution(text)
            && let Some(EmailBlock::Quote { blocks }) = iter.next()
        {
            merged.push(EmailBlock::QuotedMessage {
                name: attribution.name,
                initials: attribution.initials,
                blocks,
            });
            continue;
        }
        merged.push(block);
    }

    merged
}

fn attribution_at(lines: &[&str], start: usize) -> Option<(String, usize)> {
    let first = lines[start].trim();
    if ATTRIBUTION_LINE_REGEX.is_match(first) {
        return Some((first.to_string(), 1));
    }
    if !first.starts_with("On ") {
        return None;
    }

    let mut text = first.to_string();
    for (offset, line) in lines[start + 1..]
        .iter()
        .take(ATTRIBUTION_MAX_CONTINUATION)
        .enumerate()
    {
        if is_blank(line) || is_quoted(line) {
            return None;
        }
        text.push(' ');
        text.push_str(line.trim());
        if text.ends_with("wrote:") {
            return Some((text, offset + 2));
        }
    }
    None
}

fn list_item(line: &str) -> Option<(ListKind, String)> {
    if let Some(caps) = UNORDERED_ITEM_REGEX.captures(line) {
        return Some((ListKind::Unordered, caps[1].trim().to_string()));
    }
    ORDERED_ITEM_REGEX
        .captures(line)
        .map(|caps| (ListKind::Ordered, caps[1].trim().to_string()))
}

fn is_signature_line(line: &str) -> bool {
    let line = line.trim();
    line == "--" || MOBILE_SIGNATURE_REGEX.is_match(line)
}

fn is_divider(line: &str) -> bool {
    DIVIDER_REGEX.is_match(line.trim())
}

fn is_section_header(text: &str) -> bool {
    !text.contains('\n')
        && text.ends_with(':')
        && text.chars().count() <= SECTION_HEADER_MAX_CHARS
        && !WROTE_SUFFIX_REGEX.is_match(text)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_quoted(line: &str) -> bool {
    line.trim_start().starts_with('>')
}

fn next_non_blank(lines: &[&str], from: usize) -> usize {
    lines[from..]
        .iter()
        .position(|l| !is_blank(l))
        .map_or(lines.len(), |i| from + i)
}

fn strip_quote_marker(line: &str) -> &str {
    let trimmed = line.trim_start();
    trimmed.strip_prefix('>').map_or(trimmed, |rest| {
        rest.strip_prefix(' ').unwrap_or(rest)
    })
}

fn indent_of(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { PREFORMATTED_INDENT } else { 1 })
        .sum()
}

fn trim_leading_blank<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let start = lines.iter().position(|l| !is_blank(l)).unwrap_or(lines.len());
    &lines[start..]
}

fn trim_trailing_blank<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let end = lines.iter().rposition(|l| !is_blank(l)).map_or(0, |i| i + 1);
    &lines[..end]
}
