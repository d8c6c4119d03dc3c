//! Sender recovery from "On <date> <Name> <email> wrote:" lines

use crate::types::Attribution;
use regex::Regex;
use std::sync::LazyLock;

static ATTRIBUTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(.*?)<\s*([^<>@\s]+)@([^<>\s]+)\s*>\s*wrote\s*:*\s*$").unwrap()
});

static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:\d{2}(?::\d{2})?$").unwrap());

/// Words that only ever belong to the date part of an attribution
const DATE_TOKENS: &[&str] = &[
    "on", "at", "am", "pm", "a.m", "p.m", "utc", "gmt", "mon", "tue", "tues", "wed", "thu",
    "thur", "thurs", "fri", "sat", "sun", "monday", "tuesday", "wednesday", "thursday", "friday",
    "saturday", "sunday", "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "sept",
    "oct", "nov", "dec", "january", "february", "march", "april", "june", "july", "august",
    "september", "october", "november", "december",
];

/// Extract the sender of a quote attribution line.
///
/// The line must end with `<local@host> wrote:`. The display name is the
/// trailing run of words before the address that are not date or time
/// tokens. When that run is empty the name falls back to the address's
/// local part.
#[must_use]
pub fn parse_attribution(text: &str) -> Option<Attribution> {
    let caps = ATTRIBUTION_REGEX.captures(text.trim())?;
    let prefix = caps.get(1).map_or("", |m| m.as_str());
    let local_part = caps.get(2).map_or("", |m| m.as_str());

    let words: Vec<&str> = prefix.split_whitespace().collect();
    let start = words
        .iter()
        .rposition(|w| is_date_token(w))
        .map_or(0, |i| i + 1);

    let name = clean_name(&words[start..].join(" "));
    let name = if name.is_empty() {
        name_from_local_part(local_part)
    } else {
        name
    };

    if name.is_empty() {
        return None;
    }

    let initials = initials(&name);
    Some(Attribution { name, initials })
}

/// Initials for a display name: first and last word, or first two letters
#[must_use]
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let initials: String = if words.len() >= 2 {
        words[0]
            .chars()
            .take(1)
            .chain(words[words.len() - 1].chars().take(1))
            .collect()
    } else {
        name.trim().chars().take(2).collect()
    };
    initials.to_uppercase()
}

fn is_date_token(word: &str) -> bool {
    let token = word.trim_matches(|c: char| c == ',' || c == '.' || c == '(' || c == ')');
    if token.is_empty() {
        return true;
    }

    let is_numeric = token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '/' | '.'));

    is_numeric
        || TIME_REGEX.is_match(token)
        || DATE_TOKENS.contains(&token.to_lowercase().as_str())
}

fn clean_name(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == ',' || c.is_whitespace())
        .to_string()
}

fn name_from_local_part(local_part: &str) -> String {
    local_part
        .split(['.', '_', '-'])
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
