//! Undo fixed-width hard wrapping in plain-text paragraphs

use std::ops::RangeInclusive;

/// Line lengths typical of clients that hard-wrap outgoing text
pub const WRAP_WIDTH: RangeInclusive<usize> = 65..=82;

/// Share of adjacent line pairs (in percent) that must look wrapped
pub const WRAP_RATIO_PERCENT: usize = 60;

/// Join the lines of one paragraph into display text.
///
/// When most adjacent pairs start with a line in [`WRAP_WIDTH`], the text is
/// treated as hard-wrapped and lines are joined with spaces. A line that is
/// outside the range, or ends in terminal punctuation, closes the current
/// run and the next line starts on its own line. Otherwise the original
/// line breaks are kept.
#[must_use]
pub fn reflow<S: AsRef<str>>(lines: &[S]) -> String {
    if !is_hard_wrapped(lines) {
        return lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<&str>>()
            .join("\n");
    }

    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in lines {
        let line = line.as_ref().trim();
        if !current.is_empty() && !line.is_empty() {
            current.push(' ');
        }
        current.push_str(line);

        if breaks_after(line) {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }

    out.join("\n")
}

/// True when more than [`WRAP_RATIO_PERCENT`] of adjacent pairs look wrapped
#[must_use]
pub fn is_hard_wrapped<S: AsRef<str>>(lines: &[S]) -> bool {
    let pairs = lines.len().saturating_sub(1);
    if pairs == 0 {
        return false;
    }

    let candidates = lines
        .windows(2)
        .filter(|pair| is_wrap_candidate(pair[0].as_ref()))
        .count();

    candidates * 100 > pairs * WRAP_RATIO_PERCENT
}

fn is_wrap_candidate(line: &str) -> bool {
    WRAP_WIDTH.contains(&line.trim_end().chars().count())
}

fn breaks_after(line: &str) -> bool {
    !is_wrap_candidate(line) || line.ends_with(['.', '!', '?', ':', ';'])
}
