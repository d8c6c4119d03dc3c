//! Cut quoted history when a message is shown inside its thread

use crate::types::EmailBlock;
use tracing::debug;

/// Remove previously-quoted content from a parsed body.
///
/// Everything from the first attribution (merged or not) onward is cut,
/// which also covers clients that quote without `>` markers. Trailing
/// quotes, signatures, dividers and empty paragraphs are then popped, with
/// or without a cut, so applying this twice gives the same result as once.
#[must_use]
pub fn trim_quotes(mut blocks: Vec<EmailBlock>) -> Vec<EmailBlock> {
    let cut = blocks.iter().position(|b| {
        matches!(
            b,
            EmailBlock::QuoteAttribution { .. } | EmailBlock::QuotedMessage { .. }
        )
    });

    if let Some(index) = cut {
        debug!("Trimming {} blocks from attribution at {index}", blocks.len() - index);
        blocks.truncate(index);
    }

    // Quotes sitting directly above the cut go too, otherwise a second
    // pass would remove them and the result would not be stable.
    while blocks.last().is_some_and(is_trailing_history) {
        blocks.pop();
    }

    blocks
}

fn is_trailing_history(block: &EmailBlock) -> bool {
    block.is_quoted()
        || block.is_empty_paragraph()
        || matches!(block, EmailBlock::Signature { .. } | EmailBlock::Divider)
}
