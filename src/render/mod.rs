//! Splits post content into displayable blocks.

use serde::Serialize;

/// Paragraph separator in post content.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Placeholder shown when previewing an empty draft.
pub const EMPTY_PREVIEW: &str = "Start writing to see content here...";

/// A displayable piece of post content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum ContentBlock {
    Paragraph(String),
    Quote(String),
}

/// Split `content` into paragraphs and quotations.
///
/// A block starting with `>` loses that marker and surrounding whitespace;
/// every other block is kept verbatim.
pub fn render_blocks(content: &str) -> Vec<ContentBlock> {
    content
        .split(BLOCK_SEPARATOR)
        .map(|block| match block.strip_prefix('>') {
            Some(quote) => ContentBlock::Quote(quote.trim().to_string()),
            None => ContentBlock::Paragraph(block.to_string()),
        })
        .collect()
}

/// Render an unsaved draft, substituting a placeholder for empty content.
pub fn render_preview(content: &str) -> Vec<ContentBlock> {
    if content.is_empty() {
        render_blocks(EMPTY_PREVIEW)
    } else {
        render_blocks(content)
    }
}
