pub mod blocks;
pub mod inline;

use crate::model::Document;

use blocks::{BlockBuilder, MarkdownLineClassifier};

/// Parses Markdown into a normalised [`Document`]. Never fails: anything
/// unrecognised is paragraph text.
pub fn parse_markdown(text: &str) -> Document {
    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new();

    for line in text.split('\n') {
        builder.push(&classifier.classify(line));
    }

    Document::from_blocks(builder.finish())
}
