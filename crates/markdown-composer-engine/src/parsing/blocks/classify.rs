use std::sync::LazyLock;

use regex::Regex;

use crate::model::BlockKind;

use super::kinds::{BlockQuote, CodeFence, Fence, Heading, ListMarker, Paragraph};

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^( *)([-+*]|\d{1,9}\.)(?: (.*)|$)").expect("list item pattern is valid")
});

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)(?: (.*)|$)").expect("heading pattern is valid"));

/// What a single line looks like on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// A fence opener; inside an open fence the builder only asks whether
    /// the raw line closes it.
    Fence(Fence),
    Heading {
        level: usize,
        content: &'a str,
    },
    Quote {
        content: &'a str,
    },
    ListItem {
        indent: usize,
        kind: BlockKind,
        content: &'a str,
    },
    /// A paragraph written without text.
    EmptyParagraph,
    Text {
        content: &'a str,
    },
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClass<'a> {
    /// The line without its terminator.
    pub raw: &'a str,
    pub kind: LineKind<'a>,
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        let raw = line.trim_end_matches(['\r', '\n']);
        LineClass {
            raw,
            kind: Self::kind(raw),
        }
    }

    fn kind(raw: &str) -> LineKind<'_> {
        if raw.trim().is_empty() {
            return LineKind::Blank;
        }
        if let Some(fence) = CodeFence::open(raw) {
            return LineKind::Fence(fence);
        }
        if let Some(caps) = HEADING.captures(raw) {
            let level = caps[1].len();
            if level <= Heading::MAX_LEVEL {
                return LineKind::Heading {
                    level,
                    content: caps.get(2).map_or("", |m| m.as_str()),
                };
            }
        }
        if let Some(content) = BlockQuote::strip_prefix(raw) {
            return LineKind::Quote { content };
        }
        if let Some(caps) = LIST_ITEM.captures(raw) {
            return LineKind::ListItem {
                indent: caps[1].len(),
                kind: ListMarker::kind(&caps[2]),
                content: caps.get(3).map_or("", |m| m.as_str()),
            };
        }
        if Paragraph::is_empty_marker(raw) {
            return LineKind::EmptyParagraph;
        }
        LineKind::Text { content: raw }
    }
}
