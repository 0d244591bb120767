//! Canonical Markdown output.
//!
//! The output is the subset [`crate::parse_markdown`] reads back: one line per
//! top-level block (code blocks and lists excepted), marks wrapped
//! innermost-first in [`Mark`] order and every character that could open a
//! construct backslash-escaped.

use crate::model::{Block, BlockKind, Document, Mark, Node, Text};
use crate::parsing::blocks::kinds::{BlockQuote, CodeFence, Heading, ListMarker, Paragraph};
use crate::parsing::inline::kinds::{CodeSpan, Delimiter, ESCAPE, Link};

/// Serializes `doc` to Markdown. The empty document gives the empty string.
pub fn serialize_to_markdown(doc: &Document) -> String {
    if doc.is_empty() {
        return String::new();
    }
    let mut lines = Vec::new();
    for node in doc.blocks() {
        match node {
            Node::Block(block) => write_block(block, &mut lines),
            Node::Text(text) => lines.push(escape_block_start(&inline_text(text))),
        }
    }
    lines.join("\n")
}

fn write_block(block: &Block, out: &mut Vec<String>) {
    match block.kind {
        BlockKind::Heading1 => out.push(prefixed(&Heading::marker(1), &block.children)),
        BlockKind::Heading2 => out.push(prefixed(&Heading::marker(2), &block.children)),
        BlockKind::BlockQuote => {
            out.push(prefixed(&BlockQuote::PREFIX.to_string(), &block.children))
        }
        BlockKind::CodeBlock => write_code_block(&block.plain_text(), out),
        BlockKind::BulletedList | BlockKind::NumberedList => write_list(block, 0, out),
        BlockKind::Paragraph if block.plain_text().is_empty() => {
            out.push(Paragraph::EMPTY.to_string())
        }
        _ => out.push(escape_block_start(&serialize_inline(&block.children))),
    }
}

/// `marker content`, or the bare marker when there is no content.
fn prefixed(marker: &str, children: &[Node]) -> String {
    let inline = serialize_inline(children);
    if inline.is_empty() {
        marker.to_string()
    } else {
        format!("{marker} {}", escape_block_start(&inline))
    }
}

fn write_code_block(code: &str, out: &mut Vec<String>) {
    let longest_fence_line = code
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.chars().all(|c| c == CodeFence::BACKTICK))
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = CodeFence::BACKTICK
        .to_string()
        .repeat(CodeFence::MIN_LEN.max(longest_fence_line + 1));

    out.push(fence.clone());
    if !code.is_empty() {
        out.extend(code.split('\n').map(str::to_string));
    }
    out.push(fence);
}

fn write_list(list: &Block, indent: usize, out: &mut Vec<String>) {
    let pad = " ".repeat(indent);
    for (i, node) in list.children.iter().enumerate() {
        let Node::Block(item) = node else {
            continue;
        };
        let marker = match list.kind {
            BlockKind::NumberedList => format!("{}{}", i + 1, ListMarker::ORDERED_SUFFIX),
            _ => ListMarker::BULLET.to_string(),
        };
        let inline_len = item.children.iter().take_while(|c| c.is_inline()).count();
        let (inline, nested) = item.children.split_at(inline_len);
        out.push(format!("{pad}{}", prefixed(&marker, inline)));
        for child in nested {
            if let Node::Block(sub) = child
                && sub.kind.is_list()
            {
                write_list(sub, indent + marker.len() + 1, out);
            }
        }
    }
}

/// Inline content of a text block.
pub(crate) fn serialize_inline(children: &[Node]) -> String {
    let mut out = String::new();
    for child in children {
        match child {
            Node::Text(text) => out.push_str(&inline_text(text)),
            Node::Block(link) if link.kind == BlockKind::Link => {
                out.push(Link::OPEN);
                out.push_str(&serialize_inline(&link.children));
                out.push_str(Link::MIDDLE);
                out.push_str(&escape_url(link.url.as_deref().unwrap_or_default()));
                out.push(Link::CLOSE);
            }
            Node::Block(other) => out.push_str(&serialize_inline(&other.children)),
        }
    }
    out
}

fn inline_text(text: &Text) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut out = if text.has(Mark::Code) {
        code_span(&text.text)
    } else {
        escape_inline(&text.text)
    };
    for mark in text.marks.iter().copied().filter(|m| *m != Mark::Code) {
        let delimiter = Delimiter::for_mark(mark);
        out = format!("{}{out}{}", delimiter.open, delimiter.close);
    }
    out
}

/// A code span whose backtick run is longer than any run inside `code`.
fn code_span(code: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in code.chars() {
        if c == CodeSpan::TICK {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    let ticks = CodeSpan::TICK.to_string().repeat(longest + 1);
    let pad = code.starts_with(CodeSpan::TICK)
        || code.ends_with(CodeSpan::TICK)
        || (code.starts_with(' ') && code.ends_with(' ') && !code.chars().all(|c| c == ' '));
    if pad {
        format!("{ticks} {code} {ticks}")
    } else {
        format!("{ticks}{code}{ticks}")
    }
}

const ESCAPED: &[char] = &['\\', '*', '_', '`', '~', '[', ']', '<'];

fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPED.contains(&c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if Link::DEST_ESCAPED.contains(&c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Escapes a line start that would otherwise read as a heading, quote, list
/// item, thematic break or empty paragraph.
fn escape_block_start(line: &str) -> String {
    if Paragraph::is_empty_marker(line) {
        return format!("{ESCAPE}{line}");
    }
    let body = line.trim_start_matches(' ');
    let indent = &line[..line.len() - body.len()];
    let followed_by_space_or_end = |rest: &str| rest.is_empty() || rest.starts_with(' ');

    let hashes = body.len() - body.trim_start_matches('#').len();
    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let escape_at = if hashes > 0 && followed_by_space_or_end(&body[hashes..]) {
        Some(0)
    } else if body.starts_with('>') {
        Some(0)
    } else if (body.starts_with('-') || body.starts_with('+'))
        && followed_by_space_or_end(&body[1..])
    {
        Some(0)
    } else if !body.is_empty() && (body.chars().all(|c| c == '-') || body.chars().all(|c| c == '=')) {
        Some(0)
    } else if digits > 0
        && (body[digits..].starts_with('.') || body[digits..].starts_with(')'))
        && followed_by_space_or_end(&body[digits + 1..])
    {
        Some(digits)
    } else {
        None
    };

    match escape_at {
        Some(at) => format!("{indent}{}\\{}", &body[..at], &body[at..]),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn para(children: Vec<Node>) -> Document {
        Document::from_blocks([Block::new(BlockKind::Paragraph, children)])
    }

    #[test]
    fn empty_document_is_empty_string() {
        assert_eq!(serialize_to_markdown(&Document::new()), "");
    }

    #[rstest]
    #[case(&[Mark::Bold], "**x**")]
    #[case(&[Mark::Italic], "*x*")]
    #[case(&[Mark::Strikethrough], "~~x~~")]
    #[case(&[Mark::Underline], "<u>x</u>")]
    #[case(&[Mark::Code], "`x`")]
    #[case(&[Mark::Bold, Mark::Italic], "***x***")]
    #[case(&[Mark::Code, Mark::Bold, Mark::Underline], "<u>**`x`**</u>")]
    fn marks_wrap_innermost_first(#[case] marks: &[Mark], #[case] expected: &str) {
        let doc = para(vec![Text::with_marks("x", marks.iter().copied()).into()]);
        assert_eq!(serialize_to_markdown(&doc), expected);
    }

    #[rstest]
    #[case("a*b", "a\\*b")]
    #[case("[x](y)", "\\[x\\](y)")]
    #[case("# not a heading", "\\# not a heading")]
    #[case("##", "\\##")]
    #[case("> nope", "\\> nope")]
    #[case("- nope", "\\- nope")]
    #[case("  + nope", "  \\+ nope")]
    #[case("12. nope", "12\\. nope")]
    #[case("---", "\\---")]
    #[case("#hashtag", "#hashtag")]
    #[case("2024 was", "2024 was")]
    #[case("<b>", "\\<b>")]
    #[case("snake_case", "snake\\_case")]
    #[case("&nbsp;", "\\&nbsp;")]
    #[case("a &nbsp;", "a &nbsp;")]
    fn text_is_escaped(#[case] text: &str, #[case] expected: &str) {
        let doc = Document::from_blocks([Block::paragraph(text)]);
        assert_eq!(serialize_to_markdown(&doc), expected);
    }

    #[rstest]
    #[case("a`b", "``a`b``")]
    #[case("`", "`` ` ``")]
    #[case(" a ", "`  a  `")]
    #[case("*", "`*`")]
    fn code_spans_outgrow_their_content(#[case] code: &str, #[case] expected: &str) {
        let doc = para(vec![Text::with_marks(code, [Mark::Code]).into()]);
        assert_eq!(serialize_to_markdown(&doc), expected);
    }

    #[test]
    fn blocks_join_with_single_newline() {
        let doc = Document::from_blocks([
            Block::with_text(BlockKind::Heading1, "Title"),
            Block::with_text(BlockKind::Heading2, ""),
            Block::with_text(BlockKind::BlockQuote, "quoted"),
            Block::paragraph("plain"),
        ]);
        assert_eq!(serialize_to_markdown(&doc), "# Title\n##\n> quoted\nplain");
    }

    #[test]
    fn empty_paragraph_among_blocks_is_written_out() {
        let doc = Document::from_blocks([
            Block::with_text(BlockKind::Heading1, ""),
            Block::paragraph(""),
            Block::paragraph(""),
        ]);
        assert_eq!(serialize_to_markdown(&doc), "#\n&nbsp;\n&nbsp;");
    }

    #[test]
    fn code_fence_grows_past_backtick_lines() {
        let doc = Document::from_blocks([Block::with_text(BlockKind::CodeBlock, "a\n````\nb")]);
        assert_eq!(serialize_to_markdown(&doc), "`````\na\n````\nb\n`````");

        let empty = Document::from_blocks([Block::with_text(BlockKind::CodeBlock, "")]);
        assert_eq!(serialize_to_markdown(&empty), "```\n```");
    }

    #[test]
    fn nested_lists_indent_by_marker_width() {
        let inner = Block::new(
            BlockKind::BulletedList,
            vec![Block::with_text(BlockKind::ListItem, "inner").into()],
        );
        let mut items: Vec<Node> = (1..=9)
            .map(|i| Block::with_text(BlockKind::ListItem, format!("n{i}")).into())
            .collect();
        items.push(
            Block::new(
                BlockKind::ListItem,
                vec![Text::new("ten").into(), inner.into()],
            )
            .into(),
        );
        let doc = Document::from_blocks([Block::new(BlockKind::NumberedList, items)]);
        let out = serialize_to_markdown(&doc);
        assert!(out.starts_with("1. n1\n2. n2\n"), "{out}");
        assert!(out.ends_with("10. ten\n    - inner"), "{out}");
    }

    #[test]
    fn links_escape_their_destination() {
        let doc = para(vec![
            Block::link("https://e.com/a_(b)", vec![Text::new("see").into()]).into(),
        ]);
        assert_eq!(serialize_to_markdown(&doc), "[see](https://e.com/a_\\(b\\))");
    }
}
