//! HTML output, one top-level block per line.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::{Block, BlockKind, Document, Mark, Node, Text};

/// Renders `doc` as an HTML fragment.
pub fn render_html(doc: &Document) -> String {
    let mut lines = Vec::with_capacity(doc.blocks().len());
    for node in doc.blocks() {
        let mut out = String::new();
        write_node(node, &mut out);
        lines.push(out);
    }
    lines.join("\n")
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => write_text(text, out),
        Node::Block(block) => write_block(block, out),
    }
}

fn write_block(block: &Block, out: &mut String) {
    match block.kind {
        BlockKind::CodeBlock => {
            out.push_str("<pre><code>");
            out.push_str(&encode_text(&block.plain_text()));
            out.push_str("</code></pre>");
        }
        BlockKind::Link => {
            out.push_str("<a href=\"");
            out.push_str(&encode_double_quoted_attribute(
                block.url.as_deref().unwrap_or_default(),
            ));
            out.push_str("\">");
            write_children(&block.children, out);
            out.push_str("</a>");
        }
        kind => {
            let tag = tag(kind);
            out.push_str(&format!("<{tag}>"));
            write_children(&block.children, out);
            out.push_str(&format!("</{tag}>"));
        }
    }
}

fn tag(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Heading1 => "h1",
        BlockKind::Heading2 => "h2",
        BlockKind::BlockQuote => "blockquote",
        BlockKind::BulletedList => "ul",
        BlockKind::NumberedList => "ol",
        BlockKind::ListItem => "li",
        BlockKind::CodeBlock => "pre",
        BlockKind::Paragraph | BlockKind::Link => "p",
    }
}

fn write_children(children: &[Node], out: &mut String) {
    for child in children {
        write_node(child, out);
    }
}

fn mark_tag(mark: Mark) -> &'static str {
    match mark {
        Mark::Code => "code",
        Mark::Bold => "strong",
        Mark::Italic => "em",
        Mark::Strikethrough => "s",
        Mark::Underline => "u",
    }
}

/// Marks nest like the Markdown output: `Code` innermost, `Underline`
/// outermost.
fn write_text(text: &Text, out: &mut String) {
    if text.is_empty() {
        return;
    }
    for mark in text.marks.iter().rev() {
        out.push_str(&format!("<{}>", mark_tag(*mark)));
    }
    out.push_str(&encode_text(&text.text));
    for mark in text.marks.iter() {
        out.push_str(&format!("</{}>", mark_tag(*mark)));
    }
}
