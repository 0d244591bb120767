//! Plain-text tree view of a document, used for debugging and snapshots.
//!
//! ```text
//! BulletedList
//!   ListItem
//!     "a" [Bold]
//! ```

use std::fmt;

use crate::model::{Document, Node};

/// One line per node; no trailing newline.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        for node in self.blocks() {
            outline_lines(node, 0, &mut lines);
        }
        f.write_str(&lines.join("\n"))
    }
}

fn outline_lines(node: &Node, depth: usize, out: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Text(text) if text.marks.is_empty() => out.push(format!("{indent}{:?}", text.text)),
        Node::Text(text) => {
            let marks: Vec<String> = text.marks.iter().map(|m| format!("{m:?}")).collect();
            out.push(format!("{indent}{:?} [{}]", text.text, marks.join(", ")));
        }
        Node::Block(block) => {
            match &block.url {
                Some(url) => out.push(format!("{indent}{:?} {url}", block.kind)),
                None => out.push(format!("{indent}{:?}", block.kind)),
            }
            for child in &block.children {
                outline_lines(child, depth + 1, out);
            }
        }
    }
}
