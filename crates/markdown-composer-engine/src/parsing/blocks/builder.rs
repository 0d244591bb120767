use crate::model::{Block, BlockKind, Node};
use crate::parsing::inline::parse_inline;

use super::{
    classify::{LineClass, LineKind},
    kinds::Fence,
};

/// An open list at some indentation, collecting its items.
#[derive(Debug)]
struct ListFrame {
    indent: usize,
    kind: BlockKind,
    items: Vec<Block>,
}

#[derive(Debug)]
struct OpenFence {
    fence: Fence,
    lines: Vec<String>,
}

/// Phase 2 of block parsing: turns classified lines into blocks.
///
/// Lists are tracked as a stack of frames, innermost last. A deeper item
/// opens a frame nested under the previous item; a shallower one closes
/// frames until it fits. Any other line closes every open list.
#[derive(Debug, Default)]
pub struct BlockBuilder {
    fence: Option<OpenFence>,
    lists: Vec<ListFrame>,
    out: Vec<Block>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, c: &LineClass<'_>) {
        if let Some(open) = &mut self.fence {
            if open.fence.closes(c.raw) {
                self.flush_fence();
            } else {
                open.lines.push(c.raw.to_string());
            }
            return;
        }

        if let LineKind::ListItem {
            indent,
            kind,
            content,
        } = c.kind
        {
            self.push_item(indent, kind, content);
            return;
        }

        self.close_lists();
        match c.kind {
            LineKind::Blank | LineKind::ListItem { .. } => {}
            LineKind::Fence(fence) => {
                log::trace!("opened {}x{:?} fence", fence.len, fence.ch);
                self.fence = Some(OpenFence {
                    fence,
                    lines: vec![],
                });
            }
            LineKind::Heading { level, content } => {
                let kind = if level == 1 {
                    BlockKind::Heading1
                } else {
                    BlockKind::Heading2
                };
                self.out.push(Block::new(kind, parse_inline(content)));
            }
            LineKind::Quote { content } => {
                self.out
                    .push(Block::new(BlockKind::BlockQuote, parse_inline(content)));
            }
            LineKind::EmptyParagraph => self.out.push(Block::paragraph("")),
            LineKind::Text { content } => {
                self.out
                    .push(Block::new(BlockKind::Paragraph, parse_inline(content)));
            }
        }
    }

    pub fn finish(mut self) -> Vec<Block> {
        // An unterminated fence runs to the end of input.
        self.flush_fence();
        self.close_lists();
        self.out
    }

    fn flush_fence(&mut self) {
        if let Some(open) = self.fence.take() {
            self.out
                .push(Block::with_text(BlockKind::CodeBlock, open.lines.join("\n")));
        }
    }

    fn push_item(&mut self, indent: usize, kind: BlockKind, content: &str) {
        let children = if content.is_empty() {
            vec![]
        } else {
            parse_inline(content)
        };
        let item = Block::new(BlockKind::ListItem, children);

        loop {
            match self.lists.last_mut() {
                Some(top) if indent == top.indent && kind == top.kind => {
                    top.items.push(item);
                    return;
                }
                Some(top) if indent <= top.indent => self.close_frame(),
                _ => {
                    self.lists.push(ListFrame {
                        indent,
                        kind,
                        items: vec![item],
                    });
                    return;
                }
            }
        }
    }

    /// Closes the innermost list into the item it belongs to, or into the
    /// output when it is a top-level list.
    fn close_frame(&mut self) {
        let Some(frame) = self.lists.pop() else {
            return;
        };
        let list = Block::new(
            frame.kind,
            frame.items.into_iter().map(Node::Block).collect(),
        );
        match self.lists.last_mut().and_then(|parent| parent.items.last_mut()) {
            Some(item) => item.children.push(list.into()),
            None => self.out.push(list),
        }
    }

    fn close_lists(&mut self) {
        while !self.lists.is_empty() {
            self.close_frame();
        }
    }
}
