use crate::error::{EditError, EditResult};

use super::node::{Block, BlockKind, Mark, Node, Text};

/// A sequence of child indices from the document root to a node.
pub type Path = Vec<usize>;

/// The editable rich document.
///
/// Holds an ordered sequence of top-level blocks and is never empty. Every
/// structural primitive below works on paths resolved against the current
/// tree, so a path is only meaningful for the snapshot it was derived from.
///
/// The primitives can leave the tree outside its normal form (a top-level
/// `ListItem` after unwrapping a list, adjacent text runs with equal marks
/// after a split); the formatting engine always finishes with
/// [`Document::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    children: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document with one empty paragraph.
    pub fn new() -> Self {
        Self {
            children: vec![Block::paragraph("").into()],
        }
    }

    /// Builds a document from top-level blocks and brings it into normal form.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        let mut doc = Self {
            children: blocks.into_iter().map(Node::Block).collect(),
        };
        doc.normalize();
        doc
    }

    /// Top-level nodes (always blocks in normal form).
    pub fn blocks(&self) -> &[Node] {
        &self.children
    }

    /// True for the initial state: a single paragraph with no text.
    pub fn is_empty(&self) -> bool {
        match self.children.as_slice() {
            [Node::Block(b)] => {
                b.kind == BlockKind::Paragraph && b.children == [Node::Text(Text::default())]
            }
            _ => false,
        }
    }

    pub fn get(&self, path: &[usize]) -> EditResult<&Node> {
        let invalid = || EditError::InvalidPath(path.to_vec());
        let (&first, rest) = path.split_first().ok_or_else(invalid)?;
        let mut node = self.children.get(first).ok_or_else(invalid)?;
        for &i in rest {
            node = match node {
                Node::Block(b) => b.children.get(i).ok_or_else(invalid)?,
                Node::Text(_) => return Err(invalid()),
            };
        }
        Ok(node)
    }

    pub fn block(&self, path: &[usize]) -> EditResult<&Block> {
        match self.get(path)? {
            Node::Block(b) => Ok(b),
            Node::Text(_) => Err(EditError::NotABlockNode(path.to_vec())),
        }
    }

    pub fn text(&self, path: &[usize]) -> EditResult<&Text> {
        match self.get(path)? {
            Node::Text(t) => Ok(t),
            Node::Block(_) => Err(EditError::NotATextNode(path.to_vec())),
        }
    }

    fn get_mut(&mut self, path: &[usize]) -> EditResult<&mut Node> {
        let invalid = || EditError::InvalidPath(path.to_vec());
        let (&first, rest) = path.split_first().ok_or_else(invalid)?;
        let mut node = self.children.get_mut(first).ok_or_else(invalid)?;
        for &i in rest {
            node = match node {
                Node::Block(b) => b.children.get_mut(i).ok_or_else(invalid)?,
                Node::Text(_) => return Err(invalid()),
            };
        }
        Ok(node)
    }

    fn block_mut(&mut self, path: &[usize]) -> EditResult<&mut Block> {
        match self.get_mut(path)? {
            Node::Block(b) => Ok(b),
            Node::Text(_) => Err(EditError::NotABlockNode(path.to_vec())),
        }
    }

    fn text_mut(&mut self, path: &[usize]) -> EditResult<&mut Text> {
        match self.get_mut(path)? {
            Node::Text(t) => Ok(t),
            Node::Block(_) => Err(EditError::NotATextNode(path.to_vec())),
        }
    }

    /// Children of the block at `parent`; the empty path names the root.
    fn children_mut(&mut self, parent: &[usize]) -> EditResult<&mut Vec<Node>> {
        if parent.is_empty() {
            return Ok(&mut self.children);
        }
        Ok(&mut self.block_mut(parent)?.children)
    }

    /// Depth-first traversal in document order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: self
                .children
                .iter()
                .enumerate()
                .rev()
                .map(|(i, node)| (vec![i], node))
                .collect(),
        }
    }

    /// Every text leaf in document order.
    pub fn text_leaves(&self) -> impl Iterator<Item = (Path, &Text)> {
        self.nodes()
            .filter_map(|(path, node)| node.as_text().map(|t| (path, t)))
    }

    /// The deepest strict ancestor of `path` whose block satisfies `predicate`.
    pub fn find_ancestor(
        &self,
        path: &[usize],
        predicate: impl Fn(&Block) -> bool,
    ) -> Option<Path> {
        (1..path.len()).rev().find_map(|len| {
            let prefix = &path[..len];
            match self.get(prefix) {
                Ok(Node::Block(b)) if predicate(b) => Some(prefix.to_vec()),
                _ => None,
            }
        })
    }

    /// Replaces a block's kind in place.
    pub fn set_node_kind(&mut self, path: &[usize], kind: BlockKind) -> EditResult<()> {
        let block = self.block_mut(path)?;
        block.kind = kind;
        if kind != BlockKind::Link {
            block.url = None;
        }
        Ok(())
    }

    /// Sets the destination of a link block.
    pub fn set_url(&mut self, path: &[usize], url: impl Into<String>) -> EditResult<()> {
        self.block_mut(path)?.url = Some(url.into());
        Ok(())
    }

    /// Inserts a new `kind` block as parent of the contiguous siblings named
    /// by `paths`, returning the wrapper's path.
    pub fn wrap_nodes(&mut self, paths: &[Path], kind: BlockKind) -> EditResult<Path> {
        let first = paths.first().ok_or(EditError::NonContiguousRange)?;
        let (&start, parent) = first
            .split_last()
            .ok_or_else(|| EditError::InvalidPath(first.clone()))?;
        for (offset, path) in paths.iter().enumerate() {
            self.get(path)?;
            let contiguous = path.len() == first.len()
                && path[..parent.len()] == *parent
                && path.last() == Some(&(start + offset));
            if !contiguous {
                return Err(EditError::NonContiguousRange);
            }
        }

        let siblings = self.children_mut(parent)?;
        let wrapped: Vec<Node> = siblings.drain(start..start + paths.len()).collect();
        siblings.insert(start, Block::new(kind, wrapped).into());
        log::trace!("wrapped {} node(s) at {first:?} in {kind:?}", paths.len());
        Ok(first.clone())
    }

    /// Removes every block matching `predicate`, promoting its children into
    /// its former position. Paths passed to the predicate are those of the
    /// tree before the call. Returns how many blocks were unwrapped.
    pub fn unwrap_nodes<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&[usize], &Block) -> bool,
    {
        let mut count = 0;
        let children = std::mem::take(&mut self.children);
        self.children = unwrap_in(children, &mut Vec::new(), &predicate, &mut count);
        self.ensure_not_empty();
        count
    }

    pub fn add_mark(&mut self, path: &[usize], mark: Mark) -> EditResult<()> {
        self.text_mut(path)?.marks.insert(mark);
        Ok(())
    }

    pub fn remove_mark(&mut self, path: &[usize], mark: Mark) -> EditResult<()> {
        self.text_mut(path)?.marks.remove(&mark);
        Ok(())
    }

    /// Removes the node at `path` and returns it. Removing the last top-level
    /// block leaves a fresh empty paragraph behind.
    pub fn delete_at(&mut self, path: &[usize]) -> EditResult<Node> {
        let (&index, parent) = path
            .split_last()
            .ok_or_else(|| EditError::InvalidPath(path.to_vec()))?;
        self.get(path)?;
        let removed = self.children_mut(parent)?.remove(index);
        self.ensure_not_empty();
        Ok(removed)
    }

    /// Inserts `node` so that it ends up at `path`.
    pub fn insert_node(&mut self, path: &[usize], node: Node) -> EditResult<()> {
        let (&index, parent) = path
            .split_last()
            .ok_or_else(|| EditError::InvalidPath(path.to_vec()))?;
        let siblings = self.children_mut(parent)?;
        if index > siblings.len() {
            return Err(EditError::InvalidPath(path.to_vec()));
        }
        siblings.insert(index, node);
        Ok(())
    }

    /// Replaces the bytes `start..end` of a text leaf.
    pub fn replace_text(
        &mut self,
        path: &[usize],
        start: usize,
        end: usize,
        replacement: &str,
    ) -> EditResult<()> {
        let text = self.text_mut(path)?;
        let valid = start <= end
            && end <= text.text.len()
            && text.text.is_char_boundary(start)
            && text.text.is_char_boundary(end);
        if !valid {
            return Err(EditError::InvalidPath(path.to_vec()));
        }
        text.text.replace_range(start..end, replacement);
        Ok(())
    }

    /// Splits a text leaf at a byte offset; the tail becomes the next sibling
    /// with the same marks. Returns false when the offset is at either end.
    pub fn split_text(&mut self, path: &[usize], offset: usize) -> EditResult<bool> {
        let text = self.text_mut(path)?;
        if offset > text.text.len() || !text.text.is_char_boundary(offset) {
            return Err(EditError::InvalidPath(path.to_vec()));
        }
        if offset == 0 || offset == text.text.len() {
            return Ok(false);
        }
        let tail = Text {
            text: text.text.split_off(offset),
            marks: text.marks.clone(),
        };
        let mut next = path.to_vec();
        if let Some(last) = next.last_mut() {
            *last += 1;
        }
        self.insert_node(&next, tail.into())?;
        Ok(true)
    }

    /// Splits a block's children at `index` into two sibling blocks of the same
    /// kind. Returns false when the split point is at either end.
    pub fn split_block(&mut self, path: &[usize], index: usize) -> EditResult<bool> {
        let block = self.block_mut(path)?;
        if index > block.children.len() {
            return Err(EditError::InvalidPath(path.to_vec()));
        }
        if index == 0 || index == block.children.len() {
            return Ok(false);
        }
        let tail = Block {
            kind: block.kind,
            children: block.children.split_off(index),
            url: block.url.clone(),
        };
        let mut next = path.to_vec();
        if let Some(last) = next.last_mut() {
            *last += 1;
        }
        self.insert_node(&next, tail.into())?;
        Ok(true)
    }

    /// Restores the normal form: merged text runs, no stray empty leaves,
    /// no empty links or lists, adjacent same-kind lists joined, list items
    /// only inside lists and at least one top-level block.
    pub fn normalize(&mut self) {
        let children = std::mem::take(&mut self.children);
        let mut top = Vec::with_capacity(children.len());
        for node in children {
            match node {
                Node::Text(t) => top.push(Block::new(BlockKind::Paragraph, vec![t.into()])),
                Node::Block(b) if b.kind == BlockKind::Link => {
                    top.push(Block::new(BlockKind::Paragraph, vec![b.into()]))
                }
                Node::Block(b) if b.kind == BlockKind::ListItem => {
                    let (inline, lists): (Vec<Node>, Vec<Node>) =
                        b.children.into_iter().partition(|child| !child.is_list());
                    top.push(Block::new(BlockKind::Paragraph, inline));
                    top.extend(lists.into_iter().filter_map(|n| match n {
                        Node::Block(list) => Some(list),
                        Node::Text(_) => None,
                    }));
                }
                Node::Block(b) => top.push(b),
            }
        }
        self.children = merge_lists(
            top.into_iter()
                .filter_map(normalize_block)
                .map(Node::Block)
                .collect(),
        );
        self.ensure_not_empty();
    }

    fn ensure_not_empty(&mut self) {
        if self.children.is_empty() {
            self.children.push(Block::paragraph("").into());
        }
    }
}

fn unwrap_in<F>(nodes: Vec<Node>, path: &mut Vec<usize>, predicate: &F, count: &mut usize) -> Vec<Node>
where
    F: Fn(&[usize], &Block) -> bool,
{
    let mut out = Vec::with_capacity(nodes.len());
    for (i, node) in nodes.into_iter().enumerate() {
        path.push(i);
        match node {
            Node::Block(mut block) => {
                let children = std::mem::take(&mut block.children);
                block.children = unwrap_in(children, path, predicate, count);
                if predicate(path, &block) {
                    *count += 1;
                    out.extend(block.children);
                } else {
                    out.push(block.into());
                }
            }
            text => out.push(text),
        }
        path.pop();
    }
    out
}

fn normalize_block(mut block: Block) -> Option<Block> {
    match block.kind {
        BlockKind::CodeBlock => {
            let text = block.plain_text();
            block.children = vec![Text::new(text).into()];
            block.url = None;
            Some(block)
        }
        BlockKind::Link => {
            let mut leaves = Vec::new();
            flatten_leaves(block.children, &mut leaves);
            block.children = merge_inline(leaves);
            if block.children.is_empty() {
                None
            } else {
                Some(block)
            }
        }
        kind if kind.is_list() => {
            block.url = None;
            block.children = block
                .children
                .into_iter()
                .map(|child| match child {
                    Node::Block(b) if b.kind == BlockKind::ListItem => b,
                    Node::Block(b) if b.kind.is_list() => {
                        Block::new(BlockKind::ListItem, vec![b.into()])
                    }
                    Node::Block(mut b) if b.kind != BlockKind::Link => {
                        b.kind = BlockKind::ListItem;
                        b
                    }
                    other => Block::new(BlockKind::ListItem, vec![other]),
                })
                .filter_map(normalize_block)
                .map(Node::Block)
                .collect();
            if block.children.is_empty() {
                None
            } else {
                Some(block)
            }
        }
        _ => {
            block.url = None;
            let keep_lists = block.kind == BlockKind::ListItem;
            let mut inline = Vec::new();
            let mut lists = Vec::new();
            for child in block.children {
                split_content(child, keep_lists, &mut inline, &mut lists);
            }
            let mut children = merge_inline(inline);
            let lists = merge_lists(lists);
            if children.is_empty() && lists.is_empty() {
                children.push(Text::default().into());
            }
            children.extend(lists);
            block.children = children;
            Some(block)
        }
    }
}

/// Sorts a text block's child into inline content or nested lists, flattening
/// anything else into its inline content.
fn split_content(node: Node, keep_lists: bool, inline: &mut Vec<Node>, lists: &mut Vec<Node>) {
    match node {
        Node::Text(_) => inline.push(node),
        Node::Block(b) if b.kind == BlockKind::Link => {
            if let Some(link) = normalize_block(b) {
                inline.push(link.into());
            }
        }
        Node::Block(b) if b.kind.is_list() && keep_lists => {
            if let Some(list) = normalize_block(b) {
                lists.push(list.into());
            }
        }
        Node::Block(b) => {
            for child in b.children {
                split_content(child, keep_lists, inline, lists);
            }
        }
    }
}

fn flatten_leaves(nodes: Vec<Node>, out: &mut Vec<Node>) {
    for node in nodes {
        match node {
            Node::Text(_) => out.push(node),
            Node::Block(b) => flatten_leaves(b.children, out),
        }
    }
}

/// Merges adjacent text runs with equal marks and drops empty runs.
fn merge_inline(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(t) if t.is_empty() => {}
            Node::Text(t) => match out.last_mut() {
                Some(Node::Text(prev)) if prev.marks == t.marks => prev.text.push_str(&t.text),
                _ => out.push(t.into()),
            },
            other => out.push(other),
        }
    }
    out
}

/// Joins adjacent sibling lists of the same kind.
fn merge_lists(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match (out.last_mut(), node) {
            (Some(Node::Block(prev)), Node::Block(next))
                if prev.kind.is_list() && prev.kind == next.kind =>
            {
                prev.children.extend(next.children);
            }
            (_, node) => out.push(node),
        }
    }
    out
}

/// Depth-first iterator over `(path, node)` pairs.
pub struct Nodes<'a> {
    stack: Vec<(Path, &'a Node)>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = (Path, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        if let Node::Block(b) = node {
            for (i, child) in b.children.iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(i);
                self.stack.push((child_path, child));
            }
        }
        Some((path, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(kind: BlockKind, items: &[&str]) -> Block {
        Block::new(
            kind,
            items
                .iter()
                .map(|s| Block::with_text(BlockKind::ListItem, *s).into())
                .collect(),
        )
    }

    #[test]
    fn new_document_is_single_empty_paragraph() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.text(&[0, 0]).unwrap(), &Text::default());
    }

    #[test]
    fn traversal_is_depth_first_in_document_order() {
        let doc = Document::from_blocks([
            Block::paragraph("a"),
            list(BlockKind::BulletedList, &["b", "c"]),
        ]);
        let paths: Vec<Path> = doc.nodes().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![
                vec![0],
                vec![0, 0],
                vec![1],
                vec![1, 0],
                vec![1, 0, 0],
                vec![1, 1],
                vec![1, 1, 0],
            ]
        );
    }

    #[test]
    fn get_reports_invalid_paths() {
        let doc = Document::new();
        assert_eq!(doc.get(&[]), Err(EditError::InvalidPath(vec![])));
        assert_eq!(doc.get(&[3]), Err(EditError::InvalidPath(vec![3])));
        assert_eq!(doc.get(&[0, 0, 1]), Err(EditError::InvalidPath(vec![0, 0, 1])));
    }

    #[test]
    fn set_node_kind_rejects_text_leaves() {
        let mut doc = Document::new();
        assert_eq!(
            doc.set_node_kind(&[0, 0], BlockKind::Heading1),
            Err(EditError::NotABlockNode(vec![0, 0]))
        );
        assert_eq!(
            doc.set_node_kind(&[5], BlockKind::Heading1),
            Err(EditError::InvalidPath(vec![5]))
        );
        doc.set_node_kind(&[0], BlockKind::Heading1).unwrap();
        assert_eq!(doc.block(&[0]).unwrap().kind, BlockKind::Heading1);
    }

    #[test]
    fn wrap_nodes_requires_contiguous_siblings() {
        let mut doc = Document::from_blocks([
            Block::paragraph("a"),
            Block::paragraph("b"),
            Block::paragraph("c"),
        ]);
        assert_eq!(
            doc.wrap_nodes(&[vec![0], vec![2]], BlockKind::BulletedList),
            Err(EditError::NonContiguousRange)
        );
        assert_eq!(
            doc.wrap_nodes(&[vec![1], vec![0]], BlockKind::BulletedList),
            Err(EditError::NonContiguousRange)
        );
        assert_eq!(
            doc.wrap_nodes(&[vec![0], vec![1, 0]], BlockKind::BulletedList),
            Err(EditError::NonContiguousRange)
        );

        let wrapper = doc
            .wrap_nodes(&[vec![1], vec![2]], BlockKind::BlockQuote)
            .unwrap();
        assert_eq!(wrapper, vec![1]);
        let quote = doc.block(&[1]).unwrap();
        assert_eq!(quote.kind, BlockKind::BlockQuote);
        assert_eq!(quote.children.len(), 2);
    }

    #[test]
    fn unwrap_nodes_promotes_children() {
        let mut doc = Document::from_blocks([
            Block::paragraph("a"),
            list(BlockKind::NumberedList, &["b", "c"]),
        ]);
        let count = doc.unwrap_nodes(|_, b| b.kind.is_list());
        assert_eq!(count, 1);
        assert_eq!(doc.blocks().len(), 3);
        assert_eq!(doc.block(&[2]).unwrap().kind, BlockKind::ListItem);

        assert_eq!(doc.unwrap_nodes(|_, b| b.kind == BlockKind::Heading2), 0);
    }

    #[test]
    fn marks_only_apply_to_text() {
        let mut doc = Document::from_blocks([Block::paragraph("a")]);
        doc.add_mark(&[0, 0], Mark::Bold).unwrap();
        assert!(doc.text(&[0, 0]).unwrap().has(Mark::Bold));
        doc.remove_mark(&[0, 0], Mark::Bold).unwrap();
        assert!(!doc.text(&[0, 0]).unwrap().has(Mark::Bold));
        assert_eq!(
            doc.add_mark(&[0], Mark::Bold),
            Err(EditError::NotATextNode(vec![0]))
        );
    }

    #[test]
    fn deleting_the_only_block_leaves_an_empty_paragraph() {
        let mut doc = Document::from_blocks([Block::with_text(BlockKind::Heading1, "x")]);
        doc.delete_at(&[0]).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn split_text_keeps_marks() {
        let mut doc = Document::from_blocks([Block::new(
            BlockKind::Paragraph,
            vec![Text::with_marks("hello", [Mark::Italic]).into()],
        )]);
        assert!(doc.split_text(&[0, 0], 2).unwrap());
        assert_eq!(doc.text(&[0, 0]).unwrap().text, "he");
        assert_eq!(doc.text(&[0, 1]).unwrap(), &Text::with_marks("llo", [Mark::Italic]));
        assert!(!doc.split_text(&[0, 1], 0).unwrap());
        assert_eq!(
            doc.split_text(&[0, 1], 9),
            Err(EditError::InvalidPath(vec![0, 1]))
        );
    }

    #[test]
    fn split_text_rejects_offsets_inside_a_character() {
        let mut doc = Document::from_blocks([Block::paragraph("héllo")]);
        assert_eq!(
            doc.split_text(&[0, 0], 2),
            Err(EditError::InvalidPath(vec![0, 0]))
        );
    }

    #[test]
    fn normalize_merges_runs_and_lists() {
        let mut doc = Document::from_blocks([]);
        assert!(doc.is_empty());

        doc = Document::from_blocks([
            Block::new(
                BlockKind::Paragraph,
                vec![
                    Text::new("a").into(),
                    Text::new("").into(),
                    Text::new("b").into(),
                    Block::link("u", vec![Text::new("").into()]).into(),
                ],
            ),
            list(BlockKind::BulletedList, &["x"]),
            list(BlockKind::BulletedList, &["y"]),
            list(BlockKind::NumberedList, &["z"]),
        ]);
        doc.normalize();
        assert_eq!(
            doc,
            Document::from_blocks([
                Block::paragraph("ab"),
                list(BlockKind::BulletedList, &["x", "y"]),
                list(BlockKind::NumberedList, &["z"]),
            ])
        );
        assert_eq!(doc.blocks().len(), 3);
        assert_eq!(doc.block(&[0]).unwrap().children, vec![Text::new("ab").into()]);
    }

    #[test]
    fn normalize_flattens_code_block_marks() {
        let doc = Document::from_blocks([Block::new(
            BlockKind::CodeBlock,
            vec![
                Text::with_marks("let ", [Mark::Bold]).into(),
                Text::new("x").into(),
            ],
        )]);
        assert_eq!(
            doc.block(&[0]).unwrap().children,
            vec![Text::new("let x").into()]
        );
    }

    #[test]
    fn normalize_hoists_stray_list_items() {
        let doc = Document::from_blocks([Block::new(
            BlockKind::ListItem,
            vec![
                Text::new("a").into(),
                list(BlockKind::BulletedList, &["b"]).into(),
            ],
        )]);
        assert_eq!(
            doc,
            Document::from_blocks([
                Block::paragraph("a"),
                list(BlockKind::BulletedList, &["b"]),
            ])
        );
    }

    #[test]
    fn find_ancestor_returns_deepest_match() {
        let inner = list(BlockKind::NumberedList, &["c"]);
        let doc = Document::from_blocks([Block::new(
            BlockKind::BulletedList,
            vec![Block::new(
                BlockKind::ListItem,
                vec![Text::new("b").into(), inner.into()],
            )
            .into()],
        )]);
        let item = doc.find_ancestor(&[0, 0, 1, 0, 0], |b| b.kind == BlockKind::ListItem);
        assert_eq!(item, Some(vec![0, 0, 1, 0]));
        let bullets = doc.find_ancestor(&[0, 0, 1, 0, 0], |b| b.kind == BlockKind::BulletedList);
        assert_eq!(bullets, Some(vec![0]));
    }
}
