use super::{Block, BlockKind, Document, Node};

/// Asserts that `doc` is well formed and in normal form.
///
/// Panics with a message naming the offending path. Tests call it after
/// every edit they make.
pub fn check(doc: &Document) {
    assert!(!doc.blocks().is_empty(), "document has no top-level blocks");
    for (i, node) in doc.blocks().iter().enumerate() {
        let path = vec![i];
        let Node::Block(block) = node else {
            panic!("text leaf at top level: {path:?}");
        };
        assert!(
            !matches!(block.kind, BlockKind::ListItem | BlockKind::Link),
            "{:?} at top level: {path:?}",
            block.kind
        );
        check_block(block, &path);
    }
    check_list_siblings(doc.blocks(), &[]);
}

fn check_block(block: &Block, path: &[usize]) {
    assert!(
        block.url.is_some() == (block.kind == BlockKind::Link),
        "url present on {:?} or missing on link: {path:?}",
        block.kind
    );

    match block.kind {
        kind if kind.is_list() => {
            assert!(!block.children.is_empty(), "empty list: {path:?}");
            for (i, child) in block.children.iter().enumerate() {
                let child_path = child_path(path, i);
                match child {
                    Node::Block(item) if item.kind == BlockKind::ListItem => {
                        check_block(item, &child_path)
                    }
                    other => panic!("list child is not a ListItem: {child_path:?} {other:?}"),
                }
            }
        }
        BlockKind::CodeBlock => {
            assert!(
                matches!(block.children.as_slice(), [Node::Text(t)] if t.marks.is_empty()),
                "code block must hold one unmarked text leaf: {path:?}"
            );
        }
        BlockKind::Link => {
            assert!(!block.children.is_empty(), "empty link: {path:?}");
            for (i, child) in block.children.iter().enumerate() {
                assert!(
                    matches!(child, Node::Text(t) if !t.is_empty()),
                    "link child must be a non-empty text leaf: {:?}",
                    child_path(path, i)
                );
            }
            check_text_runs(&block.children, path);
        }
        _ => check_text_block(block, path),
    }
}

fn check_text_block(block: &Block, path: &[usize]) {
    assert!(!block.children.is_empty(), "block without children: {path:?}");
    let mut seen_list = false;
    for (i, child) in block.children.iter().enumerate() {
        let child_path = child_path(path, i);
        match child {
            Node::Block(list) if list.kind.is_list() => {
                assert!(
                    block.kind == BlockKind::ListItem,
                    "list nested in {:?}: {child_path:?}",
                    block.kind
                );
                seen_list = true;
                check_block(list, &child_path);
            }
            Node::Block(link) if link.kind == BlockKind::Link => {
                assert!(!seen_list, "inline content after nested list: {child_path:?}");
                check_block(link, &child_path);
            }
            Node::Text(_) => {
                assert!(!seen_list, "inline content after nested list: {child_path:?}")
            }
            Node::Block(other) => {
                panic!("{:?} nested in {:?}: {child_path:?}", other.kind, block.kind)
            }
        }
    }

    let inline_len = block.children.iter().take_while(|c| c.is_inline()).count();
    let inline = &block.children[..inline_len];
    if let [Node::Text(only)] = inline {
        assert!(
            !only.is_empty() || only.marks.is_empty(),
            "empty text leaf carries marks: {path:?}"
        );
    } else {
        for (i, child) in inline.iter().enumerate() {
            assert!(
                !matches!(child, Node::Text(t) if t.is_empty()),
                "empty text leaf beside other content: {:?}",
                child_path(path, i)
            );
        }
    }
    check_text_runs(inline, path);
    check_list_siblings(&block.children, path);
}

fn check_text_runs(children: &[Node], path: &[usize]) {
    for (i, pair) in children.windows(2).enumerate() {
        if let [Node::Text(a), Node::Text(b)] = pair {
            assert!(
                a.marks != b.marks,
                "adjacent text leaves with equal marks: {:?}",
                child_path(path, i)
            );
        }
    }
}

fn check_list_siblings(children: &[Node], path: &[usize]) {
    for (i, pair) in children.windows(2).enumerate() {
        if let [Node::Block(a), Node::Block(b)] = pair {
            assert!(
                !(a.kind.is_list() && a.kind == b.kind),
                "adjacent {:?} siblings not merged: {:?}",
                a.kind,
                child_path(path, i)
            );
        }
    }
}

fn child_path(path: &[usize], i: usize) -> Vec<usize> {
    let mut p = path.to_vec();
    p.push(i);
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Text;

    #[test]
    fn accepts_new_document() {
        check(&Document::new());
    }

    #[test]
    #[should_panic(expected = "list child is not a ListItem")]
    fn rejects_paragraph_inside_list() {
        let mut doc = Document::new();
        doc.wrap_nodes(&[vec![0]], BlockKind::BulletedList).unwrap();
        check(&doc);
    }

    #[test]
    #[should_panic(expected = "adjacent text leaves with equal marks")]
    fn rejects_unmerged_runs() {
        let mut doc = Document::from_blocks([Block::paragraph("ab")]);
        doc.split_text(&[0, 0], 1).unwrap();
        check(&doc);
    }

    #[test]
    #[should_panic(expected = "ListItem at top level")]
    fn rejects_top_level_item() {
        let mut doc = Document::from_blocks([Block::paragraph("a")]);
        doc.set_node_kind(&[0], BlockKind::ListItem).unwrap();
        check(&doc);
    }

    #[test]
    fn accepts_nested_lists_after_inline_content() {
        let nested = Block::new(
            BlockKind::BulletedList,
            vec![Block::with_text(BlockKind::ListItem, "b").into()],
        );
        let doc = Document::from_blocks([Block::new(
            BlockKind::NumberedList,
            vec![Block::new(
                BlockKind::ListItem,
                vec![Text::new("a").into(), nested.into()],
            )
            .into()],
        )]);
        check(&doc);
    }
}
