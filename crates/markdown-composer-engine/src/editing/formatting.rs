//! Mark and block toggles.
//!
//! Every operation takes the current document by reference and returns a new
//! snapshot; the input is never touched, so a failed call leaves nothing to
//! roll back.

use crate::error::{EditError, EditResult};
use crate::model::{Block, BlockKind, Document, Mark, Node, Path};

use super::selection::{Range, Selection};

/// Adds `mark` to the selected characters unless every one of them already
/// has it, in which case it is removed.
pub fn toggle_mark(doc: &Document, selection: &Selection, mark: Mark) -> EditResult<Document> {
    let range = selection.resolve(doc)?;
    let spans = range.formattable_leaves(doc);
    let mut work = doc.clone();
    if spans.is_empty() {
        return Ok(work);
    }

    let add = !spans
        .iter()
        .all(|span| doc.text(&span.path).is_ok_and(|t| t.has(mark)));

    // Back to front so that splitting a leaf never shifts a path still to visit.
    for span in spans.iter().rev() {
        work.split_text(&span.path, span.end)?;
        let target = if work.split_text(&span.path, span.start)? {
            next_sibling(&span.path)
        } else {
            span.path.clone()
        };
        if add {
            work.add_mark(&target, mark)?;
        } else {
            work.remove_mark(&target, mark)?;
        }
    }
    work.normalize();
    log::debug!(
        "{} {mark:?} on {} leaf span(s)",
        if add { "added" } else { "removed" },
        spans.len()
    );
    Ok(work)
}

/// True when at least one selected leaf carries `mark`. A caret reports the
/// leaf it sits in.
pub fn is_mark_active(doc: &Document, selection: &Selection, mark: Mark) -> bool {
    let Ok(range) = selection.resolve(doc) else {
        return false;
    };
    let spans = range.formattable_leaves(doc);
    if spans.is_empty() {
        return doc.text(&range.start.path).is_ok_and(|t| t.has(mark));
    }
    spans
        .iter()
        .any(|span| doc.text(&span.path).is_ok_and(|t| t.has(mark)))
}

pub fn can_toggle_mark(doc: &Document, selection: &Selection) -> bool {
    selection
        .resolve(doc)
        .is_ok_and(|range| !range.formattable_leaves(doc).is_empty())
}

/// A block the block toggle acts on: a top-level block, or one top-level item
/// of a top-level list (nested items travel with it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unit {
    top: usize,
    item: Option<usize>,
}

fn covered_units(doc: &Document, range: &Range) -> Vec<Unit> {
    let first_top = range.start.path[0];
    let last_top = range.end.path[0];
    let mut units = Vec::new();
    for top in first_top..=last_top {
        match doc.blocks().get(top) {
            Some(Node::Block(list)) if list.kind.is_list() => {
                let last_item = list.children.len().saturating_sub(1);
                let from = if top == first_top {
                    range.start.path.get(1).copied().unwrap_or(0)
                } else {
                    0
                };
                let to = if top == last_top {
                    range.end.path.get(1).copied().unwrap_or(last_item)
                } else {
                    last_item
                };
                units.extend((from..=to).map(|item| Unit {
                    top,
                    item: Some(item),
                }));
            }
            Some(_) => units.push(Unit { top, item: None }),
            None => {}
        }
    }
    units
}

fn units_have_kind(doc: &Document, units: &[Unit], kind: BlockKind) -> bool {
    units.iter().any(|unit| {
        let Ok(top) = doc.block(&[unit.top]) else {
            return false;
        };
        match unit.item {
            Some(_) => kind.is_list() && top.kind == kind,
            None => top.kind == kind,
        }
    })
}

/// Turns the selected blocks into `kind`, or back into paragraphs when one of
/// them already is.
///
/// Lists overlapping the selection are split at its edges and the covered
/// items are taken out of the list first, so the result never holds a
/// non-item inside a list. For list kinds the converted blocks are then
/// wrapped in one list of that kind, which is also how toggling bullets on a
/// numbered list re-wraps it.
pub fn toggle_block(doc: &Document, selection: &Selection, kind: BlockKind) -> EditResult<Document> {
    if !kind.is_toggleable() {
        return Err(EditError::UnsupportedBlockKind(kind));
    }
    let range = selection.resolve(doc)?;
    let units = covered_units(doc, &range);
    let active = units_have_kind(doc, &units, kind);
    let target = if active {
        BlockKind::Paragraph
    } else if kind.is_list() {
        BlockKind::ListItem
    } else {
        kind
    };

    let mut work = doc.clone();
    let (Some(first), Some(last)) = (units.first().copied(), units.last().copied()) else {
        return Ok(work);
    };

    if let Some(item) = last.item {
        work.split_block(&[last.top], item + 1)?;
    }
    let mut top = first.top;
    if let Some(item) = first.item
        && work.split_block(&[first.top], item)?
    {
        top += 1;
    }
    let covered = top..=last.top + (top - first.top);
    let unwrapped = work.unwrap_nodes(|path, block| {
        path.len() == 1 && covered.contains(&path[0]) && block.kind.is_list()
    });
    log::trace!("unwrapped {unwrapped} list(s) covering the selection");

    // Each unit is now a top-level block starting at `top`.
    let mut produced = 0;
    for index in (top..top + units.len()).rev() {
        produced += convert_block(&mut work, index, target)?;
    }

    if !active && kind.is_list() {
        let paths: Vec<Path> = (top..top + produced).map(|i| vec![i]).collect();
        work.wrap_nodes(&paths, kind)?;
    }
    work.normalize();
    log::debug!(
        "toggled {kind:?} {} on {} block(s)",
        if active { "off" } else { "on" },
        units.len()
    );
    Ok(work)
}

/// Gives the top-level block at `index` the `target` kind and returns how many
/// blocks of that kind took its place.
fn convert_block(work: &mut Document, index: usize, target: BlockKind) -> EditResult<usize> {
    let path = [index];
    let (source, code, first_list) = {
        let block = work.block(&path)?;
        (
            block.kind,
            block.plain_text(),
            block.children.iter().position(Node::is_list),
        )
    };

    if source == BlockKind::CodeBlock && target != BlockKind::CodeBlock {
        let lines: Vec<&str> = code.split('\n').collect();
        for (offset, line) in lines.iter().enumerate() {
            let block = Block::with_text(target, *line);
            work.insert_node(&[index + 1 + offset], block.into())?;
        }
        work.delete_at(&path)?;
        return Ok(lines.len());
    }

    if source == BlockKind::ListItem
        && target != BlockKind::ListItem
        && let Some(first_list) = first_list
    {
        // Nested lists follow the converted block at the top level. An item
        // with no text of its own leaves only its lists behind.
        if first_list == 0 {
            work.unwrap_nodes(|p, _| p.len() == 1 && p[0] == index);
            return Ok(0);
        }
        work.split_block(&path, first_list)?;
        work.unwrap_nodes(|p, _| p.len() == 1 && p[0] == index + 1);
    }

    work.set_node_kind(&path, target)?;
    Ok(1)
}

/// For list kinds: a covered block lives in a top-level list of that kind.
/// Otherwise: a covered block already is `kind`.
pub fn is_block_active(doc: &Document, selection: &Selection, kind: BlockKind) -> bool {
    selection
        .resolve(doc)
        .is_ok_and(|range| units_have_kind(doc, &covered_units(doc, &range), kind))
}

pub fn can_toggle_block(doc: &Document, selection: &Selection, kind: BlockKind) -> bool {
    kind.is_toggleable() && selection.resolve(doc).is_ok()
}

pub(crate) fn next_sibling(path: &[usize]) -> Path {
    let mut next = path.to_vec();
    if let Some(last) = next.last_mut() {
        *last += 1;
    }
    next
}
