//! Nesting of list items.

use crate::error::EditResult;
use crate::model::{BlockKind, Document, Node, Path};

use super::formatting::next_sibling;
use super::selection::Selection;

fn child(path: &[usize], index: usize) -> Path {
    let mut p = path.to_vec();
    p.push(index);
    p
}

fn lowest_item(doc: &Document, selection: &Selection) -> Option<Path> {
    let range = selection.resolve(doc).ok()?;
    doc.find_ancestor(&range.start.path, |b| b.kind == BlockKind::ListItem)
}

/// The item to lift and the item holding its list, when there is one.
fn lift_target(doc: &Document, selection: &Selection) -> Option<(Path, Path)> {
    let item = lowest_item(doc, selection)?;
    let list = &item[..item.len() - 1];
    let parent_item = list.split_last().map(|(_, p)| p.to_vec())?;
    let holder = doc.block(&parent_item).ok()?;
    (holder.kind == BlockKind::ListItem).then_some((item, parent_item))
}

pub fn can_sink(doc: &Document, selection: &Selection) -> bool {
    lowest_item(doc, selection).is_some()
}

pub fn can_lift(doc: &Document, selection: &Selection) -> bool {
    lift_target(doc, selection).is_some()
}

/// Nests the item holding the selection start one level deeper: its content
/// moves into a fresh item of a new list (of the same kind as its own list),
/// which becomes the item's only child.
pub fn sink(doc: &Document, selection: &Selection) -> EditResult<Document> {
    selection.resolve(doc)?;
    let mut work = doc.clone();
    let Some(item) = lowest_item(doc, selection) else {
        return Ok(work);
    };
    let list_kind = doc.block(&item[..item.len() - 1])?.kind;
    let content: Vec<Path> = (0..doc.block(&item)?.children.len())
        .map(|i| child(&item, i))
        .collect();

    let inner = work.wrap_nodes(&content, BlockKind::ListItem)?;
    work.wrap_nodes(&[inner], list_kind)?;
    work.normalize();
    log::debug!("sank list item {item:?}");
    Ok(work)
}

/// Moves the item holding the selection start out of its list, right after
/// the item that list belongs to. Items following it in its old list become
/// its own nested list. When that leaves the parent item empty, the lifted
/// item takes its place, which undoes [`sink`].
pub fn lift(doc: &Document, selection: &Selection) -> EditResult<Document> {
    selection.resolve(doc)?;
    let mut work = doc.clone();
    let Some((item, parent_item)) = lift_target(doc, selection) else {
        return Ok(work);
    };
    let list = item[..item.len() - 1].to_vec();
    let index = item[item.len() - 1];
    let list_len = doc.block(&list)?.children.len();

    if index + 1 < list_len {
        work.split_block(&list, index + 1)?;
        let followers = work.delete_at(&next_sibling(&list))?;
        let end = work.block(&item)?.children.len();
        work.insert_node(&child(&item, end), followers)?;
    }

    let lifted = work.delete_at(&item)?;
    if work.block(&list)?.children.is_empty() {
        work.delete_at(&list)?;
    }
    let parent_empty = work
        .block(&parent_item)?
        .children
        .iter()
        .all(|c| matches!(c, Node::Text(t) if t.is_empty()));
    if parent_empty {
        work.delete_at(&parent_item)?;
        work.insert_node(&parent_item, lifted)?;
    } else {
        work.insert_node(&next_sibling(&parent_item), lifted)?;
    }
    work.normalize();
    log::debug!("lifted list item {item:?}");
    Ok(work)
}
