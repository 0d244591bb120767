use std::collections::BTreeSet;

use crate::error::{EditError, EditResult};
use crate::model::{BlockKind, Document, Path};

use super::selection::{LeafSpan, Selection, in_code_block};

fn in_link(doc: &Document, path: &[usize]) -> Option<Path> {
    doc.find_ancestor(path, |b| b.kind == BlockKind::Link)
}

/// The selected characters when they can become one link: a non-empty run
/// of sibling leaves directly inside one block that is neither a code block
/// nor already a link.
fn linkable_spans(doc: &Document, selection: &Selection) -> EditResult<Option<Vec<LeafSpan>>> {
    let range = selection.resolve(doc)?;
    let spans: Vec<LeafSpan> = range
        .leaves(doc)
        .into_iter()
        .filter(|span| !span.is_empty())
        .collect();
    let Some(first) = spans.first() else {
        return Ok(None);
    };
    let parent = &first.path[..first.path.len() - 1];
    if spans.iter().any(|s| s.path[..s.path.len() - 1] != *parent) {
        return Err(EditError::NonContiguousRange);
    }
    if in_code_block(doc, &first.path) || in_link(doc, &first.path).is_some() {
        return Ok(None);
    }
    Ok(Some(spans))
}

pub fn can_set_link(doc: &Document, selection: &Selection) -> bool {
    matches!(linkable_spans(doc, selection), Ok(Some(_)))
}

/// Wraps the selected characters in a link to `url`.
///
/// A caret, a code block or text that is already linked leave the document
/// unchanged; a selection crossing block or link boundaries is rejected.
pub fn set_link(doc: &Document, selection: &Selection, url: &str) -> EditResult<Document> {
    let mut work = doc.clone();
    let Some(spans) = linkable_spans(doc, selection)? else {
        return Ok(work);
    };
    let (Some(first), Some(last)) = (spans.first(), spans.last()) else {
        return Ok(work);
    };

    let parent = first.path[..first.path.len() - 1].to_vec();
    let mut from = first.path[first.path.len() - 1];
    let mut to = last.path[last.path.len() - 1];
    work.split_text(&last.path, last.end)?;
    if work.split_text(&first.path, first.start)? {
        from += 1;
        to += 1;
    }
    let paths: Vec<Path> = (from..=to)
        .map(|i| {
            let mut p = parent.clone();
            p.push(i);
            p
        })
        .collect();
    let link = work.wrap_nodes(&paths, BlockKind::Link)?;
    work.set_url(&link, url)?;
    work.normalize();
    log::debug!("linked {} leaf span(s) to {url}", spans.len());
    Ok(work)
}

/// Removes every link the selection touches, keeping its text.
pub fn unset_link(doc: &Document, selection: &Selection) -> EditResult<Document> {
    let range = selection.resolve(doc)?;
    let links: BTreeSet<Path> = range
        .leaves(doc)
        .iter()
        .filter_map(|span| in_link(doc, &span.path))
        .collect();
    let mut work = doc.clone();
    if links.is_empty() {
        return Ok(work);
    }
    work.unwrap_nodes(|path, block| block.kind == BlockKind::Link && links.contains(path));
    work.normalize();
    Ok(work)
}

pub fn is_link_active(doc: &Document, selection: &Selection) -> bool {
    selection.resolve(doc).is_ok_and(|range| {
        range
            .leaves(doc)
            .iter()
            .any(|span| in_link(doc, &span.path).is_some())
    })
}
