use std::collections::VecDeque;

use crate::model::Document;

/// One recorded edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub before: Document,
    pub after: Document,
}

/// Undo/redo stacks of document snapshots.
///
/// Unbounded unless a limit is given, in which case the oldest entries are
/// dropped first.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: VecDeque<Entry>,
    redo: Vec<Entry>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Records an edit. Any redo history is invalidated. Edits that changed
    /// nothing are not recorded.
    pub fn record(&mut self, before: Document, after: Document) {
        if before == after {
            return;
        }
        self.redo.clear();
        self.undo.push_back(Entry { before, after });
        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
                log::trace!("history limit {limit} reached, dropped oldest entry");
            }
        }
    }

    /// Steps back one edit, returning the entry whose `before` is now current.
    pub fn undo(&mut self) -> Option<&Entry> {
        let entry = self.undo.pop_back()?;
        self.redo.push(entry);
        self.redo.last()
    }

    /// Re-applies the last undone edit, returning the entry whose `after` is
    /// now current.
    pub fn redo(&mut self) -> Option<&Entry> {
        let entry = self.redo.pop()?;
        self.undo.push_back(entry);
        self.undo.back()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
