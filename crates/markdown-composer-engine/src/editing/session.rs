use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EditResult;
use crate::model::{BlockKind, Document, Mark};
use crate::models::MessageLog;
use crate::rendering::{render_html, serialize_to_markdown};

use super::history::History;
use super::selection::Selection;
use super::{formatting, input, links, lists};

/// Tunables for an [`EditorSession`], read from the `[editor]` table of the
/// config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Maximum number of undo steps kept; unbounded when absent.
    pub history_limit: Option<usize>,
}

/// One document being composed plus its undo history.
///
/// Every edit goes through the pure functions in [`crate::editing`]; the
/// session only swaps in the returned snapshot and records it.
#[derive(Debug, Clone)]
pub struct EditorSession {
    document: Document,
    history: History,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(&SessionOptions::default())
    }
}

impl EditorSession {
    pub fn new(options: &SessionOptions) -> Self {
        Self::with_document(Document::new(), options)
    }

    pub fn with_document(document: Document, options: &SessionOptions) -> Self {
        Self {
            document,
            history: History::with_limit(options.history_limit),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Runs an edit against the current document and records it when it
    /// changed anything.
    pub fn apply<F>(&mut self, edit: F) -> EditResult<&Document>
    where
        F: FnOnce(&Document) -> EditResult<Document>,
    {
        let after = edit(&self.document)?;
        if after != self.document {
            let before = std::mem::replace(&mut self.document, after.clone());
            self.history.record(before, after);
        }
        Ok(&self.document)
    }

    pub fn toggle_mark(&mut self, selection: &Selection, mark: Mark) -> EditResult<&Document> {
        self.apply(|doc| formatting::toggle_mark(doc, selection, mark))
    }

    pub fn toggle_block(&mut self, selection: &Selection, kind: BlockKind) -> EditResult<&Document> {
        self.apply(|doc| formatting::toggle_block(doc, selection, kind))
    }

    pub fn sink(&mut self, selection: &Selection) -> EditResult<&Document> {
        self.apply(|doc| lists::sink(doc, selection))
    }

    pub fn lift(&mut self, selection: &Selection) -> EditResult<&Document> {
        self.apply(|doc| lists::lift(doc, selection))
    }

    pub fn set_link(&mut self, selection: &Selection, url: &str) -> EditResult<&Document> {
        self.apply(|doc| links::set_link(doc, selection, url))
    }

    pub fn unset_link(&mut self, selection: &Selection) -> EditResult<&Document> {
        self.apply(|doc| links::unset_link(doc, selection))
    }

    pub fn insert_text(&mut self, selection: &Selection, text: &str) -> EditResult<&Document> {
        self.apply(|doc| input::insert_text(doc, selection, text))
    }

    /// Restores the document from before the last edit. Without history the
    /// current document is returned unchanged.
    pub fn undo(&mut self) -> &Document {
        if let Some(entry) = self.history.undo() {
            self.document = entry.before.clone();
            log::debug!("undo");
        }
        &self.document
    }

    pub fn redo(&mut self) -> &Document {
        if let Some(entry) = self.history.redo() {
            self.document = entry.after.clone();
            log::debug!("redo");
        }
        &self.document
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn to_markdown(&self) -> String {
        serialize_to_markdown(&self.document)
    }

    pub fn to_html(&self) -> String {
        render_html(&self.document)
    }

    /// Back to an empty document with no history.
    pub fn reset(&mut self) {
        self.document = Document::new();
        self.history.clear();
    }

    /// Sends the composed text to `log` and starts over.
    ///
    /// Whitespace-only text is not sent, but the composer is cleared either
    /// way. Returns the id of the new message, if one was added.
    pub fn submit(&mut self, log: &mut MessageLog) -> Option<Uuid> {
        let markdown = self.to_markdown();
        let id = if markdown.trim().is_empty() {
            log::warn!("ignoring submit of blank message");
            None
        } else {
            Some(log.push(markdown))
        };
        self.reset();
        id
    }
}
