use std::fmt;
use std::str::FromStr;

use crate::error::{EditError, EditResult};
use crate::model::{BlockKind, Document, Mark};

use super::formatting::{can_toggle_block, can_toggle_mark, is_block_active, is_mark_active};
use super::links::{can_set_link, is_link_active};
use super::lists::{can_lift, can_sink};
use super::selection::Selection;
use super::session::EditorSession;

/// A toolbar button of the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ToggleMark(Mark),
    /// Removes the links under the selection, or links the selected text to
    /// a URL supplied through [`Operation::apply_with_url`].
    Link,
    ToggleBlock(BlockKind),
    Sink,
    Lift,
    Undo,
    Redo,
}

impl Operation {
    /// Buttons in toolbar order.
    pub const TOOLBAR: [Operation; 15] = [
        Operation::ToggleMark(Mark::Bold),
        Operation::ToggleMark(Mark::Italic),
        Operation::Link,
        Operation::ToggleBlock(BlockKind::Heading1),
        Operation::ToggleBlock(BlockKind::Heading2),
        Operation::ToggleMark(Mark::Code),
        Operation::ToggleMark(Mark::Underline),
        Operation::ToggleMark(Mark::Strikethrough),
        Operation::ToggleBlock(BlockKind::BlockQuote),
        Operation::ToggleBlock(BlockKind::NumberedList),
        Operation::ToggleBlock(BlockKind::BulletedList),
        Operation::Sink,
        Operation::Lift,
        Operation::Undo,
        Operation::Redo,
    ];

    /// Whether the button is enabled for this selection.
    pub fn can_apply(self, session: &EditorSession, selection: &Selection) -> bool {
        let doc = session.document();
        match self {
            Operation::ToggleMark(_) => can_toggle_mark(doc, selection),
            Operation::Link => is_link_active(doc, selection) || can_set_link(doc, selection),
            Operation::ToggleBlock(kind) => can_toggle_block(doc, selection, kind),
            Operation::Sink => can_sink(doc, selection),
            Operation::Lift => can_lift(doc, selection),
            Operation::Undo => session.can_undo(),
            Operation::Redo => session.can_redo(),
        }
    }

    /// Whether the button shows as pressed.
    pub fn is_active(self, doc: &Document, selection: &Selection) -> bool {
        match self {
            Operation::ToggleMark(mark) => is_mark_active(doc, selection, mark),
            Operation::Link => is_link_active(doc, selection),
            Operation::ToggleBlock(kind) => is_block_active(doc, selection, kind),
            Operation::Sink | Operation::Lift | Operation::Undo | Operation::Redo => false,
        }
    }

    /// Presses the button. The link button can only remove links this way;
    /// adding one fails with [`EditError::MissingLinkUrl`].
    pub fn apply<'s>(
        self,
        session: &'s mut EditorSession,
        selection: &Selection,
    ) -> EditResult<&'s Document> {
        match self {
            Operation::ToggleMark(mark) => session.toggle_mark(selection, mark),
            Operation::Link if is_link_active(session.document(), selection) => {
                session.unset_link(selection)
            }
            Operation::Link => Err(EditError::MissingLinkUrl),
            Operation::ToggleBlock(kind) => session.toggle_block(selection, kind),
            Operation::Sink => session.sink(selection),
            Operation::Lift => session.lift(selection),
            Operation::Undo => Ok(session.undo()),
            Operation::Redo => Ok(session.redo()),
        }
    }

    /// Presses the button with the URL entered for it. Only the link button
    /// uses the URL, and only when no link is active.
    pub fn apply_with_url<'s>(
        self,
        session: &'s mut EditorSession,
        selection: &Selection,
        url: &str,
    ) -> EditResult<&'s Document> {
        match self {
            Operation::Link if !is_link_active(session.document(), selection) => {
                session.set_link(selection, url)
            }
            _ => self.apply(session, selection),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::ToggleMark(Mark::Bold) => "bold",
            Operation::ToggleMark(Mark::Italic) => "italic",
            Operation::ToggleMark(Mark::Underline) => "underline",
            Operation::ToggleMark(Mark::Strikethrough) => "strike",
            Operation::ToggleMark(Mark::Code) => "code",
            Operation::Link => "link",
            Operation::ToggleBlock(BlockKind::Heading1) => "h1",
            Operation::ToggleBlock(BlockKind::Heading2) => "h2",
            Operation::ToggleBlock(BlockKind::BlockQuote) => "quote",
            Operation::ToggleBlock(BlockKind::CodeBlock) => "codeblock",
            Operation::ToggleBlock(BlockKind::BulletedList) => "bullets",
            Operation::ToggleBlock(BlockKind::NumberedList) => "numbers",
            Operation::ToggleBlock(BlockKind::Paragraph) => "paragraph",
            Operation::ToggleBlock(BlockKind::ListItem) => "item",
            Operation::ToggleBlock(BlockKind::Link) => "link-block",
            Operation::Sink => "sink",
            Operation::Lift => "lift",
            Operation::Undo => "undo",
            Operation::Redo => "redo",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation {0:?}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "bold" => Operation::ToggleMark(Mark::Bold),
            "italic" => Operation::ToggleMark(Mark::Italic),
            "underline" => Operation::ToggleMark(Mark::Underline),
            "strike" => Operation::ToggleMark(Mark::Strikethrough),
            "code" => Operation::ToggleMark(Mark::Code),
            "link" => Operation::Link,
            "h1" => Operation::ToggleBlock(BlockKind::Heading1),
            "h2" => Operation::ToggleBlock(BlockKind::Heading2),
            "quote" => Operation::ToggleBlock(BlockKind::BlockQuote),
            "codeblock" => Operation::ToggleBlock(BlockKind::CodeBlock),
            "bullets" => Operation::ToggleBlock(BlockKind::BulletedList),
            "numbers" => Operation::ToggleBlock(BlockKind::NumberedList),
            "paragraph" => Operation::ToggleBlock(BlockKind::Paragraph),
            "sink" => Operation::Sink,
            "lift" => Operation::Lift,
            "undo" => Operation::Undo,
            "redo" => Operation::Redo,
            other => return Err(UnknownOperation(other.to_string())),
        };
        Ok(op)
    }
}
