/*!
 * # Editing
 *
 * Formatting operations over the [`Document`](crate::model::Document) tree.
 *
 * ## Snapshots, not mutation
 *
 * Every operation here is a pure function of the current document and a
 * [`Selection`]: it clones a working copy, applies structural primitives to
 * it, restores the normal form and hands the copy back. A failing call
 * returns an [`EditError`](crate::EditError) and the caller keeps the
 * document it had.
 *
 * [`EditorSession`] owns one document and its [`History`], swapping in each
 * returned snapshot and recording `(before, after)` pairs for undo/redo.
 *
 * ## Modules
 *
 * - **`selection`**: `Point`, `Selection` and the resolved `Range`
 * - **`formatting`**: mark and block toggles with their active/enabled queries
 * - **`lists`**: `sink`/`lift` for list nesting
 * - **`links`**: wrapping selected text in links and removing them
 * - **`input`**: plain text insertion
 * - **`history`**: undo/redo stacks
 * - **`session`**: `EditorSession`, the stateful facade
 * - **`toolbar`**: the `Operation` buttons in toolbar order
 *
 * ## Usage
 *
 * ```rust
 * use markdown_composer_engine::editing::*;
 * use markdown_composer_engine::model::Mark;
 *
 * let mut session = EditorSession::default();
 * let caret = Selection::collapsed(Point::new(vec![0, 0], 0));
 * session.insert_text(&caret, "hello").unwrap();
 *
 * let all = Selection::all(session.document());
 * session.toggle_mark(&all, Mark::Bold).unwrap();
 * assert_eq!(session.to_markdown(), "**hello**");
 *
 * session.undo();
 * assert_eq!(session.to_markdown(), "hello");
 * ```
 */

pub mod formatting;
pub mod history;
pub mod input;
pub mod links;
pub mod lists;
pub mod selection;
pub mod session;
pub mod toolbar;

pub use formatting::{
    can_toggle_block, can_toggle_mark, is_block_active, is_mark_active, toggle_block, toggle_mark,
};
pub use history::{Entry, History};
pub use input::insert_text;
pub use links::{can_set_link, is_link_active, set_link, unset_link};
pub use lists::{can_lift, can_sink, lift, sink};
pub use selection::{LeafSpan, Point, Range, Selection};
pub use session::{EditorSession, SessionOptions};
pub use toolbar::{Operation, UnknownOperation};
