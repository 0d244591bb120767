pub mod editing;
pub mod error;
pub mod model;
pub mod models;
pub mod parsing;
pub mod rendering;

// Re-export key types for easier usage
pub use error::{EditError, EditResult};
pub use model::{Block, BlockKind, Document, Mark, Node, Path, Text};
pub use models::{Message, MessageLog};
pub use parsing::parse_markdown;
pub use rendering::{render_html, serialize_to_markdown};

/// A fresh document: one empty paragraph.
pub fn create_document() -> Document {
    Document::new()
}
