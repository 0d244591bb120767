pub mod document;
pub mod invariants;
pub mod node;

pub use document::{Document, Nodes, Path};
pub use node::{Block, BlockKind, Mark, Marks, Node, Text};
