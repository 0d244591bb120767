//! # Block Parsing
//!
//! Two-phase, line-oriented block parsing.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` from local facts alone (blank, fence opener, heading, quote,
//!    list marker and indentation, empty paragraph marker, plain text)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` keeps the open fence
//!    and the stack of open lists and emits model `Block`s
//!
//! ## Modules
//!
//! - **`kinds`**: block-specific types owning their delimiters (BlockQuote,
//!   CodeFence, Heading, ListMarker, Paragraph)
//! - **`classify`**: `MarkdownLineClassifier` produces a `LineClass` per line
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - Fenced code blocks are raw zones: no block or inline parsing inside
//! - Every non-list block is exactly one line
//! - Classification never fails; unrecognised lines are paragraphs

pub mod builder;
pub mod classify;
pub mod kinds;

pub use builder::BlockBuilder;
pub use classify::{LineClass, LineKind, MarkdownLineClassifier};
