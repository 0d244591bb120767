//! # Inline Parsing
//!
//! Cursor-based inline parsing with code spans as raw zones.
//!
//! ## Architecture
//!
//! Inline parsing is separate from block parsing and runs over the content of
//! one line: a paragraph, heading, quote or list item.
//!
//! The parser is a recursive descent over "runs": each open mark starts a
//! nested run that must end at its closing delimiter, otherwise the opener is
//! taken back as literal text.
//!
//! ## Modules
//!
//! - **`kinds`**: inline types owning their delimiters (CodeSpan, Delimiter, Link)
//! - **`cursor`**: `Cursor` for character-by-character parsing with position tracking
//! - **`parser`**: `parse_inline()` main entry point with `try_parse_*` helpers

pub mod cursor;
pub mod kinds;
pub mod parser;

pub use parser::parse_inline;
