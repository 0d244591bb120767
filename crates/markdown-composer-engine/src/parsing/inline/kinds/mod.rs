//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `TICK`, a raw zone that suppresses other parsing
//! - **`Delimiter`**: open/close pairs for bold, italic, strikethrough and
//!   underline
//! - **`Link`**: `OPEN = '['`, `MIDDLE = "]("`, `CLOSE = ')'`
//!
//! ## Design Principle
//!
//! All delimiter constants live here, not scattered in parser or serializer
//! code. Both sides of the codec read them from here.

pub mod code_span;
pub mod delimiter;
pub mod link;

pub use code_span::CodeSpan;
pub use delimiter::Delimiter;
pub use link::Link;

/// Starts a backslash escape.
pub const ESCAPE: char = '\\';
