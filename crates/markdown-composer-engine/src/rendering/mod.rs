//! # Rendering
//!
//! Output formats for a [`Document`](crate::model::Document):
//!
//! - **`markdown`**: the canonical Markdown text, read back by
//!   [`parse_markdown`](crate::parse_markdown)
//! - **`html`**: an HTML fragment for display
//! - **`outline`**: the `Display` impl, an indented node tree

pub mod html;
pub mod markdown;
pub mod outline;

pub use html::render_html;
pub use markdown::serialize_to_markdown;
