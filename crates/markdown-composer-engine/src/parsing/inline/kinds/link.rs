/// Inline link `[text](url)` with owned delimiters.
pub struct Link;

impl Link {
    pub const OPEN: char = '[';
    /// Ends the link text and opens the destination.
    pub const MIDDLE: &'static str = "](";
    pub const CLOSE: char = ')';

    /// Characters backslash-escaped inside a destination.
    pub const DEST_ESCAPED: [char; 3] = ['\\', '(', ')'];
}
