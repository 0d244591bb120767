/// Blockquote block type with owned delimiter constant.
///
/// Quotes hold a single line of inline content; block syntax after the
/// prefix stays literal text.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips the prefix and one optional space, returning the content.
    pub fn strip_prefix(line: &str) -> Option<&str> {
        let rest = line.strip_prefix(Self::PREFIX)?;
        Some(rest.strip_prefix(' ').unwrap_or(rest))
    }
}
