/// Plain text block. Blank lines only separate blocks, so a paragraph with no
/// text is written as a lone non-breaking space entity.
pub struct Paragraph;

impl Paragraph {
    pub const EMPTY: &'static str = "&nbsp;";

    pub fn is_empty_marker(line: &str) -> bool {
        line.trim_end() == Self::EMPTY
    }
}
