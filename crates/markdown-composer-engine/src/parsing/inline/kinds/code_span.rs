/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: char = '`';

    /// Strips the single space of padding a span carries when its content
    /// starts and ends with a space and is not all spaces.
    pub fn unpad(content: &str) -> &str {
        let padded = content.len() >= 2
            && content.starts_with(' ')
            && content.ends_with(' ')
            && !content.chars().all(|c| c == ' ');
        if padded {
            &content[1..content.len() - 1]
        } else {
            content
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpad_strips_one_space_each_side() {
        assert_eq!(CodeSpan::unpad("  a  "), " a ");
        assert_eq!(CodeSpan::unpad(" ` "), "`");
    }

    #[test]
    fn unpad_keeps_all_space_content() {
        assert_eq!(CodeSpan::unpad("   "), "   ");
        assert_eq!(CodeSpan::unpad("a "), "a ");
    }
}
