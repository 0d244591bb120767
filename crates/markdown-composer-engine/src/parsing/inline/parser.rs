use std::collections::HashSet;

use crate::model::{Block, Mark, Marks, Node, Text};

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Delimiter, ESCAPE, Link},
};

/// Parses one line of inline Markdown into text leaves and links.
///
/// # Precedence
/// At each position the parser tries, in order: a backslash escape, the
/// closing delimiter of the innermost open mark, a code span, the paired
/// delimiters of [`Delimiter::PAIRED`], a link. The first construct that
/// closes wins; an opener that never closes is literal text.
///
/// Code spans are raw zones: `` `**` `` is code, not bold.
///
/// Never fails; every input character ends up in some leaf.
pub fn parse_inline(s: &str) -> Vec<Node> {
    let mut parser = InlineParser {
        cur: Cursor::new(s),
        failed: HashSet::new(),
    };
    parser.parse_run(&Marks::new(), None, false).unwrap_or_default()
}

/// Position, open marks, expected closer and whether inside link text.
type RunKey = (usize, u8, Option<&'static str>, bool);

struct InlineParser<'a> {
    cur: Cursor<'a>,
    /// Runs already known not to close, so that stacks of unmatched openers
    /// do not backtrack exponentially.
    failed: HashSet<RunKey>,
}

impl<'a> InlineParser<'a> {
    /// Parses up to and including `close`. Returns `None`, with the cursor
    /// restored, when the closer never comes or the run would be empty.
    fn parse_run(
        &mut self,
        marks: &Marks,
        close: Option<&'static str>,
        in_link: bool,
    ) -> Option<Vec<Node>> {
        let start = self.cur.clone();
        let key = (start.pos(), mark_bits(marks), close, in_link);
        if self.failed.contains(&key) {
            return None;
        }

        let mut out = Vec::new();
        let mut text = String::new();
        loop {
            if self.cur.eof() {
                if close.is_some() {
                    return self.fail(key, start);
                }
                break;
            }

            if self.cur.peek() == Some(ESCAPE)
                && self.cur.peek_second().is_some_and(|c| c.is_ascii_punctuation())
            {
                self.cur.bump();
                text.extend(self.cur.bump());
                continue;
            }

            if let Some(close) = close
                && self.cur.starts_with(close)
            {
                if out.is_empty() && text.is_empty() {
                    return self.fail(key, start);
                }
                self.cur.bump_n(close.len());
                flush_text(&mut out, &mut text, marks);
                return Some(out);
            }

            if self.cur.peek() == Some(CodeSpan::TICK) {
                match self.try_parse_code_span() {
                    Some(code) => {
                        flush_text(&mut out, &mut text, marks);
                        let mut code_marks = marks.clone();
                        code_marks.insert(Mark::Code);
                        out.push(
                            Text {
                                text: code,
                                marks: code_marks,
                            }
                            .into(),
                        );
                    }
                    None => {
                        // An unmatched backtick run is literal as a whole.
                        let rest = self.cur.rest();
                        let run = rest.len() - rest.trim_start_matches(CodeSpan::TICK).len();
                        text.push_str(&rest[..run]);
                        self.cur.bump_n(run);
                    }
                }
                continue;
            }

            if let Some(nodes) = self.try_parse_delimited(marks, in_link) {
                flush_text(&mut out, &mut text, marks);
                out.extend(nodes);
                continue;
            }

            if !in_link && let Some(link) = self.try_parse_link(marks) {
                flush_text(&mut out, &mut text, marks);
                out.push(link.into());
                continue;
            }

            text.extend(self.cur.bump());
        }

        flush_text(&mut out, &mut text, marks);
        Some(out)
    }

    fn fail(&mut self, key: RunKey, start: Cursor<'a>) -> Option<Vec<Node>> {
        self.failed.insert(key);
        self.cur = start;
        None
    }

    /// Attempts a code span at a backtick run. The span closes at the next
    /// run of exactly the same length.
    fn try_parse_code_span(&mut self) -> Option<String> {
        let rest = self.cur.rest();
        let open = rest.len() - rest.trim_start_matches(CodeSpan::TICK).len();
        let mut i = open;
        while let Some(found) = rest[i..].find(CodeSpan::TICK) {
            let at = i + found;
            let run = rest[at..].len() - rest[at..].trim_start_matches(CodeSpan::TICK).len();
            if run == open {
                let content = CodeSpan::unpad(&rest[open..at]).to_string();
                self.cur.bump_n(at + run);
                return Some(content);
            }
            i = at + run;
        }
        None
    }

    /// Attempts each paired delimiter whose mark is not already open.
    fn try_parse_delimited(&mut self, marks: &Marks, in_link: bool) -> Option<Vec<Node>> {
        for delimiter in Delimiter::PAIRED {
            if marks.contains(&delimiter.mark) || !self.cur.starts_with(delimiter.open) {
                continue;
            }
            let saved = self.cur.clone();
            self.cur.bump_n(delimiter.open.len());
            let mut inner = marks.clone();
            inner.insert(delimiter.mark);
            if let Some(nodes) = self.parse_run(&inner, Some(delimiter.close), in_link) {
                return Some(nodes);
            }
            self.cur = saved;
        }
        None
    }

    /// Attempts `[text](url)`. Inside the destination only `\\`, `\(` and `\)`
    /// are escapes.
    fn try_parse_link(&mut self, marks: &Marks) -> Option<Block> {
        if self.cur.peek() != Some(Link::OPEN) {
            return None;
        }
        let saved = self.cur.clone();
        self.cur.bump();
        let Some(children) = self.parse_run(marks, Some(Link::MIDDLE), true) else {
            self.cur = saved;
            return None;
        };

        let mut url = String::new();
        loop {
            match self.cur.bump() {
                None => {
                    self.cur = saved;
                    return None;
                }
                Some(c) if c == ESCAPE => match self.cur.peek() {
                    Some(next) if Link::DEST_ESCAPED.contains(&next) => {
                        url.extend(self.cur.bump());
                    }
                    _ => url.push(c),
                },
                Some(c) if c == Link::CLOSE => break,
                Some(c) => url.push(c),
            }
        }
        log::trace!("parsed link to {url}");
        Some(Block::link(url, children))
    }
}

fn flush_text(out: &mut Vec<Node>, text: &mut String, marks: &Marks) {
    if !text.is_empty() {
        out.push(
            Text {
                text: std::mem::take(text),
                marks: marks.clone(),
            }
            .into(),
        );
    }
}

fn mark_bits(marks: &Marks) -> u8 {
    marks.iter().fold(0, |bits, mark| bits | mark.bit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str, marks: &[Mark]) -> Node {
        Text::with_marks(s, marks.iter().copied()).into()
    }

    #[test]
    fn parse_simple_text() {
        assert_eq!(parse_inline("hello world"), vec![text("hello world", &[])]);
    }

    #[test]
    fn parse_empty() {
        assert_eq!(parse_inline(""), vec![]);
    }

    #[test]
    fn parse_marks() {
        assert_eq!(
            parse_inline("a *i* **b** ~~s~~ <u>u</u>"),
            vec![
                text("a ", &[]),
                text("i", &[Mark::Italic]),
                text(" ", &[]),
                text("b", &[Mark::Bold]),
                text(" ", &[]),
                text("s", &[Mark::Strikethrough]),
                text(" ", &[]),
                text("u", &[Mark::Underline]),
            ]
        );
    }

    #[test]
    fn nested_marks_accumulate() {
        assert_eq!(
            parse_inline("***x***"),
            vec![text("x", &[Mark::Bold, Mark::Italic])]
        );
        assert_eq!(
            parse_inline("<u>**`x`**</u>"),
            vec![text("x", &[Mark::Code, Mark::Bold, Mark::Underline])]
        );
    }

    #[test]
    fn code_span_suppresses_marks() {
        assert_eq!(parse_inline("`**not bold**`"), vec![text("**not bold**", &[Mark::Code])]);
    }

    #[test]
    fn code_span_with_longer_fence() {
        assert_eq!(parse_inline("``a`b``"), vec![text("a`b", &[Mark::Code])]);
        assert_eq!(parse_inline("`` ` ``"), vec![text("`", &[Mark::Code])]);
    }

    #[test]
    fn unclosed_constructs_become_text() {
        assert_eq!(parse_inline("**unclosed"), vec![text("**unclosed", &[])]);
        assert_eq!(parse_inline("`unclosed code"), vec![text("`unclosed code", &[])]);
        assert_eq!(parse_inline("[a](b"), vec![text("[a](b", &[])]);
        assert_eq!(parse_inline("****"), vec![text("****", &[])]);
    }

    #[test]
    fn escapes_are_literal() {
        assert_eq!(parse_inline("\\*not\\* \\[x\\]"), vec![text("*not* [x]", &[])]);
        assert_eq!(parse_inline("a\\b"), vec![text("a\\b", &[])]);
    }

    #[test]
    fn parse_link() {
        assert_eq!(
            parse_inline("see [**the** docs](https://e.com/a_(b\\))."),
            vec![
                text("see ", &[]),
                Block::link(
                    "https://e.com/a_(b)",
                    vec![text("the", &[Mark::Bold]), text(" docs", &[])],
                )
                .into(),
                text(".", &[]),
            ]
        );
    }

    #[test]
    fn links_do_not_nest() {
        assert_eq!(
            parse_inline("[[a](b)](c)"),
            vec![
                Block::link("b", vec![text("[a", &[])]).into(),
                text("](c)", &[]),
            ]
        );
    }

    #[test]
    fn unmatched_openers_terminate() {
        let input = format!("{}x", "*~~<u>[".repeat(50));
        let nodes = parse_inline(&input);
        assert!(!nodes.is_empty());
        assert!(nodes.iter().all(|n| n.as_text().is_some()));
    }
}
