use crate::error::{EditError, EditResult};
use crate::model::Document;

use super::selection::{Selection, in_code_block};

/// Replaces the selected characters of one text leaf with `text`, which takes
/// on the leaf's marks. Line breaks survive only inside a code block; anywhere
/// else they become spaces.
pub fn insert_text(doc: &Document, selection: &Selection, text: &str) -> EditResult<Document> {
    let range = selection.resolve(doc)?;
    if range.start.path != range.end.path {
        return Err(EditError::NonContiguousRange);
    }
    let mut work = doc.clone();
    if range.is_collapsed() && text.is_empty() {
        return Ok(work);
    }

    let path = &range.start.path;
    let replacement = if in_code_block(doc, path) {
        text.replace("\r\n", "\n")
    } else {
        text.replace("\r\n", " ").replace(['\n', '\r'], " ")
    };
    work.replace_text(path, range.start.offset, range.end.offset, &replacement)?;
    work.normalize();
    log::trace!("inserted {} byte(s) at {path:?}", replacement.len());
    Ok(work)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::selection::Point;
    use crate::model::{Block, BlockKind, Mark, Text, invariants};
    use pretty_assertions::assert_eq;

    fn caret(path: &[usize], offset: usize) -> Selection {
        Selection::collapsed(Point::new(path.to_vec(), offset))
    }

    #[test]
    fn typing_into_the_empty_document() {
        let doc = Document::new();
        let out = insert_text(&doc, &caret(&[0, 0], 0), "hi").unwrap();
        invariants::check(&out);
        assert_eq!(out, Document::from_blocks([Block::paragraph("hi")]));
    }

    #[test]
    fn replaces_a_range_and_keeps_marks() {
        let doc = Document::from_blocks([Block::new(
            BlockKind::Paragraph,
            vec![Text::with_marks("hello", [Mark::Bold]).into()],
        )]);
        let sel = Selection::new(Point::new(vec![0, 0], 1), Point::new(vec![0, 0], 4));
        let out = insert_text(&doc, &sel, "ipp").unwrap();
        assert_eq!(out.text(&[0, 0]).unwrap(), &Text::with_marks("hippo", [Mark::Bold]));
    }

    #[test]
    fn newlines_are_kept_only_in_code() {
        let para = Document::from_blocks([Block::paragraph("")]);
        let out = insert_text(&para, &caret(&[0, 0], 0), "a\nb").unwrap();
        assert_eq!(out.text(&[0, 0]).unwrap().text, "a b");

        let code = Document::from_blocks([Block::with_text(BlockKind::CodeBlock, "")]);
        let out = insert_text(&code, &caret(&[0, 0], 0), "a\r\nb").unwrap();
        assert_eq!(out.text(&[0, 0]).unwrap().text, "a\nb");
    }

    #[test]
    fn spanning_leaves_is_rejected() {
        let doc = Document::from_blocks([Block::paragraph("a"), Block::paragraph("b")]);
        assert_eq!(
            insert_text(&doc, &Selection::all(&doc), "x"),
            Err(EditError::NonContiguousRange)
        );
    }
}
