use crate::error::{EditError, EditResult};
use crate::model::{BlockKind, Document, Path};

/// A position inside a text leaf: the leaf's path and a byte offset into it.
///
/// Points order by document position because paths compare
/// lexicographically and a parent's path is a prefix of its children's.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: impl Into<Path>, offset: usize) -> Self {
        Self {
            path: path.into(),
            offset,
        }
    }
}

/// Where an operation applies, as reported by the editing surface.
///
/// The anchor is where the selection started and the focus where it ended;
/// either may come first in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// A caret.
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    /// Selects everything from the first to the end of the last text leaf.
    pub fn all(doc: &Document) -> Self {
        let mut leaves = doc.text_leaves();
        let Some((first, _)) = leaves.next() else {
            return Self::collapsed(Point::new(vec![0, 0], 0));
        };
        let end = leaves
            .last()
            .map(|(path, text)| Point::new(path, text.text.len()))
            .unwrap_or_else(|| {
                let len = doc.text(&first).map(|t| t.text.len()).unwrap_or(0);
                Point::new(first.clone(), len)
            });
        Self::new(Point::new(first, 0), end)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Validates both points against `doc` and orders them.
    pub fn resolve(&self, doc: &Document) -> EditResult<Range> {
        check_point(doc, &self.anchor)?;
        check_point(doc, &self.focus)?;
        let (start, end) = if self.anchor <= self.focus {
            (self.anchor.clone(), self.focus.clone())
        } else {
            (self.focus.clone(), self.anchor.clone())
        };
        Ok(Range { start, end })
    }
}

fn check_point(doc: &Document, point: &Point) -> EditResult<()> {
    let text = doc.text(&point.path)?;
    if point.offset > text.text.len() || !text.text.is_char_boundary(point.offset) {
        return Err(EditError::InvalidPath(point.path.clone()));
    }
    Ok(())
}

/// A resolved selection with `start <= end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    pub start: Point,
    pub end: Point,
}

/// The byte range of one text leaf that a [`Range`] covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafSpan {
    pub path: Path,
    pub start: usize,
    pub end: usize,
}

impl LeafSpan {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Range {
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Every text leaf between the two points in document order, including
    /// leaves the range only touches at an edge.
    pub fn leaves(&self, doc: &Document) -> Vec<LeafSpan> {
        doc.text_leaves()
            .filter(|(path, _)| *path >= self.start.path && *path <= self.end.path)
            .map(|(path, text)| {
                let start = if path == self.start.path {
                    self.start.offset
                } else {
                    0
                };
                let end = if path == self.end.path {
                    self.end.offset
                } else {
                    text.text.len()
                };
                LeafSpan { path, start, end }
            })
            .collect()
    }

    /// Leaves with at least one selected character, skipping code blocks
    /// whose text carries no marks.
    pub fn formattable_leaves(&self, doc: &Document) -> Vec<LeafSpan> {
        self.leaves(doc)
            .into_iter()
            .filter(|span| !span.is_empty() && !in_code_block(doc, &span.path))
            .collect()
    }
}

/// True when the leaf at `path` is the content of a code block.
pub(crate) fn in_code_block(doc: &Document, path: &[usize]) -> bool {
    path.split_last()
        .and_then(|(_, parent)| doc.block(parent).ok())
        .is_some_and(|b| b.kind == BlockKind::CodeBlock)
}
