use crate::model::BlockKind;

/// Failure of a document edit.
///
/// Every variant is recoverable: the document passed to the failing call is
/// left untouched, so the caller can re-derive its selection and retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("path {0:?} does not resolve to a node")]
    InvalidPath(Vec<usize>),
    #[error("paths do not name a contiguous run of siblings")]
    NonContiguousRange,
    #[error("node at {0:?} is not a text leaf")]
    NotATextNode(Vec<usize>),
    #[error("node at {0:?} is not a block")]
    NotABlockNode(Vec<usize>),
    #[error("{0:?} cannot be toggled directly")]
    UnsupportedBlockKind(BlockKind),
    #[error("adding a link needs a URL")]
    MissingLinkUrl,
}

pub type EditResult<T> = Result<T, EditError>;
