use std::collections::BTreeSet;

/// Inline formatting applied to a [`Text`] leaf.
///
/// The declaration order is the serialization precedence: `Code` wraps the
/// text first and `Underline` ends up outermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mark {
    Code,
    Bold,
    Italic,
    Strikethrough,
    Underline,
}

impl Mark {
    pub const ALL: [Mark; 5] = [
        Mark::Code,
        Mark::Bold,
        Mark::Italic,
        Mark::Strikethrough,
        Mark::Underline,
    ];

    /// Bit used when a mark set has to be packed into a memo key.
    pub(crate) fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The set of marks carried by a text leaf.
pub type Marks = BTreeSet<Mark>;

/// The kind of a [`Block`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    BlockQuote,
    CodeBlock,
    BulletedList,
    NumberedList,
    ListItem,
    Link,
}

impl BlockKind {
    /// BulletedList or NumberedList.
    pub fn is_list(self) -> bool {
        matches!(self, BlockKind::BulletedList | BlockKind::NumberedList)
    }

    /// Blocks whose children are inline content (text and links).
    pub fn holds_inline(self) -> bool {
        matches!(
            self,
            BlockKind::Paragraph
                | BlockKind::Heading1
                | BlockKind::Heading2
                | BlockKind::BlockQuote
                | BlockKind::CodeBlock
                | BlockKind::ListItem
        )
    }

    /// Kinds that `toggle_block` accepts.
    pub fn is_toggleable(self) -> bool {
        !matches!(self, BlockKind::ListItem | BlockKind::Link)
    }
}

/// A run of text with uniform formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    pub text: String,
    pub marks: Marks,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::new(),
        }
    }

    pub fn with_marks(text: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Self {
        Self {
            text: text.into(),
            marks: marks.into_iter().collect(),
        }
    }

    pub fn has(&self, mark: Mark) -> bool {
        self.marks.contains(&mark)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A container node: a paragraph-like block, a list, a list item or a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub children: Vec<Node>,
    /// Destination of a `Link`; `None` for every other kind.
    pub url: Option<String>,
}

impl Block {
    pub fn new(kind: BlockKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            children,
            url: None,
        }
    }

    /// A block holding a single unformatted text leaf.
    pub fn with_text(kind: BlockKind, text: impl Into<String>) -> Self {
        Self::new(kind, vec![Node::Text(Text::new(text))])
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::with_text(BlockKind::Paragraph, text)
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: BlockKind::Link,
            children,
            url: Some(url.into()),
        }
    }

    /// Concatenated text of every leaf below this block.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// True when the block has no inline content at all (nested lists aside).
    pub fn has_no_text(&self) -> bool {
        self.children.iter().all(|child| match child {
            Node::Text(t) => t.is_empty(),
            Node::Block(b) => b.kind.is_list() || b.has_no_text(),
        })
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(&t.text),
            Node::Block(b) => collect_text(&b.children, out),
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(Text),
    Block(Block),
}

impl Node {
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(t) => Some(t),
            Node::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Node::Block(b) => Some(b),
            Node::Text(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::Block(b) if b.kind.is_list())
    }

    /// Text leaves and links: the content of a text block.
    pub fn is_inline(&self) -> bool {
        match self {
            Node::Text(_) => true,
            Node::Block(b) => b.kind == BlockKind::Link,
        }
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}
