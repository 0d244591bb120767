use crate::model::Mark;

/// Opening and closing syntax of a paired inline mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    pub mark: Mark,
    pub open: &'static str,
    pub close: &'static str,
}

impl Delimiter {
    pub const UNDERLINE: Delimiter = Delimiter {
        mark: Mark::Underline,
        open: "<u>",
        close: "</u>",
    };
    pub const STRIKETHROUGH: Delimiter = Delimiter {
        mark: Mark::Strikethrough,
        open: "~~",
        close: "~~",
    };
    pub const BOLD: Delimiter = Delimiter {
        mark: Mark::Bold,
        open: "**",
        close: "**",
    };
    pub const ITALIC: Delimiter = Delimiter {
        mark: Mark::Italic,
        open: "*",
        close: "*",
    };
    pub const CODE: Delimiter = Delimiter {
        mark: Mark::Code,
        open: "`",
        close: "`",
    };

    /// Paired delimiters in the order the parser tries them; `**` must come
    /// before `*`.
    pub const PAIRED: [Delimiter; 4] = [
        Self::UNDERLINE,
        Self::STRIKETHROUGH,
        Self::BOLD,
        Self::ITALIC,
    ];

    pub fn for_mark(mark: Mark) -> Delimiter {
        match mark {
            Mark::Code => Self::CODE,
            Mark::Bold => Self::BOLD,
            Mark::Italic => Self::ITALIC,
            Mark::Strikethrough => Self::STRIKETHROUGH,
            Mark::Underline => Self::UNDERLINE,
        }
    }
}
