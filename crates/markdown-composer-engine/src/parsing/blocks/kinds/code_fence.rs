/// An opening code fence: the fence character and the length of its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    pub ch: char,
    pub len: usize,
}

impl Fence {
    /// A closing fence is a line holding only a run of the same character at
    /// least as long as the opener.
    pub fn closes(&self, line: &str) -> bool {
        let t = line.trim();
        t.len() >= self.len && t.chars().all(|c| c == self.ch)
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: char = '`';
    pub const TILDE: char = '~';
    pub const MIN_LEN: usize = 3;

    /// Detects a fence opener, ignoring any info string after the run. A
    /// backtick fence's info string may not contain backticks, so a line
    /// opening with a long code span is not a fence.
    pub fn open(line: &str) -> Option<Fence> {
        let t = line.trim_start_matches(' ');
        let ch = t
            .chars()
            .next()
            .filter(|c| *c == Self::BACKTICK || *c == Self::TILDE)?;
        let len = t.chars().take_while(|c| *c == ch).count();
        if len < Self::MIN_LEN || (ch == Self::BACKTICK && t[len..].contains(ch)) {
            return None;
        }
        Some(Fence { ch, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        assert_eq!(
            CodeFence::open("```rust"),
            Some(Fence { ch: '`', len: 3 })
        );
    }

    #[test]
    fn detect_tilde_fence() {
        assert_eq!(CodeFence::open("~~~~"), Some(Fence { ch: '~', len: 4 }));
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::open("hello"), None);
        assert_eq!(CodeFence::open("``x``"), None);
        assert_eq!(CodeFence::open("```a``b```"), None);
    }

    #[test]
    fn closes_matching_fence() {
        let fence = Fence { ch: '`', len: 3 };
        assert!(fence.closes("```"));
        assert!(fence.closes("`````  "));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        let fence = Fence { ch: '`', len: 4 };
        assert!(!fence.closes("```"));
        assert!(!fence.closes("~~~~"));
        assert!(!fence.closes("````rust"));
    }
}
