/// ATX heading with owned marker constants. Only the first two levels exist
/// in the document model.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 2;

    /// The marker run for a heading level, e.g. `##` for level 2.
    pub fn marker(level: usize) -> String {
        Self::MARKER.to_string().repeat(level)
    }
}
