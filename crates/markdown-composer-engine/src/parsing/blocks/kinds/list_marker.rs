use crate::model::BlockKind;

/// List item markers.
pub struct ListMarker;

impl ListMarker {
    /// Bullet characters accepted on input; `-` is the one written out.
    pub const BULLETS: [char; 3] = ['-', '*', '+'];
    pub const BULLET: char = '-';
    /// Suffix after the number of an ordered item.
    pub const ORDERED_SUFFIX: char = '.';

    /// The list kind a marker such as `-` or `12.` introduces.
    pub fn kind(marker: &str) -> BlockKind {
        if marker.ends_with(Self::ORDERED_SUFFIX) {
            BlockKind::NumberedList
        } else {
            BlockKind::BulletedList
        }
    }
}
