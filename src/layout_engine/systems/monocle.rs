use super::{Layout, Tile};
use crate::sys::geometry::{Rect, Round};
use crate::sys::window::WindowId;

/// Every tile occupies the whole layout area; which one is on top is the
/// host's stacking order, not this strategy's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonocleLayout;

impl Layout for MonocleLayout {
    fn apply(&self, tiles: &[Tile], within: Rect, _screen: Rect) -> Vec<(WindowId, Rect)> {
        tiles.iter().map(|tile| (tile.id, within.round())).collect()
    }
}
