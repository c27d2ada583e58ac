use super::{Layout, Tile};
use crate::common::config::InnerGaps;
use crate::sys::geometry::{Rect, Round};
use crate::sys::window::WindowId;

/// Alternating half-splits: each tile takes half of the remaining area,
/// splitting vertically, then horizontally, and so on; the last tile keeps
/// the remainder.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralLayout {
    gaps: InnerGaps,
}

impl SpiralLayout {
    pub fn new(gaps: InnerGaps) -> Self { Self { gaps } }
}

impl Layout for SpiralLayout {
    fn apply(&self, tiles: &[Tile], within: Rect, _screen: Rect) -> Vec<(WindowId, Rect)> {
        let mut frames = Vec::with_capacity(tiles.len());
        let mut rest = within;
        for (i, tile) in tiles.iter().enumerate() {
            if i == tiles.len() - 1 {
                frames.push((tile.id, rest.round()));
                break;
            }
            if i % 2 == 0 {
                let w = ((rest.w - self.gaps.horizontal) / 2.0).max(0.0);
                frames.push((tile.id, Rect::new(rest.x, rest.y, w, rest.h).round()));
                let taken = w + self.gaps.horizontal;
                rest = Rect::new(rest.x + taken, rest.y, rest.w - taken, rest.h);
            } else {
                let h = ((rest.h - self.gaps.vertical) / 2.0).max(0.0);
                frames.push((tile.id, Rect::new(rest.x, rest.y, rest.w, h).round()));
                let taken = h + self.gaps.vertical;
                rest = Rect::new(rest.x, rest.y + taken, rest.w, rest.h - taken);
            }
        }
        frames
    }
}
