use tracing::trace;

use super::{Layout, Tile};
use crate::common::config::InnerGaps;
use crate::layout_engine::engine::UserInput;
use crate::sys::geometry::{Rect, Round};
use crate::sys::window::WindowId;

const MIN_RATIO: f64 = 0.1;
const RATIO_STEP: f64 = 0.05;

fn default_ratio() -> f64 { 0.55 }

/// Master pane on the left, remaining tiles stacked in a column on the
/// right. The first tile is the master.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterStackLayout {
    ratio: f64,
    gaps: InnerGaps,
}

impl MasterStackLayout {
    pub fn new(gaps: InnerGaps) -> Self { Self { ratio: default_ratio(), gaps } }

    pub fn ratio(&self) -> f64 { self.ratio }

    fn set_ratio(&mut self, ratio: f64) { self.ratio = ratio.clamp(MIN_RATIO, 1.0 - MIN_RATIO); }
}

impl Layout for MasterStackLayout {
    fn apply(&self, tiles: &[Tile], within: Rect, _screen: Rect) -> Vec<(WindowId, Rect)> {
        match tiles.len() {
            0 => Vec::new(),
            1 => vec![(tiles[0].id, within.round())],
            n => {
                let usable_w = (within.w - self.gaps.horizontal).max(0.0);
                let master_w = usable_w * self.ratio;
                let stack_w = usable_w - master_w;
                let stack_x = within.x + master_w + self.gaps.horizontal;

                let mut frames = Vec::with_capacity(n);
                frames.push((
                    tiles[0].id,
                    Rect::new(within.x, within.y, master_w, within.h).round(),
                ));

                let count = n - 1;
                let gap_total = (count - 1) as f64 * self.gaps.vertical;
                let each_h = ((within.h - gap_total) / count as f64).max(0.0);
                let mut y = within.y;
                for tile in &tiles[1..] {
                    frames.push((tile.id, Rect::new(stack_x, y, stack_w, each_h).round()));
                    y += each_h + self.gaps.vertical;
                }
                frames
            }
        }
    }

    fn supports_adjust(&self) -> bool { true }

    /// Absorbs a manual resize: the basis window's observed width becomes
    /// the new master ratio (inverted when the basis sits in the stack).
    fn adjust(&mut self, area: Rect, tiles: &[Tile], basis: WindowId) {
        if tiles.len() < 2 {
            return;
        }
        let Some(pos) = tiles.iter().position(|t| t.id == basis) else {
            return;
        };
        let usable_w = area.w - self.gaps.horizontal;
        if usable_w <= 0.0 {
            return;
        }
        let observed = tiles[pos].frame.w / usable_w;
        let ratio = if pos == 0 { observed } else { 1.0 - observed };
        self.set_ratio(ratio);
        trace!("master ratio adjusted to {:.3}", self.ratio);
    }

    fn intercept(&mut self, input: UserInput) -> bool {
        match input {
            UserInput::ExpandMaster => {
                self.set_ratio(self.ratio + RATIO_STEP);
                true
            }
            UserInput::ShrinkMaster => {
                self.set_ratio(self.ratio - RATIO_STEP);
                true
            }
            _ => false,
        }
    }
}
