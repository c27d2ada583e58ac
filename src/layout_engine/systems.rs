use enum_dispatch::enum_dispatch;

use crate::layout_engine::engine::UserInput;
use crate::sys::geometry::Rect;
use crate::sys::window::WindowId;

/// Snapshot of a tiled window handed to a layout strategy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tile {
    pub id: WindowId,
    /// The window's observed frame at snapshot time.
    pub frame: Rect,
}

/// A layout strategy: turns a set of tiles and an area into frames.
///
/// `apply` is mandatory. The two optional capabilities are declared
/// explicitly: `adjust` only runs when `supports_adjust` says so, and
/// `intercept` lets a strategy claim a user input before the engine's own
/// dispatch sees it.
#[enum_dispatch]
pub trait Layout {
    /// Assigns a frame to every tile within `within`, in tile order.
    /// `screen` is the full pre-gap working area, for strategies that pin
    /// something to the screen edge.
    fn apply(&self, tiles: &[Tile], within: Rect, screen: Rect) -> Vec<(WindowId, Rect)>;

    /// Whether [`Layout::adjust`] does anything for this strategy.
    fn supports_adjust(&self) -> bool { false }

    /// Re-derives internal proportions from the observed frame of `basis`,
    /// typically after the user resized a tiled window by hand.
    fn adjust(&mut self, _area: Rect, _tiles: &[Tile], _basis: WindowId) {}

    /// Offers `input` to the strategy. Returns true when the strategy
    /// claimed it; the engine then only re-arranges.
    fn intercept(&mut self, _input: UserInput) -> bool { false }
}

mod master_stack;
pub use master_stack::MasterStackLayout;
mod monocle;
pub use monocle::MonocleLayout;
mod spiral;
pub use spiral::SpiralLayout;

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch(Layout)]
pub enum LayoutKind {
    MasterStack(MasterStackLayout),
    Spiral(SpiralLayout),
    Monocle(MonocleLayout),
}
