use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::sys::driver::ContextId;
use crate::sys::geometry::Rect;

/// Identity of a managed window, assigned by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct WindowId(NonZeroU64);

impl WindowId {
    pub fn new(id: u64) -> WindowId { WindowId(NonZeroU64::new(id).unwrap()) }

    pub fn get(&self) -> u64 { self.0.get() }
}

/// How a managed window participates in arrangement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    /// Participates in the active layout's automatic geometry assignment.
    Tile,
    /// Became tileable since the last arrangement pass; promoted to `Tile`
    /// the next time its context is arranged.
    FreeTile,
    /// Excluded from tiling; keeps whatever geometry it has.
    Float,
}

/// The engine's view of an on-screen window.
///
/// Implemented by the host's window objects. The engine mutates state, the
/// target frame, and the borderless flag; `commit` flushes whatever is
/// pending out to the host. Reads of `actual_frame` return the geometry the
/// host last observed, which can lag behind the target.
pub trait Window {
    fn id(&self) -> WindowId;

    /// The display context this window belongs to.
    fn context(&self) -> ContextId;

    /// Whether the window is currently visible in `ctx`.
    fn visible_in(&self, ctx: ContextId) -> bool;

    fn state(&self) -> WindowState;
    fn set_state(&mut self, state: WindowState);

    /// Target frame, pending until the next `commit`.
    fn frame(&self) -> Rect;
    fn set_frame(&mut self, frame: Rect);

    /// The geometry the host last observed for this window.
    fn actual_frame(&self) -> Rect;

    fn set_borderless(&mut self, borderless: bool);

    /// Windows flagged ignored are never managed.
    fn ignored(&self) -> bool;

    /// Whether the window asked to start out floating.
    fn prefers_float(&self) -> bool;

    /// Flushes pending frame and border changes to the host.
    fn commit(&mut self);
}
