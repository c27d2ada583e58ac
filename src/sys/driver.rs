use std::num::NonZeroU64;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sys::geometry::Rect;
use crate::sys::window::{WindowId, WindowState};

/// Identity of a display context (a screen/desktop pair), assigned by the
/// host. The engine only ever uses it as a key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ContextId(NonZeroU64);

impl ContextId {
    pub fn new(id: u64) -> ContextId { ContextId(NonZeroU64::new(id).unwrap()) }

    pub fn get(&self) -> u64 { self.0.get() }
}

/// A corrective commit scheduled through [`Driver::schedule`].
///
/// Carries the window id and the state the window must still be in when the
/// timer fires; [`run_deferred`] drops the task when the check fails, since
/// any other engine operation may have run in the interim.
///
/// [`run_deferred`]: crate::layout_engine::TilingEngine::run_deferred
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeferredCommit {
    pub window: WindowId,
    pub expected: WindowState,
}

impl DeferredCommit {
    pub(crate) fn still_tiled(window: WindowId) -> DeferredCommit {
        DeferredCommit { window, expected: WindowState::Tile }
    }
}

/// The host environment the engine runs against.
///
/// Every call is synchronous; `schedule` is the only way work leaves the
/// current call stack, and the host delivers it back by calling
/// `TilingEngine::run_deferred` after the delay on the same event queue.
pub trait Driver {
    /// Visits the context currently shown on each screen, once per screen.
    fn for_each_context(&self, visit: &mut dyn FnMut(ContextId));

    /// Usable screen rectangle for `ctx`, after host chrome (panels, docks)
    /// and before gap insets.
    fn working_area(&self, ctx: ContextId) -> Rect;

    fn current_context(&self) -> ContextId;

    /// The window holding focus, if any.
    fn current_window(&self) -> Option<WindowId>;

    fn focus_window(&mut self, window: WindowId);

    /// Schedules `task` to be handed back to the engine after `delay`.
    fn schedule(&mut self, delay: Duration, task: DeferredCommit);
}
