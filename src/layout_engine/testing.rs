//! Fake driver and window implementations for engine tests.

use std::time::Duration;

use crate::common::collections::HashMap;
use crate::sys::driver::{ContextId, DeferredCommit, Driver};
use crate::sys::geometry::Rect;
use crate::sys::window::{Window, WindowId, WindowState};

pub(crate) struct FakeWindow {
    pub(crate) id: WindowId,
    pub(crate) context: ContextId,
    pub(crate) state: WindowState,
    pub(crate) frame: Rect,
    pub(crate) actual: Rect,
    pub(crate) borderless: bool,
    pub(crate) ignored: bool,
    pub(crate) prefers_float: bool,
    pub(crate) shown: bool,
    pub(crate) commits: usize,
}

impl FakeWindow {
    pub(crate) fn tiled(id: u64, context: ContextId) -> FakeWindow {
        FakeWindow {
            id: WindowId::new(id),
            context,
            state: WindowState::Tile,
            frame: Rect::default(),
            actual: Rect::default(),
            borderless: false,
            ignored: false,
            prefers_float: false,
            shown: true,
            commits: 0,
        }
    }
}

impl Window for FakeWindow {
    fn id(&self) -> WindowId { self.id }

    fn context(&self) -> ContextId { self.context }

    fn visible_in(&self, ctx: ContextId) -> bool { self.shown && ctx == self.context }

    fn state(&self) -> WindowState { self.state }

    fn set_state(&mut self, state: WindowState) { self.state = state; }

    fn frame(&self) -> Rect { self.frame }

    fn set_frame(&mut self, frame: Rect) { self.frame = frame; }

    fn actual_frame(&self) -> Rect { self.actual }

    fn set_borderless(&mut self, borderless: bool) { self.borderless = borderless; }

    fn ignored(&self) -> bool { self.ignored }

    fn prefers_float(&self) -> bool { self.prefers_float }

    fn commit(&mut self) {
        // The fake host applies frames instantly.
        self.actual = self.frame;
        self.commits += 1;
    }
}

pub(crate) struct FakeDriver {
    pub(crate) contexts: Vec<ContextId>,
    pub(crate) areas: HashMap<ContextId, Rect>,
    pub(crate) current_context: ContextId,
    pub(crate) focused: Option<WindowId>,
    pub(crate) scheduled: Vec<(Duration, DeferredCommit)>,
}

impl FakeDriver {
    /// One context showing a 1280x720 working area at the origin.
    pub(crate) fn single() -> (FakeDriver, ContextId) {
        let ctx = ContextId::new(1);
        let mut areas = HashMap::default();
        areas.insert(ctx, Rect::new(0.0, 0.0, 1280.0, 720.0));
        let driver = FakeDriver {
            contexts: vec![ctx],
            areas,
            current_context: ctx,
            focused: None,
            scheduled: Vec::new(),
        };
        (driver, ctx)
    }
}

impl Driver for FakeDriver {
    fn for_each_context(&self, visit: &mut dyn FnMut(ContextId)) {
        for &ctx in &self.contexts {
            visit(ctx);
        }
    }

    fn working_area(&self, ctx: ContextId) -> Rect {
        self.areas.get(&ctx).copied().unwrap_or_default()
    }

    fn current_context(&self) -> ContextId { self.current_context }

    fn current_window(&self) -> Option<WindowId> { self.focused }

    fn focus_window(&mut self, window: WindowId) { self.focused = Some(window); }

    fn schedule(&mut self, delay: Duration, task: DeferredCommit) {
        self.scheduled.push((delay, task));
    }
}
