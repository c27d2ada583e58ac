//! The arrangement engine owns the ordered window list and keeps on-screen
//! geometry coherent with it.
//!
//! Hosts feed it window lifecycle events (manage/unmanage), user commands,
//! and deferred timer callbacks; the engine mutates the list, asks the
//! active layout for frames, and commits them back out through the window
//! handles. Every operation runs to completion synchronously; nothing here
//! suspends or runs concurrently.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::{debug, trace, warn};

use crate::common::config::Settings;
use crate::layout_engine::registry::{LayoutName, LayoutRegistry};
use crate::layout_engine::systems::{Layout, Tile};
use crate::sys::driver::{ContextId, DeferredCommit, Driver};
use crate::sys::window::{Window, WindowId, WindowState};

/// Delay before re-asserting the frame of a tiled window whose observed
/// geometry disagrees with its target.
const ENFORCE_DELAY: Duration = Duration::from_millis(10);

/// User commands the engine understands. Hosts typically deserialize these
/// straight out of their key-binding tables.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserInput {
    /// Focus the previous window in visible order.
    FocusUp,
    /// Focus the next window in visible order.
    FocusDown,
    /// Swap the current window with its predecessor in visible order.
    ShiftUp,
    /// Swap the current window with its successor in visible order.
    ShiftDown,
    /// Move the current window to the head of the list.
    SetMaster,
    /// Float a tiled window, or re-tile a floating one.
    ToggleFloat,
    /// Advance the current context to the next layout strategy.
    CycleLayout,
    /// Install a named layout on the current context.
    SetLayout(LayoutName),
    /// Grow the master area, for layouts that have one.
    ExpandMaster,
    /// Shrink the master area, for layouts that have one.
    ShrinkMaster,
}

/// The tiling-arrangement engine.
///
/// Owns the window list; list order is the source of truth for master
/// position and focus/swap adjacency, and index 0 of a context's visible
/// view is that context's master.
pub struct TilingEngine<D, W> {
    driver: D,
    registry: LayoutRegistry,
    settings: Settings,
    windows: Vec<W>,
}

impl<D: Driver, W: Window> TilingEngine<D, W> {
    pub fn new(driver: D, settings: Settings) -> Self {
        let registry = LayoutRegistry::new(settings.layout.clone());
        Self {
            driver,
            registry,
            settings,
            windows: Vec::new(),
        }
    }

    pub fn driver(&self) -> &D { &self.driver }

    pub fn driver_mut(&mut self) -> &mut D { &mut self.driver }

    pub fn windows(&self) -> &[W] { &self.windows }

    /// Replaces the configuration snapshot; active layout instances are
    /// rebuilt with the new layout settings.
    pub fn update_settings(&mut self, settings: Settings) {
        self.registry.update_settings(settings.layout.clone());
        self.settings = settings;
    }

    /// Starts managing `window`. Windows flagged ignored never enter the
    /// list; floating-by-request windows start out `Float`, everything else
    /// `Tile`.
    pub fn manage_client(&mut self, mut window: W) {
        if window.ignored() {
            trace!("window {} is ignored, not managing", window.id().get());
            return;
        }
        // A second manage call for the same window is a host bug; keep the
        // existing entry rather than duplicating it.
        if self.index_of(window.id()).is_some() {
            warn!("window {} is already managed, dropping duplicate", window.id().get());
            return;
        }
        let state = if window.prefers_float() { WindowState::Float } else { WindowState::Tile };
        debug!("managing window {} as {state:?}", window.id().get());
        window.set_state(state);
        self.windows.push(window);
    }

    /// Stops managing the window; a no-op when it was never managed.
    pub fn unmanage_client(&mut self, id: WindowId) {
        if let Some(idx) = self.index_of(id) {
            debug!("unmanaging window {}", id.get());
            self.windows.remove(idx);
        }
    }

    /// Re-tiles every context the driver reports.
    pub fn arrange(&mut self) {
        let mut contexts = Vec::new();
        self.driver.for_each_context(&mut |ctx| contexts.push(ctx));
        for ctx in contexts {
            self.arrange_context(ctx);
        }
    }

    /// Computes and commits geometry for every window visible in `ctx`.
    ///
    /// Arrangement is a pure function of engine state: calling this twice
    /// without intervening changes produces identical frames.
    pub fn arrange_context(&mut self, ctx: ContextId) {
        let screen = self.driver.working_area(ctx);
        let gaps = &self.settings.layout.gaps.outer;
        let within = screen.inset(gaps.left, gaps.top, gaps.right, gaps.bottom);

        let visible: Vec<usize> = (0..self.windows.len())
            .filter(|&i| self.windows[i].visible_in(ctx))
            .collect();
        let tiles: Vec<usize> = visible
            .iter()
            .copied()
            .filter(|&i| {
                matches!(self.windows[i].state(), WindowState::Tile | WindowState::FreeTile)
            })
            .collect();
        trace!("arranging context {}: {} visible, {} tiled", ctx.get(), visible.len(), tiles.len());

        for &i in &tiles {
            let window = &mut self.windows[i];
            if window.state() == WindowState::FreeTile {
                window.set_state(WindowState::Tile);
            }
            window.set_borderless(self.settings.borderless_tiles);
        }

        if self.settings.maximize_sole_tile && tiles.len() == 1 {
            // A sole tile covers the whole working area; gaps and the
            // layout are bypassed.
            let window = &mut self.windows[tiles[0]];
            window.set_borderless(true);
            window.set_frame(screen);
        } else if !tiles.is_empty() {
            let snapshot: Vec<Tile> = tiles
                .iter()
                .map(|&i| Tile {
                    id: self.windows[i].id(),
                    frame: self.windows[i].actual_frame(),
                })
                .collect();
            let frames = self.registry.current(ctx).apply(&snapshot, within, screen);
            for (id, frame) in frames {
                match self.index_of(id) {
                    Some(idx) => self.windows[idx].set_frame(frame),
                    None => warn!("layout assigned a frame to unmanaged window {}", id.get()),
                }
            }
        }

        // Commit every visible window, tiled or not, so pending flag
        // changes are flushed consistently.
        for &i in &visible {
            self.windows[i].commit();
        }
    }

    /// Gives the active layout a chance to absorb a manual resize of
    /// `basis`, e.g. by recomputing a split ratio. No geometry is committed
    /// here.
    pub fn adjust_layout(&mut self, basis: WindowId) {
        let Some(idx) = self.index_of(basis) else { return };
        let ctx = self.windows[idx].context();
        if !self.registry.current(ctx).supports_adjust() {
            return;
        }
        let screen = self.driver.working_area(ctx);
        let gaps = &self.settings.layout.gaps.outer;
        let within = screen.inset(gaps.left, gaps.top, gaps.right, gaps.bottom);
        let tiles: Vec<Tile> = self
            .windows
            .iter()
            .filter(|w| {
                w.visible_in(ctx)
                    && matches!(w.state(), WindowState::Tile | WindowState::FreeTile)
            })
            .map(|w| Tile { id: w.id(), frame: w.actual_frame() })
            .collect();
        self.registry.current(ctx).adjust(within, &tiles, basis);
    }

    /// Schedules a corrective re-commit when a tiled window's observed
    /// frame has drifted from its target.
    pub fn enforce_client_size(&mut self, id: WindowId) {
        let Some(idx) = self.index_of(id) else { return };
        let window = &self.windows[idx];
        if window.state() != WindowState::Tile || window.actual_frame() == window.frame() {
            return;
        }
        trace!("window {} drifted from its target frame, scheduling re-commit", id.get());
        self.driver.schedule(ENFORCE_DELAY, DeferredCommit::still_tiled(id));
    }

    /// Runs a [`DeferredCommit`] previously handed to the driver.
    ///
    /// Declines when the window is gone or no longer in the expected state;
    /// any other engine operation may have run since the task was
    /// scheduled, and a stale commit must not fire.
    pub fn run_deferred(&mut self, task: DeferredCommit) {
        let Some(idx) = self.index_of(task.window) else { return };
        let window = &mut self.windows[idx];
        if window.state() != task.expected {
            trace!("dropping deferred commit for window {}, state changed", task.window.get());
            return;
        }
        window.commit();
    }

    /// Entry point for user commands. The active layout gets the first
    /// look; when it claims the input the engine only re-arranges.
    pub fn handle_input(&mut self, input: UserInput) {
        debug!("user input: {input}");
        let ctx = self.driver.current_context();
        if self.registry.current(ctx).intercept(input) {
            self.arrange();
            return;
        }
        match input {
            UserInput::FocusUp => self.move_focus(-1),
            UserInput::FocusDown => self.move_focus(1),
            UserInput::ShiftUp => self.move_tile(-1),
            UserInput::ShiftDown => self.move_tile(1),
            UserInput::SetMaster => {
                if let Some(current) = self.driver.current_window() {
                    self.set_master(current);
                }
            }
            UserInput::ToggleFloat => self.toggle_float(),
            UserInput::CycleLayout => self.cycle_layout(),
            UserInput::SetLayout(name) => self.registry.set(ctx, name),
            // Master-area inputs mean nothing to the engine itself; only
            // layouts that intercept them do.
            UserInput::ExpandMaster | UserInput::ShrinkMaster => {}
        }
        // Any input may have changed what should be on screen.
        self.arrange();
    }

    /// Moves focus `step` windows through the cyclic visible order;
    /// focuses the master when nothing currently has focus.
    pub fn move_focus(&mut self, step: isize) {
        if step == 0 {
            return;
        }
        let current = self.driver.current_window();
        let ctx = current
            .and_then(|id| self.index_of(id))
            .map(|idx| self.windows[idx].context())
            .unwrap_or_else(|| self.driver.current_context());
        let visible = self.visible_ids(ctx);
        if visible.is_empty() {
            return;
        }
        let target = match current.and_then(|id| visible.iter().position(|v| *v == id)) {
            None => visible[0],
            Some(idx) => visible[cyclic(idx, step, visible.len())],
        };
        self.driver.focus_window(target);
    }

    /// Swaps the current window with the one `step` places away in visible
    /// order. The swap is positional, so windows in between keep their
    /// places.
    pub fn move_tile(&mut self, step: isize) {
        if step == 0 {
            return;
        }
        let Some(current) = self.driver.current_window() else { return };
        let Some(idx) = self.index_of(current) else { return };
        let ctx = self.windows[idx].context();
        let visible = self.visible_ids(ctx);
        if visible.len() < 2 {
            return;
        }
        let Some(src) = visible.iter().position(|v| *v == current) else { return };
        let dst = cyclic(src, step, visible.len());
        if src == dst {
            return;
        }
        // Resolve both ends back to list positions by id; the visible view
        // is a filtered projection and must not be trusted for indices.
        let (Some(a), Some(b)) = (self.index_of(visible[src]), self.index_of(visible[dst]))
        else {
            return;
        };
        trace!("swapping windows {} and {}", visible[src].get(), visible[dst].get());
        self.windows.swap(a, b);
    }

    /// Moves the window to the front of the list; the windows above its old
    /// position shift down one place.
    pub fn set_master(&mut self, id: WindowId) {
        match self.index_of(id) {
            None | Some(0) => {}
            Some(idx) => {
                debug!("promoting window {} to master", id.get());
                let window = self.windows.remove(idx);
                self.windows.insert(0, window);
            }
        }
    }

    /// Advances the current context to the next layout strategy.
    pub fn cycle_layout(&mut self) {
        let ctx = self.driver.current_context();
        let next = self.registry.cycle(ctx);
        debug!("context {} cycled to layout {next}", ctx.get());
    }

    fn toggle_float(&mut self) {
        let Some(current) = self.driver.current_window() else { return };
        let Some(idx) = self.index_of(current) else { return };
        let window = &mut self.windows[idx];
        // Re-tiling goes through FreeTile so the next arrangement pass sees
        // the window as newly tileable.
        let next = match window.state() {
            WindowState::Float => WindowState::FreeTile,
            WindowState::Tile | WindowState::FreeTile => WindowState::Float,
        };
        debug!("window {} is now {next:?}", current.get());
        window.set_state(next);
    }

    fn visible_ids(&self, ctx: ContextId) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|w| w.visible_in(ctx))
            .map(|w| w.id())
            .collect()
    }

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id() == id)
    }
}

/// `idx + step` wrapped into `0..len`, well-defined for negative steps.
fn cyclic(idx: usize, step: isize, len: usize) -> usize {
    (idx as isize + step).rem_euclid(len as isize) as usize
}
