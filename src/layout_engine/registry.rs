use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;
use tracing::debug;

use crate::common::collections::HashMap;
use crate::common::config::LayoutSettings;
use crate::layout_engine::systems::{LayoutKind, MasterStackLayout, MonocleLayout, SpiralLayout};
use crate::sys::driver::ContextId;

/// Names of the shipped layout strategies. Declaration order is cycling
/// order.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayoutName {
    #[default]
    MasterStack,
    Spiral,
    Monocle,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown layout `{0}`")]
pub struct UnknownLayout(pub String);

/// Holds the active layout strategy for each display context.
///
/// Instances are created lazily from the configured default and persist per
/// context, so tuned state (a master ratio, say) survives re-arrangement.
/// Switching strategies installs a fresh instance.
pub struct LayoutRegistry {
    settings: LayoutSettings,
    active: HashMap<ContextId, (LayoutName, LayoutKind)>,
}

impl LayoutRegistry {
    pub fn new(settings: LayoutSettings) -> Self {
        Self { settings, active: HashMap::default() }
    }

    /// Replaces the layout settings and rebuilds every active instance with
    /// them, keeping each context's strategy choice.
    pub fn update_settings(&mut self, settings: LayoutSettings) {
        self.settings = settings;
        for (name, kind) in self.active.values_mut() {
            *kind = instantiate(*name, &self.settings);
        }
    }

    /// The active layout for `ctx`, instantiating the configured default on
    /// first sight of the context.
    pub fn current(&mut self, ctx: ContextId) -> &mut LayoutKind {
        match self.active.entry(ctx) {
            Entry::Occupied(entry) => &mut entry.into_mut().1,
            Entry::Vacant(entry) => {
                let name = self.settings.default_layout;
                &mut entry.insert((name, instantiate(name, &self.settings))).1
            }
        }
    }

    pub fn current_name(&self, ctx: ContextId) -> LayoutName {
        self.active
            .get(&ctx)
            .map(|(name, _)| *name)
            .unwrap_or(self.settings.default_layout)
    }

    /// Installs a fresh instance of `name` on `ctx`.
    pub fn set(&mut self, ctx: ContextId, name: LayoutName) {
        debug!("context {} now uses layout {name}", ctx.get());
        self.active.insert(ctx, (name, instantiate(name, &self.settings)));
    }

    /// Installs the strategy a host named in a string payload.
    pub fn set_by_name(&mut self, ctx: ContextId, name: &str) -> Result<LayoutName, UnknownLayout> {
        let parsed = name.parse::<LayoutName>().map_err(|_| UnknownLayout(name.to_owned()))?;
        self.set(ctx, parsed);
        Ok(parsed)
    }

    /// Advances `ctx` to the next strategy in declaration order, wrapping.
    pub fn cycle(&mut self, ctx: ContextId) -> LayoutName {
        let current = self.current_name(ctx);
        let all: Vec<LayoutName> = LayoutName::iter().collect();
        let idx = all.iter().position(|name| *name == current).unwrap_or(0);
        let next = all[(idx + 1) % all.len()];
        self.set(ctx, next);
        next
    }
}

fn instantiate(name: LayoutName, settings: &LayoutSettings) -> LayoutKind {
    let inner = settings.gaps.inner.clone();
    match name {
        LayoutName::MasterStack => LayoutKind::MasterStack(MasterStackLayout::new(inner)),
        LayoutName::Spiral => LayoutKind::Spiral(SpiralLayout::new(inner)),
        LayoutName::Monocle => LayoutKind::Monocle(MonocleLayout),
    }
}
