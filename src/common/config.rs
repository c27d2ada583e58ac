use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::collections::HashMap;
use crate::layout_engine::{LayoutName, UserInput};

pub fn config_file() -> PathBuf { dirs::home_dir().unwrap().join(".quilt.toml") }

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    settings: Settings,
    /// Key bindings, host key string to engine input. The key side is
    /// opaque to the engine; the host parses it into whatever its hotkey
    /// system wants.
    #[serde(default)]
    keys: HashMap<String, UserInput>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Config {
    pub settings: Settings,
    pub keys: HashMap<String, UserInput>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// A sole tile on a context covers the full working area, gaps and
    /// layout bypassed.
    #[serde(default = "yes")]
    pub maximize_sole_tile: bool,
    /// Strip borders from tiled windows.
    #[serde(default)]
    pub borderless_tiles: bool,
    #[serde(default)]
    pub layout: LayoutSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            maximize_sole_tile: true,
            borderless_tiles: false,
            layout: LayoutSettings::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Strategy newly seen contexts start with.
    #[serde(default)]
    pub default_layout: LayoutName,
    /// Gap configuration for window spacing
    #[serde(default)]
    pub gaps: GapSettings,
}

/// Gap configuration for window spacing
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct GapSettings {
    /// Outer gaps (space between windows and screen edges)
    #[serde(default)]
    pub outer: OuterGaps,
    /// Inner gaps (space between windows)
    #[serde(default)]
    pub inner: InnerGaps,
}

/// Outer gap configuration (space between windows and screen edges)
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct OuterGaps {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub right: f64,
}

/// Inner gap configuration (space between windows)
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct InnerGaps {
    /// Horizontal gap between windows
    #[serde(default)]
    pub horizontal: f64,
    /// Vertical gap between windows
    #[serde(default)]
    pub vertical: f64,
}

impl Settings {
    pub fn validate(&self) -> Vec<String> { self.layout.validate() }

    pub fn auto_fix_values(&mut self) -> usize { self.layout.auto_fix_values() }
}

impl LayoutSettings {
    pub fn validate(&self) -> Vec<String> { self.gaps.validate() }

    pub fn auto_fix_values(&mut self) -> usize { self.gaps.auto_fix_values() }
}

impl GapSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        issues.extend(self.outer.validate());
        issues.extend(self.inner.validate());
        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        self.outer.auto_fix_values() + self.inner.auto_fix_values()
    }
}

impl OuterGaps {
    /// Validates outer gap values and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (side, value) in [
            ("top", self.top),
            ("left", self.left),
            ("bottom", self.bottom),
            ("right", self.right),
        ] {
            if value < 0.0 {
                issues.push(format!("outer.{} gap must be non-negative, got {}", side, value));
            }
        }
        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;
        for value in [&mut self.top, &mut self.left, &mut self.bottom, &mut self.right] {
            if *value < 0.0 {
                *value = 0.0;
                fixes += 1;
            }
        }
        fixes
    }
}

impl InnerGaps {
    /// Validates inner gap values and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.horizontal < 0.0 {
            issues.push(format!(
                "inner.horizontal gap must be non-negative, got {}",
                self.horizontal
            ));
        }
        if self.vertical < 0.0 {
            issues.push(format!(
                "inner.vertical gap must be non-negative, got {}",
                self.vertical
            ));
        }
        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;
        if self.horizontal < 0.0 {
            self.horizontal = 0.0;
            fixes += 1;
        }
        if self.vertical < 0.0 {
            self.vertical = 0.0;
            fixes += 1;
        }
        fixes
    }
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    pub fn default() -> Config { Self::parse(include_str!("../../quilt.default.toml")).unwrap() }

    pub fn parse(buf: &str) -> anyhow::Result<Config> {
        let c: ConfigFile = toml::from_str(buf)?;
        Ok(Config { settings: c.settings, keys: c.keys })
    }

    /// Validates the configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    /// Attempts to fix configuration values automatically.
    /// Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize { self.settings.auto_fix_values() }
}

fn yes() -> bool { true }
