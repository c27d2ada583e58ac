pub mod engine;
pub mod registry;
pub mod systems;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{TilingEngine, UserInput};
pub use registry::{LayoutName, LayoutRegistry, UnknownLayout};
pub use systems::{Layout, LayoutKind, MasterStackLayout, MonocleLayout, SpiralLayout, Tile};
