//! Host-facing seams: the geometry value type and the driver/window
//! contracts the engine is embedded against.

pub mod driver;
pub mod geometry;
pub mod window;
