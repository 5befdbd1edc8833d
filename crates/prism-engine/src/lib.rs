//! Prism engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the demo views: the winit
//! loop, the wgpu device/surface, pointer-to-gesture tracking and the narrow
//! drawing surface the views render through.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
