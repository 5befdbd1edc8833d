//! Coordinate types shared by the runtime, the gesture tracker and the views.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
