//! Touch-driven demo views.
//!
//! `gesture` maps drag deltas onto a handful of transform parameters; `views`
//! turns those parameters into frames through the engine's `DrawSurface`;
//! `demo` picks one view and owns its GPU program.

pub mod demo;
pub mod gesture;
pub mod views;

pub use demo::{Demo, DemoKind};
pub use gesture::{DragTransform, GestureConfig, OrbitState, Status};
pub use views::{DemoView, FrameOutcome};
