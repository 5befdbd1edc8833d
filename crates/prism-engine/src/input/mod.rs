//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates mouse and touch events into `PointerEvent`s; the
//! `GestureTracker` folds the primary pointer's stream into drag gestures.

mod gesture;
mod state;
mod types;

pub use gesture::GestureTracker;
pub use state::InputState;
pub use types::{
    GestureEvent,
    InputEvent,
    Key,
    KeyState,
    PointerEvent,
    PointerId,
    PointerPhase,
};
