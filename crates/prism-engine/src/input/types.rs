use std::time::Instant;

use crate::coords::Vec2;

/// Keyboard key identifier.
///
/// Only the keys the shell reacts to are named; everything else maps to
/// `Key::Unknown(u32)` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    R,
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Identifies the source of a pointer stream.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointerId {
    /// Primary mouse button.
    Mouse,
    /// Touch contact, keyed by the platform finger id.
    Touch(u64),
}

/// Pointer lifecycle phase, shared by mouse drags and touch contacts.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Contact lost without a release (touch cancelled, focus lost).
    Cancel,
}

/// Pointer sample in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub phase: PointerPhase,
    pub position: Vec2,
    pub at: Instant,
}

/// Continuous drag gesture, derived from a pointer stream by `GestureTracker`.
///
/// All distances are in logical pixels; velocities in logical pixels per
/// millisecond.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureEvent {
    Start {
        position: Vec2,
    },
    Move {
        /// Displacement since the previous move event.
        delta: Vec2,
        /// Displacement since the gesture started.
        cumulative: Vec2,
        velocity: Vec2,
    },
    End {
        velocity: Vec2,
    },
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),

    Key {
        key: Key,
        state: KeyState,
        repeat: bool,
    },

    /// Cursor moved without a drag in progress.
    Hover(Vec2),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}
