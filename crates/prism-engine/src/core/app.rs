use crate::coords::Viewport;
use crate::input::{GestureEvent, Key};

use super::ctx::{FrameCtx, MountCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the shell.
///
/// Call order for one window: `on_mount` once after the GPU context exists,
/// then any interleaving of `on_gesture` / `on_key` / `on_resize` and
/// `on_frame`, then `on_unmount` once before the GPU context is dropped.
/// Everything runs on the event-loop thread.
pub trait App {
    /// Creates GPU-side resources. Called exactly once.
    fn on_mount(&mut self, ctx: &mut MountCtx<'_, '_>) -> anyhow::Result<()>;

    /// Called for every drag gesture event.
    fn on_gesture(&mut self, gesture: &GestureEvent) {
        let _ = gesture;
    }

    /// Called for fresh key presses (repeats are filtered out).
    fn on_key(&mut self, key: Key) -> AppControl {
        let _ = key;
        AppControl::Continue
    }

    /// Called after the surface has been reconfigured for a new size.
    fn on_resize(&mut self, viewport: Viewport) {
        let _ = viewport;
    }

    /// Whether the runtime should schedule another frame tick.
    ///
    /// Polled after every batch of events; returning `false` lets the loop
    /// sleep until the next input.
    fn wants_frame(&self) -> bool;

    /// Called once per frame tick.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Releases GPU-side resources. No frame is delivered afterwards.
    fn on_unmount(&mut self);
}
