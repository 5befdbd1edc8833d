//! Time subsystem.
//!
//! - one `FrameClock` per window, ticked once per redraw
//! - `FrameTime` snapshots are handed to the app through `FrameCtx`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
