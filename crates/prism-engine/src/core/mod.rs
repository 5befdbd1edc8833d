//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the
//! application shell: lifecycle callbacks, gesture delivery and the
//! per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, MountCtx, WindowCtx};
