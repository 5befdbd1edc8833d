//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the demo window, wires them to the GPU
//! layer and drives the app's mount / input / frame / unmount lifecycle.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
