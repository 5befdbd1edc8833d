//! Rendering boundary between the views and the GPU.
//!
//! Views draw through [`DrawSurface`], which exposes only clear, uniform
//! upload, draw and present. [`GpuProgram`] is the wgpu implementation; a view
//! holds it in a [`ContextSlot`] that is filled once on mount and read on every
//! frame.

mod program;
mod slot;
mod surface;

pub use program::{GpuProgram, ProgramDesc, VertexSource};
pub use slot::ContextSlot;
pub use surface::DrawSurface;
