//! The demo views.
//!
//! Each view owns its interaction state and a [`ContextSlot`] for its drawing
//! surface. Views are generic over the surface so they can be driven by a
//! recording double in tests and by a [`GpuProgram`] at runtime.
//!
//! [`ContextSlot`]: prism_engine::render::ContextSlot
//! [`GpuProgram`]: prism_engine::render::GpuProgram

pub mod cube;
pub mod spin;
pub mod triangle;
pub mod wave;

use prism_engine::coords::Viewport;
use prism_engine::input::GestureEvent;

use crate::gesture::Status;

pub use cube::{CubeUniforms, CubeView};
pub use spin::SpinView;
pub use triangle::{TriangleUniforms, TriangleView};
pub use wave::{WaveParams, WaveUniforms, WaveView};

/// Result of one frame tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// A frame was drawn and presented.
    Presented,
    /// Nothing changed since the last frame.
    Idle,
    /// The rendering context does not exist yet; the tick is skipped.
    NotReady,
    /// The view has been torn down; no further ticks should be scheduled.
    Stopped,
}

/// Behavior shared by all demo views, independent of the surface type.
pub trait DemoView {
    fn on_gesture(&mut self, gesture: &GestureEvent);

    /// Advances time-based animation by `dt` seconds.
    fn advance(&mut self, dt: f32) {
        let _ = dt;
    }

    /// Whether the next tick would draw something.
    fn frame_due(&self) -> bool;

    fn render(&mut self) -> FrameOutcome;

    fn status(&self) -> Status;

    fn reset(&mut self);

    /// Requests a redraw without changing any state.
    fn invalidate(&mut self);

    /// New viewport; forces a redraw.
    fn resize(&mut self, viewport: Viewport) {
        let _ = viewport;
        self.invalidate();
    }

    /// Whether the rendering context has been installed.
    fn is_ready(&self) -> bool;

    /// False after `unmount`; checked before every tick.
    fn is_live(&self) -> bool;

    /// Releases the rendering context. Subsequent renders return `Stopped`.
    fn unmount(&mut self);
}

#[cfg(test)]
pub(crate) mod recorder {
    use prism_engine::paint::Color;
    use prism_engine::render::DrawSurface;

    /// One recorded surface call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call<U> {
        Clear(Color),
        Upload(U),
        Draw,
        Present,
    }

    /// Surface double that records every call in order.
    #[derive(Debug)]
    pub struct Recorder<U> {
        pub calls: Vec<Call<U>>,
    }

    impl<U> Default for Recorder<U> {
        fn default() -> Self {
            Self { calls: Vec::new() }
        }
    }

    impl<U: Clone> Recorder<U> {
        /// Uniform blocks uploaded so far, in order.
        pub fn uploads(&self) -> Vec<U> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Upload(u) => Some(u.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn presents(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, Call::Present)).count()
        }
    }

    impl<U: Clone> DrawSurface<U> for Recorder<U> {
        fn clear(&mut self, color: Color) {
            self.calls.push(Call::Clear(color));
        }

        fn upload(&mut self, uniforms: &U) {
            self.calls.push(Call::Upload(uniforms.clone()));
        }

        fn draw(&mut self) {
            self.calls.push(Call::Draw);
        }

        fn present(&mut self) {
            self.calls.push(Call::Present);
        }
    }
}
