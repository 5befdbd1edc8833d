use prism_engine::input::GestureEvent;
use prism_engine::paint::Color;
use prism_engine::render::{ContextSlot, DrawSurface};

use crate::gesture::Status;

use super::triangle::{TriangleUniforms, TriangleVertex};
use super::{DemoView, FrameOutcome};

/// Radians added per presented frame.
pub const SPIN_STEP: f32 = 0.02;

pub const SPIN_VERTICES: [TriangleVertex; 3] = [
    TriangleVertex { position: [0.0, 0.6], color: [1.0, 0.0, 0.0] },
    TriangleVertex { position: [-0.5, -0.6], color: [0.0, 1.0, 0.0] },
    TriangleVertex { position: [0.5, -0.6], color: [0.0, 0.0, 1.0] },
];

const CLEAR: Color = Color::from_premul(0.1, 0.1, 0.15, 1.0);

/// Triangle that rotates on its own, one step per frame. Ignores input.
#[derive(Debug)]
pub struct SpinView<C> {
    rotation: f32,
    context: ContextSlot<C>,
}

impl<C> SpinView<C>
where
    C: DrawSurface<TriangleUniforms>,
{
    pub fn new() -> Self {
        Self { rotation: 0.0, context: ContextSlot::new() }
    }

    pub fn mount(&mut self, context: C) -> bool {
        self.context.install(context)
    }

    pub fn context(&self) -> Option<&C> {
        self.context.get()
    }

    pub fn context_mut(&mut self) -> Option<&mut C> {
        self.context.get_mut()
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

impl<C> Default for SpinView<C>
where
    C: DrawSurface<TriangleUniforms>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> DemoView for SpinView<C>
where
    C: DrawSurface<TriangleUniforms>,
{
    fn on_gesture(&mut self, _gesture: &GestureEvent) {}

    fn frame_due(&self) -> bool {
        self.context.is_live()
    }

    // Steps per frame rather than per second, so the speed follows the
    // display refresh rate.
    fn render(&mut self) -> FrameOutcome {
        if !self.context.is_live() {
            return FrameOutcome::Stopped;
        }
        let Some(surface) = self.context.get_mut() else {
            return FrameOutcome::NotReady;
        };

        self.rotation += SPIN_STEP;

        surface.clear(CLEAR);
        surface.upload(&TriangleUniforms::new(self.rotation, 1.0));
        surface.draw();
        surface.present();
        FrameOutcome::Presented
    }

    fn status(&self) -> Status {
        Status::Hint("spinning")
    }

    fn reset(&mut self) {
        self.rotation = 0.0;
    }

    fn invalidate(&mut self) {}

    fn is_ready(&self) -> bool {
        self.context.is_ready()
    }

    fn is_live(&self) -> bool {
        self.context.is_live()
    }

    fn unmount(&mut self) {
        self.context.release();
    }
}
