use bytemuck::{Pod, Zeroable};

use prism_engine::device::Gpu;
use prism_engine::input::GestureEvent;
use prism_engine::paint::Color;
use prism_engine::render::{ContextSlot, DrawSurface, GpuProgram, ProgramDesc, VertexSource};

use crate::gesture::{DragTransform, GestureConfig, Status};

use super::{DemoView, FrameOutcome};

/// Uniform block of `triangle.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TriangleUniforms {
    pub rotation: f32,
    pub scale: f32,
    pub _pad: [f32; 2], // 16-byte alignment
}

impl TriangleUniforms {
    pub fn new(rotation: f32, scale: f32) -> Self {
        Self { rotation, scale, _pad: [0.0; 2] }
    }
}

/// Position (NDC) + vertex color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct TriangleVertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl TriangleVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x3  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TriangleVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn vertex(x: f32, y: f32, r: f32, g: f32, b: f32) -> TriangleVertex {
    TriangleVertex { position: [x, y], color: [r, g, b] }
}

pub const INTERACTIVE_VERTICES: [TriangleVertex; 3] = [
    vertex(0.0, 0.6, 1.0, 0.2, 0.3),
    vertex(-0.5, -0.6, 0.2, 0.8, 0.9),
    vertex(0.5, -0.6, 0.9, 0.5, 0.2),
];

const CLEAR: Color = Color::from_premul(0.05, 0.05, 0.1, 1.0);

/// Builds the triangle program for `vertices`.
pub fn program(gpu: &Gpu<'_>, label: &str, vertices: &[TriangleVertex]) -> GpuProgram<TriangleUniforms> {
    GpuProgram::new(
        gpu,
        &ProgramDesc {
            label,
            shader: include_str!("shaders/triangle.wgsl"),
            vertices: VertexSource::Buffer {
                layout: TriangleVertex::layout(),
                data: bytemuck::cast_slice(vertices),
                count: vertices.len() as u32,
            },
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            blend: None,
        },
    )
}

/// Triangle rotated by horizontal drags and scaled by vertical drags.
///
/// Redraws only when the transform changed.
#[derive(Debug)]
pub struct TriangleView<C> {
    transform: DragTransform,
    context: ContextSlot<C>,
}

impl<C> TriangleView<C>
where
    C: DrawSurface<TriangleUniforms>,
{
    pub fn new(config: GestureConfig) -> Self {
        Self {
            transform: DragTransform::new(config),
            context: ContextSlot::new(),
        }
    }

    /// Installs the rendering context; only the first call has an effect.
    pub fn mount(&mut self, context: C) -> bool {
        self.context.install(context)
    }

    pub fn context(&self) -> Option<&C> {
        self.context.get()
    }

    pub fn context_mut(&mut self) -> Option<&mut C> {
        self.context.get_mut()
    }

    pub fn transform(&self) -> &DragTransform {
        &self.transform
    }
}

impl<C> DemoView for TriangleView<C>
where
    C: DrawSurface<TriangleUniforms>,
{
    fn on_gesture(&mut self, gesture: &GestureEvent) {
        match *gesture {
            GestureEvent::Start { position } => self.transform.on_gesture_start(position),
            GestureEvent::Move { delta, velocity, .. } => self.transform.on_gesture_move(delta, velocity),
            GestureEvent::End { velocity } => self.transform.on_gesture_end(velocity),
        }
    }

    fn frame_due(&self) -> bool {
        self.context.is_live() && self.transform.is_dirty()
    }

    fn render(&mut self) -> FrameOutcome {
        if !self.context.is_live() {
            return FrameOutcome::Stopped;
        }
        let Some(surface) = self.context.get_mut() else {
            return FrameOutcome::NotReady;
        };
        if !self.transform.take_dirty() {
            return FrameOutcome::Idle;
        }

        surface.clear(CLEAR);
        surface.upload(&TriangleUniforms::new(self.transform.rotation(), self.transform.scale()));
        surface.draw();
        surface.present();
        FrameOutcome::Presented
    }

    fn status(&self) -> Status {
        self.transform.status()
    }

    fn reset(&mut self) {
        self.transform.reset();
    }

    fn invalidate(&mut self) {
        self.transform.mark_dirty();
    }

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

#[cfg(test)]
mod tests {
    use prism_engine::coords::{Vec2, Viewport};

    use super::*;
    use crate::views::recorder::{Call, Recorder};

    type View = TriangleView<Recorder<TriangleUniforms>>;

    fn mounted() -> View {
        let mut view = View::new(GestureConfig::default());
        assert!(view.mount(Recorder::default()));
        view
    }

    fn drag(view: &mut View, dx: f32, dy: f32) {
        view.on_gesture(&GestureEvent::Move {
            delta: Vec2::new(dx, dy),
            cumulative: Vec2::new(dx, dy),
            velocity: Vec2::zero(),
        });
    }

    #[test]
    fn render_before_mount_is_a_silent_skip() {
        let mut view = View::new(GestureConfig::default());
        assert_eq!(view.render(), FrameOutcome::NotReady);
        assert!(view.frame_due(), "the pending redraw survives the skipped tick");
    }

    #[test]
    fn first_frame_uploads_identity_transform() {
        let mut view = mounted();
        assert_eq!(view.render(), FrameOutcome::Presented);

        let calls = &view.context().unwrap().calls;
        assert_eq!(
            calls,
            &vec![
                Call::Clear(CLEAR),
                Call::Upload(TriangleUniforms::new(0.0, 1.0)),
                Call::Draw,
                Call::Present,
            ]
        );
    }

    #[test]
    fn redraws_only_after_change() {
        let mut view = mounted();
        view.render();
        assert!(!view.frame_due());
        assert_eq!(view.render(), FrameOutcome::Idle);

        drag(&mut view, 100.0, 300.0);
        assert!(view.frame_due());
        assert_eq!(view.render(), FrameOutcome::Presented);

        let uploads = view.context().unwrap().uploads();
        assert_eq!(uploads.len(), 2);
        assert!((uploads[1].rotation - 1.0).abs() < 1e-5);
        assert_eq!(uploads[1].scale, 0.5);
    }

    #[test]
    fn last_write_before_the_tick_wins() {
        let mut view = mounted();
        view.render();
        drag(&mut view, 10.0, 0.0);
        drag(&mut view, 10.0, 0.0);
        view.render();

        let uploads = view.context().unwrap().uploads();
        assert_eq!(uploads.len(), 2);
        assert!((uploads[1].rotation - 0.2).abs() < 1e-5);
    }

    #[test]
    fn start_and_end_update_status_without_redraw() {
        let mut view = mounted();
        view.render();
        view.on_gesture(&GestureEvent::Start { position: Vec2::new(4.0, 5.0) });
        assert_eq!(view.status(), Status::Started { x: 4.0, y: 5.0 });
        view.on_gesture(&GestureEvent::End { velocity: Vec2::new(1.0, 0.0) });
        assert_eq!(view.status(), Status::Released { vx: 1.0, vy: 0.0 });
        assert!(!view.frame_due());
    }

    #[test]
    fn unmount_stops_the_loop() {
        let mut view = mounted();
        view.unmount();
        drag(&mut view, 5.0, 0.0);
        assert!(!view.is_live());
        assert!(!view.frame_due());
        assert_eq!(view.render(), FrameOutcome::Stopped);
    }

    #[test]
    fn resize_forces_a_redraw() {
        let mut view = mounted();
        view.render();
        view.resize(Viewport::new(100.0, 100.0));
        assert_eq!(view.render(), FrameOutcome::Presented);
    }
}
