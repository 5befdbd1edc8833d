use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Vec3};

use prism_engine::coords::Viewport;
use prism_engine::device::Gpu;
use prism_engine::input::GestureEvent;
use prism_engine::paint::Color;
use prism_engine::render::{ContextSlot, DrawSurface, GpuProgram, ProgramDesc, VertexSource};

use crate::gesture::{Euler, GestureConfig, OrbitState, Status};

use super::{DemoView, FrameOutcome};

const FOV_Y_DEG: f32 = 70.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;
const CAMERA_Z: f32 = 3.0;

const CUBE_COLOR: u32 = 0x77aaff;
const CLEAR_COLOR: u32 = 0x1a1a2e;

/// Ambient + a weak key light, so the faces stay distinguishable.
const AMBIENT: f32 = 0.75;
const LIGHT_DIR: [f32; 3] = [0.4, 0.6, 0.7];

/// Uniform block of `cube.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CubeUniforms {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// xyz = direction towards the light (world space), w = ambient term.
    pub light: [f32; 4],
}

impl CubeUniforms {
    pub fn new(orientation: Euler, viewport: Viewport) -> Self {
        let model = model_matrix(orientation);
        let mvp = projection(viewport) * view_matrix() * model;
        let light = Vec3::from(LIGHT_DIR).normalize();

        Self {
            mvp: mvp.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color: Color::from_hex(CUBE_COLOR).to_array(),
            light: [light.x, light.y, light.z, AMBIENT],
        }
    }
}

/// Rotation about X, then Y (XYZ order), z fixed at zero.
pub fn model_matrix(orientation: Euler) -> Mat4 {
    Mat4::from_euler(EulerRot::XYZ, orientation.x, orientation.y, orientation.z)
}

pub fn view_matrix() -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_Z), Vec3::ZERO, Vec3::Y)
}

pub fn projection(viewport: Viewport) -> Mat4 {
    Mat4::perspective_rh(FOV_Y_DEG.to_radians(), viewport.aspect(), Z_NEAR, Z_FAR)
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl CubeVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // normal
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit cube centered on the origin, 6 faces x 2 triangles, counter-clockwise
/// seen from outside.
pub fn cube_vertices() -> Vec<CubeVertex> {
    // (normal, u, v) with u x v = normal.
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut out = Vec::with_capacity(36);
    for (n, u, v) in faces {
        let c = n * 0.5;
        let (u, v) = (u * 0.5, v * 0.5);
        let corners = [c - u - v, c + u - v, c + u + v, c - u + v];
        for i in [0, 1, 2, 0, 2, 3] {
            out.push(CubeVertex { position: corners[i].to_array(), normal: n.to_array() });
        }
    }
    out
}

pub fn program(gpu: &Gpu<'_>) -> GpuProgram<CubeUniforms> {
    let vertices = cube_vertices();
    GpuProgram::new(
        gpu,
        &ProgramDesc {
            label: "cube",
            shader: include_str!("shaders/cube.wgsl"),
            vertices: VertexSource::Buffer {
                layout: CubeVertex::layout(),
                data: bytemuck::cast_slice(&vertices),
                count: vertices.len() as u32,
            },
            topology: wgpu::PrimitiveTopology::TriangleList,
            // Convex mesh: culling alone resolves visibility.
            cull_mode: Some(wgpu::Face::Back),
            blend: None,
        },
    )
}

/// Cube orbited by drags. Rotation is queued by gestures and applied by the
/// frame step; frames without queued rotation draw nothing.
#[derive(Debug)]
pub struct CubeView<C> {
    orbit: OrbitState,
    viewport: Viewport,
    context: ContextSlot<C>,
}

impl<C> CubeView<C>
where
    C: DrawSurface<CubeUniforms>,
{
    pub fn new(config: GestureConfig) -> Self {
        Self {
            orbit: OrbitState::new(config),
            viewport: Viewport::default(),
            context: ContextSlot::new(),
        }
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

    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }
}

impl<C> DemoView for CubeView<C>
where
    C: DrawSurface<CubeUniforms>,
{
    fn on_gesture(&mut self, gesture: &GestureEvent) {
        if let GestureEvent::Move { delta, .. } = *gesture {
            self.orbit.on_gesture_move(delta);
        }
    }

    fn frame_due(&self) -> bool {
        self.context.is_live() && self.orbit.need_update()
    }

    fn render(&mut self) -> FrameOutcome {
        if !self.context.is_live() {
            return FrameOutcome::Stopped;
        }
        let Some(surface) = self.context.get_mut() else {
            return FrameOutcome::NotReady;
        };
        let Some(orientation) = self.orbit.consume_frame() else {
            return FrameOutcome::Idle;
        };

        surface.clear(Color::from_hex(CLEAR_COLOR));
        surface.upload(&CubeUniforms::new(orientation, self.viewport));
        surface.draw();
        surface.present();
        FrameOutcome::Presented
    }

    fn status(&self) -> Status {
        let o = self.orbit.orientation();
        Status::Orbit { pitch: o.x, yaw: o.y }
    }

    fn reset(&mut self) {
        self.orbit.reset();
    }

    fn invalidate(&mut self) {
        self.orbit.invalidate();
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.orbit.invalidate();
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
    use glam::Vec4;
    use prism_engine::coords::Vec2;

    use super::*;
    use crate::views::recorder::Recorder;

    type View = CubeView<Recorder<CubeUniforms>>;

    fn mounted() -> View {
        let mut view = View::new(GestureConfig::default());
        view.resize(Viewport::new(300.0, 300.0));
        view.mount(Recorder::default());
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
    fn faces_wind_counter_clockwise_from_outside() {
        let vertices = cube_vertices();
        assert_eq!(vertices.len(), 36);

        for tri in vertices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| Vec3::from(tri[i].position));
            let n = Vec3::from(tri[0].normal);
            let face_normal = (b - a).cross(c - a).normalize();
            assert!((face_normal - n).length() < 1e-6, "{face_normal:?} vs {n:?}");
            assert!(a.dot(n) > 0.0, "triangle lies on the outward side");
        }
    }

    #[test]
    fn vertices_lie_on_the_unit_cube() {
        for v in cube_vertices() {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn identity_orientation_projects_the_origin_to_screen_center() {
        let u = CubeUniforms::new(Euler::default(), Viewport::new(300.0, 300.0));
        let clip = Mat4::from_cols_array_2d(&u.mvp) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
        assert_eq!(u.model, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn model_rotates_x_before_y() {
        let o = Euler { x: 0.3, y: 0.7, z: 0.0 };
        let expected = Mat4::from_rotation_x(0.3) * Mat4::from_rotation_y(0.7);
        assert!(model_matrix(o).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn first_frame_draws_then_idles() {
        let mut view = mounted();
        assert_eq!(view.render(), FrameOutcome::Presented);
        assert_eq!(view.render(), FrameOutcome::Idle);
        assert_eq!(view.context().unwrap().presents(), 1);
    }

    #[test]
    fn jitter_does_not_redraw() {
        let mut view = mounted();
        view.render();
        drag(&mut view, 0.5, 0.5);
        drag(&mut view, 0.5, 0.5);
        assert!(!view.frame_due());
        assert_eq!(view.render(), FrameOutcome::Idle);
    }

    #[test]
    fn queued_rotation_lands_on_the_next_frame() {
        let mut view = mounted();
        view.render();
        drag(&mut view, 2.0, 0.0);
        assert!(view.frame_due());
        assert_eq!(view.render(), FrameOutcome::Presented);

        let uploads = view.context().unwrap().uploads();
        let expected = model_matrix(Euler { x: 0.0, y: 0.02, z: 0.0 });
        assert!(Mat4::from_cols_array_2d(&uploads[1].model).abs_diff_eq(expected, 1e-6));
        assert_eq!(view.status(), Status::Orbit { pitch: 0.0, yaw: 0.02 });
    }

    #[test]
    fn resize_redraws_with_new_aspect() {
        let mut view = mounted();
        view.render();
        view.resize(Viewport::new(600.0, 300.0));
        assert_eq!(view.render(), FrameOutcome::Presented);

        let uploads = view.context().unwrap().uploads();
        assert_ne!(uploads[0].mvp, uploads[1].mvp);
        assert_eq!(uploads[0].model, uploads[1].model);
    }

    #[test]
    fn pending_rotation_waits_for_the_context() {
        let mut view = View::new(GestureConfig::default());
        drag(&mut view, 10.0, 0.0);
        assert_eq!(view.render(), FrameOutcome::NotReady);
        assert!((view.orbit().pending().y - 0.1).abs() < 1e-6);

        view.mount(Recorder::default());
        assert_eq!(view.render(), FrameOutcome::Presented);
        assert!((view.orbit().orientation().y - 0.1).abs() < 1e-6);
    }
}
