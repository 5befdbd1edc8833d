use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};

use prism_engine::coords::{Vec2, Viewport};
use prism_engine::device::Gpu;
use prism_engine::input::GestureEvent;
use prism_engine::paint::Color;
use prism_engine::render::{ContextSlot, DrawSurface, GpuProgram, ProgramDesc, VertexSource};

use crate::gesture::Status;

use super::{DemoView, FrameOutcome};

/// Segments the curve is tessellated into by the vertex shader.
pub const WAVE_SEGMENTS: u32 = 64;

const CLEAR_COLOR: u32 = 0x1a1a2e;

/// Shape and timing of the animated path. Lengths in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WaveParams {
    /// Horizontal inset of both endpoints.
    pub margin: f32,
    /// Baseline height as a fraction of the viewport height.
    pub baseline: f32,
    /// Control point lift at phase 0.
    pub base_height: f32,
    /// Amplitude of the control point lift.
    pub swing: f32,
    /// Amplitude of the control point's horizontal sway.
    pub sway: f32,
    pub stroke_width: f32,
    /// Loop duration in seconds.
    pub period: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            margin: 30.0,
            baseline: 0.6,
            base_height: 60.0,
            swing: 300.0,
            sway: 60.0,
            stroke_width: 4.0,
            period: 5.0,
        }
    }
}

/// Quadratic curve `start -> end` bent by `control`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WaveCurve {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
}

impl WaveCurve {
    /// Point at parameter `s` in `[0, 1]`.
    pub fn point(&self, s: f32) -> Vec2 {
        let r = 1.0 - s;
        self.start * (r * r) + self.control * (2.0 * r * s) + self.end * (s * s)
    }
}

/// The curve at loop phase `t` in `[0, 1)`.
///
/// The endpoint sweeps from `start` to the far margin over one loop while the
/// control point circles around the midpoint.
pub fn wave_curve(params: &WaveParams, viewport: Viewport, t: f32) -> WaveCurve {
    let baseline = viewport.height * params.baseline;
    let start = Vec2::new(params.margin, baseline);
    let full_end_x = viewport.width - params.margin;

    let angle = t * TAU;
    let lift = params.base_height + angle.sin() * params.swing;
    let control = Vec2::new((start.x + full_end_x) / 2.0 + angle.cos() * params.sway, baseline - lift);

    let end = Vec2::new(start.x + (full_end_x - start.x) * t, baseline);

    WaveCurve { start, control, end }
}

/// Uniform block of `wave.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct WaveUniforms {
    pub start: [f32; 2],
    pub control: [f32; 2],
    pub end: [f32; 2],
    pub viewport: [f32; 2],
    pub color: [f32; 4],
    pub stroke_width: f32,
    pub segments: u32,
    pub _pad: [f32; 2],
}

impl WaveUniforms {
    pub fn new(curve: &WaveCurve, viewport: Viewport, stroke_width: f32) -> Self {
        Self {
            start: [curve.start.x, curve.start.y],
            control: [curve.control.x, curve.control.y],
            end: [curve.end.x, curve.end.y],
            viewport: [viewport.width, viewport.height],
            color: Color::WHITE.to_array(),
            stroke_width,
            segments: WAVE_SEGMENTS,
            _pad: [0.0; 2],
        }
    }
}

pub fn program(gpu: &Gpu<'_>) -> GpuProgram<WaveUniforms> {
    GpuProgram::new(
        gpu,
        &ProgramDesc {
            label: "wave",
            shader: include_str!("shaders/wave.wgsl"),
            // Two vertices (left/right edge) per tessellation point.
            vertices: VertexSource::Procedural { count: 2 * (WAVE_SEGMENTS + 1) },
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            cull_mode: None,
            blend: None,
        },
    )
}

/// Looping path animation. Redraws every frame while mounted.
#[derive(Debug)]
pub struct WaveView<C> {
    params: WaveParams,
    viewport: Viewport,
    elapsed: f32,
    context: ContextSlot<C>,
}

impl<C> WaveView<C>
where
    C: DrawSurface<WaveUniforms>,
{
    pub fn new(params: WaveParams) -> Self {
        Self {
            params,
            viewport: Viewport::default(),
            elapsed: 0.0,
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

    /// Loop phase in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        if self.params.period > 0.0 { self.elapsed / self.params.period } else { 0.0 }
    }

    pub fn curve(&self) -> WaveCurve {
        wave_curve(&self.params, self.viewport, self.phase())
    }
}

impl<C> DemoView for WaveView<C>
where
    C: DrawSurface<WaveUniforms>,
{
    fn on_gesture(&mut self, _gesture: &GestureEvent) {}

    fn advance(&mut self, dt: f32) {
        if self.params.period <= 0.0 || !dt.is_finite() {
            return;
        }
        self.elapsed = (self.elapsed + dt.max(0.0)).rem_euclid(self.params.period);
    }

    fn frame_due(&self) -> bool {
        self.context.is_live() && self.viewport.is_valid()
    }

    fn render(&mut self) -> FrameOutcome {
        if !self.context.is_live() {
            return FrameOutcome::Stopped;
        }
        if !self.viewport.is_valid() {
            return FrameOutcome::Idle;
        }
        let curve = self.curve();
        let Some(surface) = self.context.get_mut() else {
            return FrameOutcome::NotReady;
        };

        surface.clear(Color::from_hex(CLEAR_COLOR));
        surface.upload(&WaveUniforms::new(&curve, self.viewport, self.params.stroke_width));
        surface.draw();
        surface.present();
        FrameOutcome::Presented
    }

    fn status(&self) -> Status {
        Status::Hint("looping path")
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    fn invalidate(&mut self) {}

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
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
    use super::*;
    use crate::views::recorder::Recorder;

    const VIEWPORT: Viewport = Viewport::new(420.0, 500.0);

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).x.abs() < 1e-3 && (a - b).y.abs() < 1e-3
    }

    #[test]
    fn curve_collapses_to_start_at_phase_zero() {
        let c = wave_curve(&WaveParams::default(), VIEWPORT, 0.0);
        assert_eq!(c.start, Vec2::new(30.0, 300.0));
        assert_eq!(c.end, c.start);
        // midpoint 210, sway +60, lift 60
        assert!(approx(c.control, Vec2::new(270.0, 240.0)));
    }

    #[test]
    fn quarter_phase_lifts_control_to_the_peak() {
        let c = wave_curve(&WaveParams::default(), VIEWPORT, 0.25);
        assert!(approx(c.control, Vec2::new(210.0, 300.0 - 360.0)));
        assert!(approx(c.end, Vec2::new(30.0 + 360.0 * 0.25, 300.0)));
    }

    #[test]
    fn three_quarter_phase_dips_below_baseline() {
        let c = wave_curve(&WaveParams::default(), VIEWPORT, 0.75);
        assert!(approx(c.control, Vec2::new(210.0, 300.0 + 240.0)));
    }

    #[test]
    fn endpoints_stay_on_the_baseline() {
        for i in 0..10 {
            let c = wave_curve(&WaveParams::default(), VIEWPORT, i as f32 / 10.0);
            assert_eq!(c.start.y, 300.0);
            assert_eq!(c.end.y, 300.0);
            assert!(c.end.x >= 30.0 && c.end.x < 390.0);
        }
    }

    #[test]
    fn curve_point_hits_endpoints() {
        let c = wave_curve(&WaveParams::default(), VIEWPORT, 0.5);
        assert!(approx(c.point(0.0), c.start));
        assert!(approx(c.point(1.0), c.end));
    }

    #[test]
    fn uniforms_match_the_shader_block_size() {
        assert_eq!(std::mem::size_of::<WaveUniforms>(), 64);
    }

    #[test]
    fn elapsed_time_wraps_at_the_period() {
        let mut view = WaveView::<Recorder<WaveUniforms>>::new(WaveParams::default());
        view.advance(2.5);
        assert!((view.phase() - 0.5).abs() < 1e-6);
        view.advance(3.0);
        assert!((view.phase() - 0.1).abs() < 1e-5);
        view.advance(-1.0);
        assert!((view.phase() - 0.1).abs() < 1e-5);
        view.reset();
        assert_eq!(view.phase(), 0.0);
    }

    #[test]
    fn renders_every_frame_once_sized() {
        let mut view = WaveView::<Recorder<WaveUniforms>>::new(WaveParams::default());
        view.mount(Recorder::default());
        assert!(!view.frame_due(), "no viewport yet");
        assert_eq!(view.render(), FrameOutcome::Idle);

        view.resize(VIEWPORT);
        for _ in 0..3 {
            view.advance(1.0 / 60.0);
            assert!(view.frame_due());
            assert_eq!(view.render(), FrameOutcome::Presented);
        }

        let uploads = view.context().unwrap().uploads();
        assert_eq!(uploads.len(), 3);
        assert!(uploads.windows(2).all(|w| w[1].end[0] > w[0].end[0]));
        assert!(uploads.iter().all(|u| u.stroke_width == 4.0 && u.segments == WAVE_SEGMENTS));
    }

    #[test]
    fn unmount_stops_the_animation() {
        let mut view = WaveView::<Recorder<WaveUniforms>>::new(WaveParams::default());
        view.resize(VIEWPORT);
        view.unmount();
        assert!(!view.frame_due());
        assert_eq!(view.render(), FrameOutcome::Stopped);
    }
}
