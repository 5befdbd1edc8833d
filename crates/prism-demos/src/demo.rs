use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use bytemuck::Pod;
use serde::{Deserialize, Serialize};

use prism_engine::coords::Viewport;
use prism_engine::device::{Gpu, GpuFrame};
use prism_engine::render::GpuProgram;

use crate::gesture::GestureConfig;
use crate::views::{
    cube, spin, triangle, wave, CubeUniforms, CubeView, DemoView, SpinView, TriangleUniforms,
    TriangleView, WaveParams, WaveUniforms, WaveView,
};

/// Selectable demo.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    /// Drag to rotate and scale a triangle.
    #[default]
    Triangle,
    /// Self-rotating triangle.
    Spin,
    /// Drag to orbit a cube.
    Cube,
    /// Animated quadratic path.
    Wave,
}

impl DemoKind {
    pub const ALL: [DemoKind; 4] = [DemoKind::Triangle, DemoKind::Spin, DemoKind::Cube, DemoKind::Wave];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Triangle => "triangle",
            DemoKind::Spin => "spin",
            DemoKind::Cube => "cube",
            DemoKind::Wave => "wave",
        }
    }

    /// Window title prefix.
    pub fn title(self) -> &'static str {
        match self {
            DemoKind::Triangle => "Interactive triangle",
            DemoKind::Spin => "Spinning triangle",
            DemoKind::Cube => "Orbit cube",
            DemoKind::Wave => "Path animation",
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DemoKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let names: Vec<&str> = DemoKind::ALL.iter().map(|k| k.name()).collect();
                anyhow!("unknown demo `{wanted}` (expected one of: {})", names.join(", "))
            })
    }
}

/// The running demo: one view bound to its GPU program.
pub enum Demo {
    Triangle(TriangleView<GpuProgram<TriangleUniforms>>),
    Spin(SpinView<GpuProgram<TriangleUniforms>>),
    Cube(CubeView<GpuProgram<CubeUniforms>>),
    Wave(WaveView<GpuProgram<WaveUniforms>>),
}

impl Demo {
    /// Creates the view. No GPU work happens until [`mount`](Self::mount).
    pub fn new(kind: DemoKind, gestures: GestureConfig) -> Self {
        match kind {
            DemoKind::Triangle => Demo::Triangle(TriangleView::new(gestures)),
            DemoKind::Spin => Demo::Spin(SpinView::new()),
            DemoKind::Cube => Demo::Cube(CubeView::new(gestures)),
            DemoKind::Wave => Demo::Wave(WaveView::new(WaveParams::default())),
        }
    }

    pub fn kind(&self) -> DemoKind {
        match self {
            Demo::Triangle(_) => DemoKind::Triangle,
            Demo::Spin(_) => DemoKind::Spin,
            Demo::Cube(_) => DemoKind::Cube,
            Demo::Wave(_) => DemoKind::Wave,
        }
    }

    /// Builds the GPU program and installs it as the view's context.
    ///
    /// Returns false if the view already had one (or was torn down).
    pub fn mount(&mut self, gpu: &Gpu<'_>, viewport: Viewport) -> bool {
        self.view_mut().resize(viewport);

        let installed = match self {
            Demo::Triangle(v) => v.mount(triangle::program(gpu, "triangle", &triangle::INTERACTIVE_VERTICES)),
            Demo::Spin(v) => v.mount(triangle::program(gpu, "spin", &spin::SPIN_VERTICES)),
            Demo::Cube(v) => v.mount(cube::program(gpu)),
            Demo::Wave(v) => v.mount(wave::program(gpu)),
        };

        if installed {
            log::info!("demo `{}` mounted ({}x{})", self.kind(), viewport.width, viewport.height);
        }
        installed
    }

    /// Hands an acquired frame to the view's program. Returns false, dropping
    /// the frame, when no program is installed.
    pub fn attach_frame(&mut self, frame: GpuFrame) -> bool {
        match self {
            Demo::Triangle(v) => attach(v.context_mut(), frame),
            Demo::Spin(v) => attach(v.context_mut(), frame),
            Demo::Cube(v) => attach(v.context_mut(), frame),
            Demo::Wave(v) => attach(v.context_mut(), frame),
        }
    }

    pub fn view(&self) -> &dyn DemoView {
        match self {
            Demo::Triangle(v) => v,
            Demo::Spin(v) => v,
            Demo::Cube(v) => v,
            Demo::Wave(v) => v,
        }
    }

    pub fn view_mut(&mut self) -> &mut dyn DemoView {
        match self {
            Demo::Triangle(v) => v,
            Demo::Spin(v) => v,
            Demo::Cube(v) => v,
            Demo::Wave(v) => v,
        }
    }
}

fn attach<U: Pod>(program: Option<&mut GpuProgram<U>>, frame: GpuFrame) -> bool {
    match program {
        Some(program) => {
            program.attach(frame);
            true
        }
        None => false,
    }
}
