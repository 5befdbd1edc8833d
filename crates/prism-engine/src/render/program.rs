use std::marker::PhantomData;

use bytemuck::Pod;
use wgpu::util::DeviceExt;

use crate::device::{Gpu, GpuFrame};
use crate::paint::Color;

use super::DrawSurface;

/// Where a program's vertices come from.
#[derive(Debug, Clone)]
pub enum VertexSource<'a> {
    /// No vertex buffer; the shader derives geometry from `vertex_index`.
    Procedural { count: u32 },
    /// Static vertex buffer uploaded once at creation.
    Buffer {
        layout: wgpu::VertexBufferLayout<'a>,
        data: &'a [u8],
        count: u32,
    },
}

impl VertexSource<'_> {
    fn count(&self) -> u32 {
        match self {
            VertexSource::Procedural { count } | VertexSource::Buffer { count, .. } => *count,
        }
    }
}

/// Everything needed to build a [`GpuProgram`].
#[derive(Debug, Clone)]
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    /// WGSL source with `vs_main` / `fs_main` entry points and the uniform
    /// block at `@group(0) @binding(0)`.
    pub shader: &'a str,
    pub vertices: VertexSource<'a>,
    pub topology: wgpu::PrimitiveTopology,
    pub cull_mode: Option<wgpu::Face>,
    pub blend: Option<wgpu::BlendState>,
}

/// One shader program with its static geometry and a uniform block `U`.
///
/// All GPU handles are created in [`GpuProgram::new`] and live as long as the
/// program. Frames are lent to it with [`attach`](Self::attach) and returned
/// to the display by [`DrawSurface::present`].
pub struct GpuProgram<U> {
    label: String,
    queue: wgpu::Queue,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,

    load: wgpu::LoadOp<wgpu::Color>,
    frame: Option<GpuFrame>,

    _uniforms: PhantomData<fn(&U)>,
}

impl<U: Pod> GpuProgram<U> {
    pub fn new(gpu: &Gpu<'_>, desc: &ProgramDesc<'_>) -> Self {
        let device = gpu.device();
        let label = desc.label;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(desc.shader.into()),
        });

        let uniform_size = std::mem::size_of::<U>() as u64;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(uniform_size),
                },
                count: None,
            }],
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let (vertex_buffer, layouts) = match &desc.vertices {
            VertexSource::Procedural { .. } => (None, Vec::new()),
            VertexSource::Buffer { layout, data, .. } => {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(label),
                    contents: data,
                    usage: wgpu::BufferUsages::VERTEX,
                });
                (Some(buffer), vec![layout.clone()])
            }
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &layouts,
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_format(),
                    blend: desc.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: desc.cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("program `{label}` created ({} vertices)", desc.vertices.count());

        Self {
            label: label.to_string(),
            queue: gpu.queue().clone(),
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            vertex_count: desc.vertices.count(),
            load: wgpu::LoadOp::Load,
            frame: None,
            _uniforms: PhantomData,
        }
    }

    /// Lends the next acquired frame to this program.
    pub fn attach(&mut self, frame: GpuFrame) {
        if self.frame.replace(frame).is_some() {
            log::debug!("program `{}`: previous frame was never presented", self.label);
        }
    }

    fn encode_pass(&mut self, with_geometry: bool) {
        let Some(frame) = self.frame.as_mut() else { return };
        let load = std::mem::replace(&mut self.load, wgpu::LoadOp::Load);

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(&self.label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if !with_geometry {
            return;
        }

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        if let Some(vbo) = self.vertex_buffer.as_ref() {
            rpass.set_vertex_buffer(0, vbo.slice(..));
        }
        rpass.draw(0..self.vertex_count, 0..1);
    }
}

impl<U: Pod> DrawSurface<U> for GpuProgram<U> {
    fn clear(&mut self, color: Color) {
        self.load = wgpu::LoadOp::Clear(color.into());
    }

    fn upload(&mut self, uniforms: &U) {
        self.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    fn draw(&mut self) {
        self.encode_pass(true);
    }

    fn present(&mut self) {
        // A clear requested without a draw still has to reach the target.
        if matches!(self.load, wgpu::LoadOp::Clear(_)) {
            self.encode_pass(false);
        }

        let Some(GpuFrame { surface_texture, view, encoder }) = self.frame.take() else {
            return;
        };

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }
}
