//! Batched line rendering for helpers
//!
//! All visible helper lines are collected into one vertex buffer per frame
//! and drawn with a single call inside the main pass, depth tested against
//! the scene.

use wgpu::{Buffer, Device, Queue, RenderPass, RenderPipeline};

use crate::gfx::scene::vertex::LineVertex;

/// Vertex capacity of a fresh buffer
const INITIAL_CAPACITY: usize = 1024;

pub struct LineRenderer {
    pipeline: RenderPipeline,
    vertex_buffer: Buffer,
    capacity: usize,
    vertex_count: u32,
}

impl LineRenderer {
    pub fn new(
        device: &Device,
        surface_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        global_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_SHADER.into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[global_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[LineVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            vertex_buffer: create_vertex_buffer(device, INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            vertex_count: 0,
        }
    }

    /// Replaces the batched lines, growing the buffer when needed
    pub fn update(&mut self, device: &Device, queue: &Queue, vertices: &[LineVertex]) {
        if vertices.len() > self.capacity {
            self.capacity = grown_capacity(self.capacity, vertices.len());
            self.vertex_buffer = create_vertex_buffer(device, self.capacity);
            log::debug!("line buffer grown to {} vertices", self.capacity);
        }

        self.vertex_count = vertices.len() as u32;
        if !vertices.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn render(&self, render_pass: &mut RenderPass<'_>, global_bind_group: &wgpu::BindGroup) {
        if self.vertex_count == 0 {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, global_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

fn create_vertex_buffer(device: &Device, capacity: usize) -> Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Line Vertex Buffer"),
        size: (capacity * std::mem::size_of::<LineVertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn grown_capacity(current: usize, needed: usize) -> usize {
    needed.next_power_of_two().max(current)
}

const LINE_SHADER: &str = r#"
struct GlobalUniform {
    view_position: vec4<f32>,
    view_proj: mat4x4<f32>,
    frame: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> global: GlobalUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = global.view_proj * vec4<f32>(in.position, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    var color = in.color;
    if (global.frame.x > 0.5) {
        let low = color * 12.92;
        let high = 1.055 * pow(color, vec3<f32>(1.0 / 2.4)) - 0.055;
        color = select(high, low, color < vec3<f32>(0.0031308));
    }
    return vec4<f32>(color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_grows_to_a_power_of_two() {
        assert_eq!(grown_capacity(1024, 1500), 2048);
        assert_eq!(grown_capacity(4096, 1500), 4096);
        assert_eq!(grown_capacity(1024, 1025), 2048);
    }
}
