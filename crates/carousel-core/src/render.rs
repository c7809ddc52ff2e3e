//! wgpu pipelines for the card ring and HUD ring.
//!
//! Frontends own the surface, device and queue; this module owns everything
//! drawn into a frame. Call [`CarouselRenderer::prepare`] with the frame's
//! payloads, then [`CarouselRenderer::draw`] inside a render pass.

use crate::gpu::{HudUniforms, ItemInstance, SceneUniforms};
use crate::{CAROUSEL_WGSL, HUD_WGSL};
use wgpu::util::DeviceExt;

const INITIAL_INSTANCE_CAPACITY: usize = 32;

pub struct CarouselRenderer {
    item_pipeline: wgpu::RenderPipeline,
    hud_pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    hud_buffer: wgpu::Buffer,
    hud_bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    instance_count: u32,
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("item_instances"),
        size: (std::mem::size_of::<ItemInstance>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl CarouselRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let item_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("carousel_shader"),
            source: wgpu::ShaderSource::Wgsl(CAROUSEL_WGSL.into()),
        });
        let hud_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("hud_shader"),
            source: wgpu::ShaderSource::Wgsl(HUD_WGSL.into()),
        });

        let scene_bgl = uniform_layout(device, "scene_bgl");
        let hud_bgl = uniform_layout(device, "hud_bgl");

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let hud_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("hud_uniforms"),
            size: std::mem::size_of::<HudUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });
        let hud_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("hud_bg"),
            layout: &hud_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: hud_buffer.as_entire_binding(),
            }],
        });

        // Unit quad centred on the origin, two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = create_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);

        let item_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("item_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let hud_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("hud_pl"),
            bind_group_layouts: &[&hud_bgl],
            push_constant_ranges: &[],
        });

        const INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
            1 => Float32x4,
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
        ];
        let vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: per-card instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ItemInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRS,
            },
        ];
        let blend_target = [Some(wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        let item_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("item_pipeline"),
            layout: Some(&item_layout),
            vertex: wgpu::VertexState {
                module: &item_shader,
                entry_point: Some("vs_item"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &item_shader,
                entry_point: Some("fs_item"),
                targets: &blend_target,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let hud_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("hud_pipeline"),
            layout: Some(&hud_layout),
            vertex: wgpu::VertexState {
                module: &hud_shader,
                entry_point: Some("vs_hud"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &hud_shader,
                entry_point: Some("fs_hud"),
                targets: &blend_target,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Self {
            item_pipeline,
            hud_pipeline,
            scene_buffer,
            scene_bind_group,
            hud_buffer,
            hud_bind_group,
            quad_vb,
            instance_vb,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            instance_count: 0,
        }
    }

    /// Upload this frame's uniforms and instances, growing the instance
    /// buffer when the item set outgrows it.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &SceneUniforms,
        instances: &[ItemInstance],
        hud: &HudUniforms,
    ) {
        if instances.len() > self.instance_capacity {
            let capacity = instances.len().next_power_of_two();
            log::info!("[render] grow instance buffer to {}", capacity);
            self.instance_vb = create_instance_buffer(device, capacity);
            self.instance_capacity = capacity;
        }
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(scene));
        queue.write_buffer(&self.hud_buffer, 0, bytemuck::bytes_of(hud));
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(instances));
        }
        self.instance_count = instances.len() as u32;
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count > 0 {
            rpass.set_pipeline(&self.item_pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..self.instance_count);
        }
        rpass.set_pipeline(&self.hud_pipeline);
        rpass.set_bind_group(0, &self.hud_bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }
}
