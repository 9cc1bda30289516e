//! Unlit pipeline for flat vertex-colored geometry.
//!
//! Bind groups:
//! - group 0: [`CameraUniform`](crate::camera::CameraUniform), shared by every draw
//! - group 1: [`ModelUniform`], one per body

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use orrery_mesh::VertexPositionColor;

use crate::camera::CameraUniform;
use crate::depth::DepthBuffer;

/// Per-body model matrix.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

static_assertions::assert_eq_size!(ModelUniform, [u8; 64]);

impl From<Mat4> for ModelUniform {
    fn from(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

pub struct UnlitPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    pub model_bind_group_layout: wgpu::BindGroupLayout,
}

impl UnlitPipeline {
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let camera_bind_group_layout = uniform_layout::<CameraUniform>(device, "camera-bind-group-layout");
        let model_bind_group_layout = uniform_layout::<ModelUniform>(device, "model-bind-group-layout");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("unlit-pipeline-layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &model_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("unlit-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexPositionColor::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Cube index winding is mixed; depth testing alone resolves visibility.
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: true,
                depth_compare: DepthBuffer::COMPARE_FUNCTION,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            camera_bind_group_layout,
            model_bind_group_layout,
        }
    }

    pub fn create_camera_bind_group(
        &self,
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        bind_uniform(device, &self.camera_bind_group_layout, buffer, "camera-bind-group")
    }

    pub fn create_model_bind_group(
        &self,
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
        label: &str,
    ) -> wgpu::BindGroup {
        bind_uniform(device, &self.model_bind_group_layout, buffer, label)
    }
}

fn uniform_layout<T>(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(std::mem::size_of::<T>() as u64),
            },
            count: None,
        }],
    })
}

fn bind_uniform(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferAllocator;
    use crate::shader::ShaderLibrary;
    use crate::test_support::create_test_device;

    #[test]
    fn test_model_uniform_from_matrix() {
        let m = Mat4::from_translation(glam::Vec3::new(24.0, 0.0, 0.0));
        let uniform = ModelUniform::from(m);
        assert_eq!(uniform.model[3], [24.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_pipeline_and_bind_groups_build() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let shader = ShaderLibrary::new().load_unlit(&device).unwrap();
        let pipeline = UnlitPipeline::new(&device, &shader, wgpu::TextureFormat::Bgra8Unorm);

        let alloc = BufferAllocator::new(&device);
        let camera = alloc.create_uniform("camera", &crate::camera::Camera::default().to_uniform());
        let model = alloc.create_uniform("model", &ModelUniform::from(Mat4::IDENTITY));
        let _camera_group = pipeline.create_camera_bind_group(&device, &camera);
        let _model_group = pipeline.create_model_bind_group(&device, &model, "sun-model");
    }
}
