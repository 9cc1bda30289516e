//! GPU resources for one body: its cube mesh and model uniform.

use glam::{Mat4, Vec3};
use orrery_mesh::generate_cube;

use crate::buffer::{BufferAllocator, MeshBuffer};
use crate::pipeline::{ModelUniform, UnlitPipeline};

pub struct BodyDrawable {
    pub label: String,
    pub mesh: MeshBuffer,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
}

impl BodyDrawable {
    /// Upload a flat-colored cube of edge `size`, starting at the identity transform.
    pub fn cube(
        device: &wgpu::Device,
        pipeline: &UnlitPipeline,
        label: &str,
        size: f32,
        color: Vec3,
    ) -> Self {
        let (vertices, indices) = generate_cube(size, color);
        let alloc = BufferAllocator::new(device);
        let mesh = alloc.create_mesh(label, &vertices, &indices);
        let model_buffer =
            alloc.create_uniform(&format!("{label}-model"), &ModelUniform::from(Mat4::IDENTITY));
        let model_bind_group =
            pipeline.create_model_bind_group(device, &model_buffer, &format!("{label}-model-bind-group"));

        Self {
            label: label.to_string(),
            mesh,
            model_buffer,
            model_bind_group,
        }
    }

    /// Upload this frame's model matrix.
    pub fn set_model(&self, queue: &wgpu::Queue, model: Mat4) {
        queue.write_buffer(
            &self.model_buffer,
            0,
            bytemuck::bytes_of(&ModelUniform::from(model)),
        );
    }

    /// Bind the model uniform and draw. The pipeline and camera group must already be set.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(1, &self.model_bind_group, &[]);
        self.mesh.bind(render_pass);
        self.mesh.draw(render_pass);
    }
}
