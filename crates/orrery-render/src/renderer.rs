//! Draws the scene each frame and optionally reads the result back.

use glam::{Mat4, Vec3};
use orrery_capture::CapturedFrame;

use crate::buffer::BufferAllocator;
use crate::camera::Camera;
use crate::depth::DepthBuffer;
use crate::drawable::BodyDrawable;
use crate::gpu::{RenderContext, SurfaceError};
use crate::pass::{FrameEncoder, RenderPassBuilder};
use crate::pipeline::UnlitPipeline;
use crate::readback::{ReadbackError, readback_layout};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("capture readback failed: {0}")]
    Readback(#[from] ReadbackError),
}

/// What happened to a frame that did not fail.
#[derive(Debug)]
pub enum FrameOutcome {
    Presented,
    /// Presented, and the image as drawn was read back.
    Captured(CapturedFrame),
    /// The surface timed out; nothing was drawn.
    Skipped,
}

/// Pipeline, camera, depth buffer and the drawables of the scene.
pub struct SceneRenderer {
    pipeline: UnlitPipeline,
    camera: Camera,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth: DepthBuffer,
    drawables: Vec<BodyDrawable>,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(
        ctx: &RenderContext,
        shader: &wgpu::ShaderModule,
        mut camera: Camera,
        clear_color: wgpu::Color,
    ) -> Self {
        let (width, height) = ctx.size();
        camera.set_aspect_ratio(width, height);

        let pipeline = UnlitPipeline::new(&ctx.device, shader, ctx.surface_format);
        let camera_buffer =
            BufferAllocator::new(&ctx.device).create_uniform("camera-uniform", &camera.to_uniform());
        let camera_bind_group = pipeline.create_camera_bind_group(&ctx.device, &camera_buffer);
        let depth = DepthBuffer::new(&ctx.device, width, height);

        Self {
            pipeline,
            camera,
            camera_buffer,
            camera_bind_group,
            depth,
            drawables: Vec::new(),
            clear_color,
        }
    }

    /// Add a flat-colored cube; returns its draw slot.
    pub fn add_cube(&mut self, ctx: &RenderContext, label: &str, size: f32, color: Vec3) -> usize {
        self.drawables.push(BodyDrawable::cube(
            &ctx.device,
            &self.pipeline,
            label,
            size,
            color,
        ));
        self.drawables.len() - 1
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }

    /// Follow a surface resize: projection aspect, camera uniform and depth buffer.
    pub fn resize(&mut self, ctx: &RenderContext) {
        let (width, height) = ctx.size();
        self.camera.set_aspect_ratio(width, height);
        ctx.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera.to_uniform()),
        );
        self.depth.resize(&ctx.device, width, height);
    }

    /// Draw every drawable with its model matrix, in slot order.
    ///
    /// With `capture`, the surface is copied after the draws and before
    /// presentation, then read back once the frame is submitted.
    pub fn render(
        &mut self,
        ctx: &RenderContext,
        models: &[Mat4],
        capture: bool,
    ) -> Result<FrameOutcome, RenderError> {
        if models.len() != self.drawables.len() {
            log::warn!(
                "Got {} model matrices for {} drawables",
                models.len(),
                self.drawables.len()
            );
        }

        let surface_texture = match ctx.get_current_texture() {
            Ok(texture) => texture,
            Err(SurfaceError::Timeout) => {
                log::debug!("Surface acquire timed out, skipping frame");
                return Ok(FrameOutcome::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        for (drawable, model) in self.drawables.iter().zip(models) {
            drawable.set_model(&ctx.queue, *model);
        }

        let mut frame = FrameEncoder::new(&ctx.device, ctx.queue.clone(), surface_texture);
        let builder = RenderPassBuilder::new()
            .clear_color(self.clear_color)
            .depth(&self.depth)
            .label("scene-pass");
        {
            let mut pass = frame.begin_render_pass(&builder);
            pass.set_pipeline(&self.pipeline.pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            for drawable in self.drawables.iter().take(models.len()) {
                drawable.draw(&mut pass);
            }
        }

        // An unsupported surface format still presents the frame.
        let readback = capture.then(|| {
            readback_layout(ctx.surface_format)
                .map(|layout| frame.copy_surface_to_buffer(&ctx.device, layout))
        });
        frame.submit();

        match readback {
            Some(readback) => Ok(FrameOutcome::Captured(readback?.read(&ctx.device)?)),
            None => Ok(FrameOutcome::Presented),
        }
    }
}
