//! Render pass configuration and per-frame command encoding.

use std::sync::Arc;

use orrery_capture::PixelLayout;

use crate::depth::DepthBuffer;
use crate::readback::{TextureReadback, encode_texture_readback};

/// Depth attachment cleared at the start of the pass.
#[derive(Debug)]
struct DepthAttachment {
    view: wgpu::TextureView,
    clear_value: f32,
}

/// Fluent description of a single color + optional depth render pass.
#[derive(Debug)]
pub struct RenderPassBuilder {
    clear_color: wgpu::Color,
    depth: Option<DepthAttachment>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPassBuilder {
    /// A pass clearing to opaque black with no depth attachment.
    pub fn new() -> Self {
        Self {
            clear_color: wgpu::Color::BLACK,
            depth: None,
            label: None,
        }
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Attach a depth buffer cleared to its reverse-Z far value.
    pub fn depth(mut self, depth: &DepthBuffer) -> Self {
        self.depth = Some(DepthAttachment {
            view: depth.view.clone(),
            clear_value: DepthBuffer::CLEAR_VALUE,
        });
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Begin the pass on `encoder`, rendering into `color_view`.
    pub fn begin<'encoder>(
        &self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
    ) -> wgpu::RenderPass<'encoder> {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth
                .as_ref()
                .map(|depth| wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(depth.clear_value),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: self.label,
                color_attachments: &[Some(color_attachment)],
                depth_stencil_attachment,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            })
    }
}

/// One frame's command encoder and the surface texture it renders into.
///
/// [`submit`](Self::submit) consumes the encoder, so a frame cannot be
/// submitted or presented twice.
pub struct FrameEncoder {
    encoder: wgpu::CommandEncoder,
    queue: Arc<wgpu::Queue>,
    surface_texture: wgpu::SurfaceTexture,
    surface_view: wgpu::TextureView,
}

impl FrameEncoder {
    pub fn new(
        device: &wgpu::Device,
        queue: Arc<wgpu::Queue>,
        surface_texture: wgpu::SurfaceTexture,
    ) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder,
            queue,
            surface_texture,
            surface_view,
        }
    }

    /// Begin a render pass targeting the surface.
    pub fn begin_render_pass(&mut self, builder: &RenderPassBuilder) -> wgpu::RenderPass<'_> {
        builder.begin(&mut self.encoder, &self.surface_view)
    }

    /// Record a copy of the surface as it stands after the passes encoded so far.
    pub fn copy_surface_to_buffer(
        &mut self,
        device: &wgpu::Device,
        layout: PixelLayout,
    ) -> TextureReadback {
        encode_texture_readback(device, &mut self.encoder, &self.surface_texture.texture, layout)
    }

    /// Submit the recorded commands, then present the surface texture.
    pub fn submit(self) -> wgpu::SubmissionIndex {
        let index = self.queue.submit([self.encoder.finish()]);
        self.surface_texture.present();
        index
    }
}
