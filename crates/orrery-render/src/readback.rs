//! GPU texture to CPU frame readback.
//!
//! The copy is recorded into the frame's encoder; mapping happens after
//! submit by blocking on the device.

use std::sync::mpsc;

use orrery_capture::{CapturedFrame, PixelLayout, PpmError};

#[derive(Debug, thiserror::Error)]
pub enum ReadbackError {
    #[error("failed to map readback buffer: {0}")]
    Map(#[from] wgpu::BufferAsyncError),

    #[error("device poll failed while waiting for readback: {0}")]
    Poll(#[from] wgpu::PollError),

    #[error("readback callback was dropped before completing")]
    Cancelled,

    #[error("readback produced an invalid frame: {0}")]
    Frame(#[from] PpmError),

    #[error("cannot capture surface format {0:?}, only 8-bit RGBA/BGRA is supported")]
    UnsupportedFormat(wgpu::TextureFormat),
}

/// Pixel layout to read `format` back with.
pub fn readback_layout(format: wgpu::TextureFormat) -> Result<PixelLayout, ReadbackError> {
    crate::gpu::pixel_layout(format).ok_or(ReadbackError::UnsupportedFormat(format))
}

/// A pending copy of a texture into a mappable buffer.
pub struct TextureReadback {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
    layout: PixelLayout,
}

/// Row pitch for a copy of `width` 4-byte texels.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

/// Record a copy of mip 0 of `texture` into a new readback buffer.
pub fn encode_texture_readback(
    device: &wgpu::Device,
    encoder: &mut wgpu::CommandEncoder,
    texture: &wgpu::Texture,
    layout: PixelLayout,
) -> TextureReadback {
    let width = texture.width();
    let height = texture.height();
    let padded = padded_bytes_per_row(width);

    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("capture-readback"),
        size: u64::from(padded) * u64::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    TextureReadback {
        buffer,
        width,
        height,
        padded_bytes_per_row: padded,
        layout,
    }
}

impl TextureReadback {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Map the buffer and convert it to a top-down RGB frame.
    ///
    /// Must be called after the encoder holding the copy has been submitted.
    pub fn read(self, device: &wgpu::Device) -> Result<CapturedFrame, ReadbackError> {
        let slice = self.buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device.poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: None,
        })?;
        rx.recv().map_err(|_| ReadbackError::Cancelled)??;

        let frame = {
            let mapped = slice.get_mapped_range();
            CapturedFrame::from_padded_rows(
                &mapped,
                self.width,
                self.height,
                self.padded_bytes_per_row,
                self.layout,
            )?
        };
        self.buffer.unmap();
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::RenderPassBuilder;
    use crate::test_support::create_test_device;

    #[test]
    fn test_readback_layout_for_surface_formats() {
        assert_eq!(
            readback_layout(wgpu::TextureFormat::Bgra8Unorm).unwrap(),
            PixelLayout::Bgra8
        );
        assert_eq!(
            readback_layout(wgpu::TextureFormat::Rgba8UnormSrgb).unwrap(),
            PixelLayout::Rgba8
        );
        assert!(matches!(
            readback_layout(wgpu::TextureFormat::Rgba16Float),
            Err(ReadbackError::UnsupportedFormat(wgpu::TextureFormat::Rgba16Float))
        ));
        assert!(matches!(
            readback_layout(wgpu::TextureFormat::Rgb10a2Unorm),
            Err(ReadbackError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_padded_row_alignment() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(1024), 4096);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    fn clear_and_read(format: wgpu::TextureFormat, layout: PixelLayout) -> Option<CapturedFrame> {
        let (device, queue) = create_test_device()?;
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("readback-target"),
            size: wgpu::Extent3d {
                width: 70,
                height: 3,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
        let clear = wgpu::Color {
            r: 1.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        };
        drop(RenderPassBuilder::new().clear_color(clear).begin(&mut encoder, &view));
        let readback = encode_texture_readback(&device, &mut encoder, &texture, layout);
        queue.submit([encoder.finish()]);

        Some(readback.read(&device).unwrap())
    }

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    /// A 2x2 texture whose top row is red and bottom row is blue.
    fn read_two_row_texture(format: wgpu::TextureFormat, layout: PixelLayout) -> Option<CapturedFrame> {
        let (device, queue) = create_test_device()?;
        let size = wgpu::Extent3d {
            width: 2,
            height: 2,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("two-row-target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        let (top, bottom) = match layout {
            PixelLayout::Rgba8 => (RED, BLUE),
            PixelLayout::Bgra8 => (BLUE, RED),
        };
        let texels: Vec<u8> = [top, top, bottom, bottom].concat();
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &texels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(8),
                rows_per_image: Some(2),
            },
            size,
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
        let readback = encode_texture_readback(&device, &mut encoder, &texture, layout);
        queue.submit([encoder.finish()]);
        Some(readback.read(&device).unwrap())
    }

    #[test]
    fn test_first_row_read_back_is_visual_top() {
        let Some(frame) = read_two_row_texture(wgpu::TextureFormat::Rgba8Unorm, PixelLayout::Rgba8)
        else {
            return;
        };
        assert_eq!(frame.row_order(), orrery_capture::RowOrder::TopDown);
        assert_eq!(frame.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(frame.pixel(1, 0), Some([255, 0, 0]));
        assert_eq!(frame.pixel(0, 1), Some([0, 0, 255]));
        assert_eq!(frame.pixel(1, 1), Some([0, 0, 255]));
    }

    #[test]
    fn test_bgra_rows_keep_order_after_swizzle() {
        let Some(frame) = read_two_row_texture(wgpu::TextureFormat::Bgra8Unorm, PixelLayout::Bgra8)
        else {
            return;
        };
        assert_eq!(frame.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(frame.pixel(0, 1), Some([0, 0, 255]));
    }

    #[test]
    fn test_saved_capture_starts_with_top_row_and_reads_back() {
        let Some(frame) = read_two_row_texture(wgpu::TextureFormat::Rgba8Unorm, PixelLayout::Rgba8)
        else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let mut session = orrery_capture::CaptureSession::new(dir.path(), "solarSystem", true);
        let path = session.save(&frame).unwrap();
        assert_eq!(path, dir.path().join("solarSystem0.ppm"));

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("2 2"));
        assert_eq!(lines.next(), Some("255"));
        assert_eq!(lines.next(), Some("255 0 0 255 0 0 "));
        assert_eq!(lines.next(), Some("0 0 255 0 0 255 "));

        let reread = orrery_capture::read_ppm(text.as_bytes()).unwrap();
        assert_eq!(reread.as_bytes(), frame.as_bytes());
    }

    #[test]
    fn test_cleared_capture_round_trips_through_disk() {
        let Some(frame) = clear_and_read(wgpu::TextureFormat::Rgba8Unorm, PixelLayout::Rgba8)
        else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let mut session = orrery_capture::CaptureSession::new(dir.path(), "frame", true);
        let path = session.save(&frame).unwrap();

        let file = std::fs::File::open(path).unwrap();
        let reread = orrery_capture::read_ppm(file).unwrap();
        assert_eq!((reread.width(), reread.height()), (70, 3));
        for y in 0..3 {
            for x in 0..70 {
                assert_eq!(reread.pixel(x, y), Some([255, 0, 0]));
            }
        }
    }

    #[test]
    fn test_rgba_texture_reads_back_clear_color() {
        let Some(frame) = clear_and_read(wgpu::TextureFormat::Rgba8Unorm, PixelLayout::Rgba8)
        else {
            return;
        };
        assert_eq!((frame.width(), frame.height()), (70, 3));
        assert_eq!(frame.as_bytes().len(), 70 * 3 * 3);
        assert_eq!(frame.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(frame.pixel(69, 2), Some([255, 0, 0]));
    }

    #[test]
    fn test_bgra_texture_is_swizzled() {
        let Some(frame) = clear_and_read(wgpu::TextureFormat::Bgra8Unorm, PixelLayout::Bgra8)
        else {
            return;
        };
        assert_eq!(frame.pixel(35, 1), Some([255, 0, 0]));
    }
}
