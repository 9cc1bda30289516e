//! In-memory RGB frames read back from the color buffer.

use crate::error::PpmError;

/// Order in which scanlines are stored in a [`CapturedFrame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowOrder {
    /// First stored row is the visual top (wgpu texture copies).
    TopDown,
    /// First stored row is the visual bottom (GL-style framebuffer reads).
    BottomUp,
}

/// Byte layout of a 4-byte-per-pixel source buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    Rgba8,
    Bgra8,
}

/// Tightly packed 8-bit RGB pixels, `3 * width * height` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedFrame {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    row_order: RowOrder,
}

impl CapturedFrame {
    /// Wrap packed RGB bytes, checking the length against the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        rgb: Vec<u8>,
        row_order: RowOrder,
    ) -> Result<Self, PpmError> {
        let expected = byte_len(width, height)?;
        if rgb.len() != expected {
            return Err(PpmError::SizeMismatch {
                width,
                height,
                expected,
                actual: rgb.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgb,
            row_order,
        })
    }

    /// A frame where every pixel is `color`.
    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> Result<Self, PpmError> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            rgb: color.repeat(len / 3),
            row_order: RowOrder::TopDown,
        })
    }

    /// Build a top-down frame from a mapped texture copy.
    ///
    /// `data` holds `height` rows of `padded_row` bytes each, of which the
    /// first `4 * width` are pixels. Padding and alpha are dropped and BGRA is
    /// swizzled to RGB.
    pub fn from_padded_rows(
        data: &[u8],
        width: u32,
        height: u32,
        padded_row: u32,
        layout: PixelLayout,
    ) -> Result<Self, PpmError> {
        let too_large = PpmError::TooLarge { width, height };
        let row_bytes = (width as usize).checked_mul(4).ok_or(too_large)?;
        let padded_row = padded_row as usize;
        let needed = match height.checked_sub(1) {
            None => 0,
            Some(rows_before_last) => padded_row
                .checked_mul(rows_before_last as usize)
                .and_then(|n| n.checked_add(row_bytes))
                .ok_or(PpmError::TooLarge { width, height })?,
        };
        if padded_row < row_bytes || data.len() < needed {
            return Err(PpmError::SizeMismatch {
                width,
                height,
                expected: needed,
                actual: data.len(),
            });
        }

        let mut rgb = Vec::with_capacity(byte_len(width, height)?);
        for row in 0..height as usize {
            let start = row * padded_row;
            for px in data[start..start + row_bytes].chunks_exact(4) {
                match layout {
                    PixelLayout::Rgba8 => rgb.extend_from_slice(&[px[0], px[1], px[2]]),
                    PixelLayout::Bgra8 => rgb.extend_from_slice(&[px[2], px[1], px[0]]),
                }
            }
        }

        Ok(Self {
            width,
            height,
            rgb,
            row_order: RowOrder::TopDown,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    /// Raw packed bytes in storage order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgb
    }

    pub fn is_empty(&self) -> bool {
        self.rgb.is_empty()
    }

    /// Scanlines in visual order, top row first.
    pub fn rows_top_down(&self) -> Box<dyn Iterator<Item = &[u8]> + '_> {
        let rows = self.rgb.chunks_exact((self.width as usize * 3).max(1));
        match self.row_order {
            RowOrder::TopDown => Box::new(rows),
            RowOrder::BottomUp => Box::new(rows.rev()),
        }
    }

    /// Pixel at column `x`, visual row `y` (0 is the top).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let stored_row = match self.row_order {
            RowOrder::TopDown => y,
            RowOrder::BottomUp => self.height - 1 - y,
        };
        let i = (stored_row as usize * self.width as usize + x as usize) * 3;
        Some([self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]])
    }
}

fn byte_len(width: u32, height: u32) -> Result<usize, PpmError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(PpmError::TooLarge { width, height })
}
