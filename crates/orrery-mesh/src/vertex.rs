//! Interleaved position + color vertex record.
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | color    |

use std::mem;

use bytemuck::{Pod, Zeroable};
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// One cube corner: object-space position and linear RGB color.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPositionColor {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

static_assertions::assert_eq_size!(VertexPositionColor, [u8; 24]);

/// Attributes matching `@location(0)` and `@location(1)` in `unlit.wgsl`.
pub const VERTEX_ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: mem::size_of::<[f32; 3]>() as u64,
        shader_location: 1,
    },
];

/// Buffer layout for [`VertexPositionColor`].
pub const VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<VertexPositionColor>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &VERTEX_ATTRIBUTES,
};

impl VertexPositionColor {
    /// The vertex buffer layout for this vertex type.
    pub fn layout() -> VertexBufferLayout<'static> {
        VERTEX_LAYOUT
    }
}

/// Last attribute must fit within the stride.
const _: () = assert!(
    VERTEX_ATTRIBUTES[1].offset + 12 <= mem::size_of::<VertexPositionColor>() as u64,
    "color attribute exceeds vertex stride"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stride_is_six_floats() {
        let layout = VertexPositionColor::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.step_mode, VertexStepMode::Vertex);
    }

    #[test]
    fn test_attributes_match_shader_locations() {
        let layout = VertexPositionColor::layout();
        assert_eq!(layout.attributes.len(), 2);

        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, VertexFormat::Float32x3);

        assert_eq!(layout.attributes[1].shader_location, 1);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].format, VertexFormat::Float32x3);
    }

    #[test]
    fn test_cast_to_bytes_is_interleaved() {
        let v = VertexPositionColor {
            position: [1.0, 2.0, 3.0],
            color: [0.25, 0.5, 0.75],
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.25, 0.5, 0.75]);
    }
}
