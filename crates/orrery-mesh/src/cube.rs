//! Eight-corner cube with one flat color.
//!
//! Every cube shares the same index list; only the extent and color differ.
//! The triangle winding is not consistent across faces, so pipelines drawing
//! these cubes must not cull back faces.

use glam::Vec3;

use crate::vertex::VertexPositionColor;

/// Vertices per cube.
pub const CUBE_VERTEX_COUNT: usize = 8;

/// Indices per cube (6 faces × 2 triangles × 3).
pub const CUBE_INDEX_COUNT: usize = 36;

/// Corner signs in vertex order.
const CORNERS: [[f32; 3]; CUBE_VERTEX_COUNT] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Triangle list shared by all cubes.
pub const CUBE_INDICES: [u32; CUBE_INDEX_COUNT] = [
    0, 1, 2, 2, 3, 0, // back
    4, 5, 6, 6, 7, 4, // front
    0, 1, 5, 5, 4, 0, // bottom
    2, 3, 7, 7, 6, 2, // top
    0, 3, 7, 7, 4, 0, // left
    1, 2, 6, 6, 5, 1, // right
];

/// Build a cube of edge length `size` centered on the origin, every corner
/// tagged with `color`.
pub fn generate_cube(size: f32, color: Vec3) -> (Vec<VertexPositionColor>, Vec<u32>) {
    let half = size / 2.0;
    let color = color.to_array();

    let vertices = CORNERS
        .iter()
        .map(|[x, y, z]| VertexPositionColor {
            position: [x * half, y * half, z * half],
            color,
        })
        .collect();

    (vertices, CUBE_INDICES.to_vec())
}
