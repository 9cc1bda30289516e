//! Flat-colored cube geometry and the vertex format it is uploaded in.

pub mod cube;
pub mod vertex;

pub use cube::{CUBE_INDEX_COUNT, CUBE_INDICES, CUBE_VERTEX_COUNT, generate_cube};
pub use vertex::{VERTEX_ATTRIBUTES, VERTEX_LAYOUT, VertexPositionColor};
