//! wgpu rendering for the orrery: device and surface setup, the unlit
//! pipeline, per-body uniforms and frame readback for captures.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod drawable;
pub mod gpu;
pub mod pass;
pub mod pipeline;
pub mod readback;
pub mod renderer;
pub mod shader;

pub use buffer::{BufferAllocator, MeshBuffer};
pub use camera::{Camera, CameraUniform};
pub use depth::DepthBuffer;
pub use drawable::BodyDrawable;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder};
pub use pipeline::{ModelUniform, UnlitPipeline};
pub use readback::{ReadbackError, TextureReadback, encode_texture_readback, readback_layout};
pub use renderer::{FrameOutcome, RenderError, SceneRenderer};
pub use shader::{ShaderError, ShaderLibrary, UNLIT_SHADER_NAME, UNLIT_SHADER_SOURCE};
