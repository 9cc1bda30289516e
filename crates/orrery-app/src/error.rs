//! Application-level errors. Any of these ends the run with a non-zero exit.

use orrery_config::ConfigError;
use orrery_render::{RenderContextError, ShaderError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("could not create directory {path}: {source}")]
    CreateDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("unknown key name '{name}' for {binding}")]
    UnknownKey { binding: &'static str, name: String },

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Gpu(#[from] RenderContextError),

    #[error("shader loading failed: {0}")]
    Shader(#[from] ShaderError),
}
