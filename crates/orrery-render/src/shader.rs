//! Shader source loading.
//!
//! The unlit shader ships embedded in the binary. When a shader directory is
//! configured, `.wgsl` files there take precedence so the shader can be edited
//! without rebuilding.

use std::path::PathBuf;

use log::{debug, info};
use thiserror::Error;
use wgpu::{ShaderModuleDescriptor, ShaderSource};

/// Label of the unlit shader module.
pub const UNLIT_SHADER_NAME: &str = "unlit";

/// Embedded WGSL for the unlit pipeline.
pub const UNLIT_SHADER_SOURCE: &str = include_str!("../shaders/unlit.wgsl");

const UNLIT_SHADER_FILE: &str = "unlit.wgsl";

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read shader file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Where shader source comes from: the binary, or an optional directory.
#[derive(Debug, Clone, Default)]
pub struct ShaderLibrary {
    shader_dir: Option<PathBuf>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory to load `.wgsl` files from.
    pub fn with_shader_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shader_dir = Some(dir.into());
        self
    }

    pub fn shader_dir(&self) -> Option<&PathBuf> {
        self.shader_dir.as_ref()
    }

    /// The unlit shader: from `unlit.wgsl` in the shader directory when one is
    /// configured, otherwise the embedded copy.
    pub fn load_unlit(&self, device: &wgpu::Device) -> Result<wgpu::ShaderModule, ShaderError> {
        let source = self.unlit_source()?;
        info!("Loaded shader '{UNLIT_SHADER_NAME}'");
        Ok(device.create_shader_module(ShaderModuleDescriptor {
            label: Some(UNLIT_SHADER_NAME),
            source: ShaderSource::Wgsl(source.into()),
        }))
    }

    /// WGSL text for the unlit shader, without compiling it.
    pub fn unlit_source(&self) -> Result<String, ShaderError> {
        let Some(dir) = &self.shader_dir else {
            debug!("Using embedded shader '{UNLIT_SHADER_NAME}'");
            return Ok(UNLIT_SHADER_SOURCE.to_string());
        };
        let path = dir.join(UNLIT_SHADER_FILE);
        debug!("Loading shader '{UNLIT_SHADER_NAME}' from file: {}", path.display());
        if !path.exists() {
            return Err(ShaderError::FileNotFound { path });
        }
        Ok(std::fs::read_to_string(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_device;

    #[test]
    fn test_embedded_source_declares_uniforms_and_entry_points() {
        for needle in [
            "fn vs_main",
            "fn fs_main",
            "model: mat4x4<f32>",
            "view: mat4x4<f32>",
            "projection: mat4x4<f32>",
            "@location(1) color: vec3<f32>",
        ] {
            assert!(UNLIT_SHADER_SOURCE.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn test_embedded_source_without_shader_dir() {
        let library = ShaderLibrary::new();
        assert!(library.shader_dir().is_none());
        assert_eq!(library.unlit_source().unwrap(), UNLIT_SHADER_SOURCE);
    }

    #[test]
    fn test_shader_dir_source_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let edited = format!("// edited\n{UNLIT_SHADER_SOURCE}");
        std::fs::write(dir.path().join("unlit.wgsl"), &edited).unwrap();

        let library = ShaderLibrary::new().with_shader_dir(dir.path());
        assert_eq!(library.unlit_source().unwrap(), edited);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let library = ShaderLibrary::new().with_shader_dir(dir.path());
        let err = library.unlit_source().unwrap_err();
        assert!(matches!(err, ShaderError::FileNotFound { path } if path.ends_with("unlit.wgsl")));
    }

    #[test]
    fn test_load_embedded_unlit() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        assert!(ShaderLibrary::new().load_unlit(&device).is_ok());
    }

    #[test]
    fn test_load_unlit_from_directory() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("unlit.wgsl"), UNLIT_SHADER_SOURCE).unwrap();

        let library = ShaderLibrary::new().with_shader_dir(dir.path());
        assert!(library.load_unlit(&device).is_ok());
    }
}
