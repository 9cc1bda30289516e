//! Configuration structs with defaults matching the reference scene, plus RON
//! persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "orrery";
const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Camera, clear color and shader settings.
    pub render: RenderConfig,
    /// Simulated time settings.
    pub simulation: SimulationConfig,
    /// Frame capture settings.
    pub capture: CaptureConfig,
    /// Key bindings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Linear RGB clear color.
    pub clear_color: [f64; 3],
    /// Camera position in world space.
    pub camera_eye: [f32; 3],
    /// Point the camera looks at.
    pub camera_target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Directory to load `unlit.wgsl` from instead of the embedded copy.
    pub shader_dir: Option<PathBuf>,
}

/// Simulated time configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated days added per rendered frame.
    pub day_step: f64,
}

/// Frame capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    /// Filename prefix for captured frames.
    pub prefix: String,
    /// Directory captured frames are written to.
    pub output_dir: PathBuf,
    /// Append the capture ordinal to the filename. When false every capture
    /// overwrites `<prefix>.ppm`.
    pub numbered_filenames: bool,
}

/// Key bindings, as winit `KeyCode` names (e.g. "Escape", "KeyP", "F12").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Key that closes the window.
    pub quit_key: String,
    /// Key that saves the current frame.
    pub capture_key: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log the body positions every N frames (0 disables).
    pub log_positions_every: u64,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 576,
            title: "Solar System".to_string(),
            vsync: true,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.3, 0.4, 0.5],
            camera_eye: [30.0, 20.0, 90.0],
            camera_target: [0.0, 0.0, 0.0],
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            shader_dir: None,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            day_step: 1.0 / 24.0,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            prefix: "solarSystem".to_string(),
            output_dir: PathBuf::from("."),
            numbered_filenames: true,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            quit_key: "Escape".to_string(),
            capture_key: "KeyP".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_positions_every: 0,
        }
    }
}

/// The platform config directory for the orrery (`<os config dir>/orrery`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

/// Where [`Config::load_or_create`] got its config from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing file.
    Loaded(PathBuf),
    /// No file existed; defaults were written here.
    Created(PathBuf),
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigOrigin::Loaded(path) => write!(f, "Loaded config from {}", path.display()),
            ConfigOrigin::Created(path) => write!(f, "Created default config at {}", path.display()),
        }
    }
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    ///
    /// Nothing is logged here: this usually runs before the subscriber is
    /// installed, so the caller reports the returned [`ConfigOrigin`].
    pub fn load_or_create(config_dir: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            Ok((config, ConfigOrigin::Loaded(config_path)))
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            Ok((config, ConfigOrigin::Created(config_path)))
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-read the file; returns `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = std::fs::read_to_string(config_dir.join(CONFIG_FILE))
            .map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_scene() {
        let config = Config::default();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 576);
        assert_eq!(config.window.title, "Solar System");
        assert_eq!(config.render.camera_eye, [30.0, 20.0, 90.0]);
        assert!((config.simulation.day_step - 1.0 / 24.0).abs() < 1e-12);
        assert_eq!(config.capture.prefix, "solarSystem");
        assert_eq!(config.input.quit_key, "Escape");
        assert_eq!(config.input.capture_key, "KeyP");
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1024"));
        assert!(ron_str.contains("prefix: \"solarSystem\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (width: 800), render: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 576);
        assert_eq!(config.capture, CaptureConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.simulation.day_step = 0.5;
        config.capture.numbered_filenames = false;
        config.render.shader_dir = Some(PathBuf::from("shaders"));

        config.save(dir.path()).unwrap();
        let (loaded, origin) = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
        assert_eq!(origin, ConfigOrigin::Loaded(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn test_load_or_create_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let (config, origin) = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
        assert_eq!(origin, ConfigOrigin::Created(dir.path().join(CONFIG_FILE)));
        assert!(origin.to_string().starts_with("Created default config at "));
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.capture.prefix = "frame".to_string();
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.unwrap().capture.prefix, "frame");
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
