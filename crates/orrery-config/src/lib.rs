//! Configuration system for the orrery.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line via clap, and tolerate missing or unknown fields so older files keep
//! loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CaptureConfig, Config, ConfigOrigin, DebugConfig, InputConfig, RenderConfig, SimulationConfig, WindowConfig,
    default_config_dir,
};
pub use error::ConfigError;
