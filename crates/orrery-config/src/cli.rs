//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Sun, Earth and Moon as spinning cubes")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Simulated days advanced per frame.
    #[arg(long)]
    pub day_step: Option<f64>,

    /// Directory captured frames are written to.
    #[arg(long)]
    pub capture_dir: Option<PathBuf>,

    /// Filename prefix for captured frames.
    #[arg(long)]
    pub capture_prefix: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(step) = args.day_step {
            self.simulation.day_step = step;
        }
        if let Some(ref dir) = args.capture_dir {
            self.capture.output_dir = dir.clone();
        }
        if let Some(ref prefix) = args.capture_prefix {
            self.capture.prefix = prefix.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
