//! The `orrery` binary.

use clap::Parser;
use orrery_app::platform::PlatformDirs;
use orrery_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve platform directories: {e}");
            std::process::exit(1);
        }
    };

    // A broken config file should not keep the window from opening.
    let (mut config, loaded) = match Config::load_or_create(&dirs.config_dir) {
        Ok((config, origin)) => (config, Ok(origin)),
        Err(e) => (Config::default(), Err(e)),
    };
    config.apply_cli_overrides(&args);

    let log_dir = dirs.create().ok().map(|()| dirs.log_dir.as_path());
    orrery_log::init_logging(log_dir, cfg!(debug_assertions), Some(&config));

    match loaded {
        Ok(origin) => tracing::info!("{origin}"),
        Err(e) => tracing::warn!("Using default config: {e}"),
    }
    tracing::info!("Config directory: {}", dirs.config_dir.display());

    if let Err(e) = orrery_app::run(config) {
        tracing::error!("Orrery exited with an error: {e}");
        std::process::exit(1);
    }
}
