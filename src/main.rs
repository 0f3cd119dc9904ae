use anyhow::Result;
use log::info;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

use glquad::{config::DEFAULT_CONFIG_PATH, App, AppConfig};

fn main() -> Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let (config, found) = AppConfig::load_or_default(&config_path)?;

    SimpleLogger::new().with_level(config.log_level()?).init()?;
    if found {
        info!("Loaded configuration from {}", config_path.display());
    } else {
        info!("No configuration at {}, using defaults", config_path.display());
    }

    let (app, event_loop) = App::new(&config)?;
    app.run(event_loop)
}
