//! Effect Slider - headless slideshow host
//!
//! Reads key names and commands from stdin and drives the slide effect controller.

mod app;

use anyhow::Result;
use slider_core::SliderConfig;

fn main() -> Result<()> {
    let (config, load_error) = match SliderConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (SliderConfig::default(), Some(e)),
    };

    // Initialize logging and panic hook first
    let _log_guard = slider_log::init(&config.log.level)?;

    if let Some(e) = load_error {
        tracing::warn!("Failed to load configuration: {}. Using defaults.", e);
    }

    if let Err(e) = slider_log::cleanup_old_logs(config.log.retention_days) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("Effect Slider starting...");

    app::run(config)
}
