//! Effect Slider Logging & Observability Module
//!
//! Provides structured logging, rolling log files and crash reports.

mod logging;
mod panic_hook;

pub use logging::{cleanup_logs_in, cleanup_old_logs, init_logging, LogGuard};
pub use panic_hook::{crash_dump_path, format_crash_report, init_panic_hook};

use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the application log directory
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("dev", "EffectSlider", "EffectSlider")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialize logging and the panic hook.
///
/// `default_filter` is used when `RUST_LOG` is not set. The returned guard
/// flushes the file writer on drop and must outlive the event loop.
pub fn init(default_filter: &str) -> anyhow::Result<LogGuard> {
    let guard = init_logging(default_filter)?;
    init_panic_hook();
    Ok(guard)
}
