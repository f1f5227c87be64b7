//! Panic hook for crash reporting

use backtrace::Backtrace;
use chrono::{DateTime, Local};
use std::panic::PanicHookInfo;
use std::path::PathBuf;

/// Initialize the panic hook for crash reporting
pub fn init_panic_hook() {
    std::panic::set_hook(Box::new(panic_handler));
    tracing::debug!("Panic hook initialized");
}

fn panic_handler(info: &PanicHookInfo) {
    let backtrace = Backtrace::new();
    let thread = std::thread::current();
    let thread_name = thread.name().unwrap_or("<unnamed>");
    let now = Local::now();

    let payload = info
        .payload()
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "<unknown>".to_string());
    let location = info
        .location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
        .unwrap_or_else(|| "<unknown>".to_string());

    let report = format_crash_report(&now, thread_name, &location, &payload, &format!("{:?}", backtrace));

    eprintln!("{}", report);
    tracing::error!("{}", report);

    let dump_path = crash_dump_path(&now);
    if let Err(e) = std::fs::write(&dump_path, &report) {
        eprintln!("Failed to write crash dump: {}", e);
    }
}

/// Build the text of a crash report
pub fn format_crash_report(
    timestamp: &DateTime<Local>,
    thread_name: &str,
    location: &str,
    payload: &str,
    backtrace: &str,
) -> String {
    format!(
        "=== CRITICAL PANIC ===\n\
         Timestamp: {}\n\
         Thread: {}\n\
         Location: {}\n\
         Payload: {}\n\n\
         Stack Trace:\n{}",
        timestamp.to_rfc3339(),
        thread_name,
        location,
        payload,
        backtrace
    )
}

/// Crash dump file in the temp directory, stamped with `timestamp`
pub fn crash_dump_path(timestamp: &DateTime<Local>) -> PathBuf {
    std::env::temp_dir().join(format!(
        "effect_slider_crash_{}.txt",
        timestamp.format("%Y%m%d_%H%M%S")
    ))
}
