use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_DIR;

/// Initializes the logging system with both console and file output.
pub fn init_logging() {
    let _ = fs::create_dir_all(LOG_DIR);

    // Daily rotation, written off the main thread
    let file_appender = tracing_appender::rolling::daily(LOG_DIR, "sfc_scraper.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sfc_license_scraper=info"));

    // try_init so tests and repeated calls don't panic on an existing subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    // Keep the writer alive for the life of the process so logs flush on exit
    std::mem::forget(guard);
}
