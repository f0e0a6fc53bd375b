#![cfg(not(target_arch = "wasm32"))]

use crate::create_app;
use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG` (defaults to `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
    {
        tracing::debug!("keeping existing subscriber: {e}");
    }
}

/// Entry point used by the native executable.
pub fn run() -> eframe::Result<()> {
    init_logging();
    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Schema Mapper",
        native_options,
        Box::new(|cc| Ok(Box::new(create_app(cc)))),
    )
}
