// src/logging.rs

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "golden_poly=debug,wgpu_core=warn"). `None` falls back to `RUST_LOG`, then
/// to `info`.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        cfg_if::cfg_if! {
            if #[cfg(target_arch = "wasm32")] {
                let _ = config;
                std::panic::set_hook(Box::new(console_error_panic_hook::hook));
                if console_log::init_with_level(log::Level::Warn).is_err() {
                    return;
                }
            } else {
                let mut builder = env_logger::Builder::new();
                if let Some(filter) = config.env_filter.as_deref() {
                    builder.parse_filters(filter);
                } else if let Ok(filter) = std::env::var("RUST_LOG") {
                    builder.parse_filters(&filter);
                } else {
                    builder.filter_level(log::LevelFilter::Info);
                }
                // Tests and embedders may have installed a logger already.
                if builder.try_init().is_err() {
                    return;
                }
            }
        }
        log::debug!("logging initialized");
    });
}
