use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// Off wasm32 a `RUST_LOG` filter, when set, takes precedence over `level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        install(config.level);
        log::debug!("logging initialized");
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn install(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();

    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(level);
    }

    // Another logger may already be installed, e.g. by a host test harness.
    let _ = builder.try_init();
}

#[cfg(target_arch = "wasm32")]
fn install(level: LevelFilter) {
    if log::set_logger(&console::LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Browser console backend; `env_logger` output is discarded on
/// `wasm32-unknown-unknown`.
#[cfg(target_arch = "wasm32")]
pub mod console {
    use log::{Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    /// Writes each record as `[LEVEL target] message`.
    #[derive(Debug, Default)]
    pub struct ConsoleLogger;

    pub(crate) fn format(record: &Record) -> String {
        format!("[{} {}] {}", record.level(), record.target(), record.args())
    }

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let msg = JsValue::from_str(&format(record));
            match record.level() {
                log::Level::Error => web_sys::console::error_1(&msg),
                log::Level::Warn => web_sys::console::warn_1(&msg),
                log::Level::Info => web_sys::console::info_1(&msg),
                _ => web_sys::console::log_1(&msg),
            }
        }

        fn flush(&self) {}
    }
}
