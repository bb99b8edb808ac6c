//! Logging backend for the `log` facade.
//!
//! `env_logger` writes to stderr on native targets; on `wasm32` records go to
//! the browser console.

mod init;

#[cfg(target_arch = "wasm32")]
pub use init::console::ConsoleLogger;
pub use init::{init_logging, LoggingConfig};
