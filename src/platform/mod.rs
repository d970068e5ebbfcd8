//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup (browser console vs. env_logger)
//! - The JS-facing session wrapper (WASM only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Install the global logger for this platform.
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Only fails if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the global logger for this platform.
///
/// Honours `RUST_LOG`, defaulting to `info`. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    use env_logger::{Builder, Env};

    let env = Env::default().default_filter_or("info");
    let _ = Builder::from_env(env).try_init();
}
