// src/log.rs
//! Logging shorthands over `tracing`.
//!
//! The library only emits events; installing a subscriber is the binary's job
//! (see `init`, available with the `cli` feature).

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
/// `verbose` raises the default to `debug` for this crate.
#[cfg(feature = "cli")]
pub fn init(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let fallback = if verbose { "warn,enalotto_scrape=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (tests, embedding) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
