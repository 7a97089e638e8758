//! Diagnostics via `tracing-subscriber`.
//!
//! The library emits `tracing` events; this module decides where they go.
//! Logs always go to stderr so stdout stays clean for command output.
//!
//! | Flag   | Level |
//! |--------|-------|
//! | (none) | warn  |
//! | `-v`   | info  |
//! | `-vv`  | debug |
//! | `-vvv` | trace |
//!
//! `RUST_LOG`, when set, replaces the computed filter entirely.

use std::io::{self, IsTerminal};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
}

impl LogConfig {
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            with_ansi: io::stderr().is_terminal(),
        }
    }
}

/// Installs the global subscriber. A second call is ignored.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.level >= Level::DEBUG)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Dependencies (reqwest, hyper) stay at warn.
        EnvFilter::new(format!("warn,sheet={level},sheetapp={level}"))
    })
}
