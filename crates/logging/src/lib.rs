#![warn(missing_docs)]

//! Shared logging helpers, CLI argument definitions, and tracing setup for
//! the windnav workspace.
//!
//! Filter precedence, highest first: `--log-filter`, `--trace`, `--debug`,
//! `--log-level`, `RUST_LOG`, then the level from the config file.

use std::{
    env,
    io::{self, IsTerminal},
};

use clap::Args;
use config::{ColorMode, LoggingConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Set a single global log level for our crates (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "windnav_engine=trace,config=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// Compute the filter spec for these arguments, falling back to `fallback_level`.
    pub fn spec(&self, fallback_level: &str) -> String {
        compute_spec(
            self.trace,
            self.debug,
            self.log_level.as_deref(),
            self.log_filter.as_deref(),
            fallback_level,
        )
    }
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &[
        "windnav",
        "windnav_engine",
        "windnav_world",
        "windnav_keys",
        "config",
        "logging",
    ]
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `log_filter`
/// - `trace`/`debug`/`log_level` (crate-scoped)
/// - `RUST_LOG` env
/// - crate-scoped `fallback_level`
pub fn compute_spec(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
    fallback_level: &str,
) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if trace {
        return level_spec_for("trace");
    }
    if debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = log_level {
        return level_spec_for(lvl);
    }
    match env::var("RUST_LOG") {
        Ok(spec) if !spec.trim().is_empty() => spec,
        _ => level_spec_for(fallback_level),
    }
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Whether log output should use ANSI color.
pub fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal(),
    }
}

/// Install the global subscriber: env filter plus compact fmt output on
/// stderr without timestamps.
///
/// Returns `false` when a subscriber was already installed.
pub fn init(spec: &str, color: ColorMode) -> bool {
    tracing_subscriber::registry()
        .with(env_filter_from_spec(spec))
        .with(
            fmt::layer()
                .without_time()
                .with_writer(io::stderr)
                .with_ansi(use_color(color)),
        )
        .try_init()
        .is_ok()
}

/// Install the subscriber from CLI arguments and the `[logging]` config section.
pub fn init_from(args: &LogArgs, logging: &LoggingConfig) -> bool {
    init(&args.spec(logging.level.as_str()), logging.color)
}
