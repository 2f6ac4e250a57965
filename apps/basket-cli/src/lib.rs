//! # basket-cli Library
//!
//! Everything the `basket-cli` binary does, kept in a library so it can be
//! tested without spawning a process.
//!
//! ## Module Organization
//! ```text
//! basket_cli/
//! ├── lib.rs          ◄─── You are here (logging setup)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── PricingConfig (TOML + env) → PricingRules
//! └── commands.rs     ◄─── demo / price / catalogue
//! ```

pub mod cli;
pub mod commands;
pub mod config;

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `--verbose` logs at debug level for
/// the workspace crates and info elsewhere; the default shows warnings only.
/// Output goes to stderr so stdout carries nothing but results.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,basket_core=debug,basket_cli=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
