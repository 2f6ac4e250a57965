//! # basket-cli Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging)
//! 3. Load pricing config (defaults → file → environment)
//! 4. Build the catalogue and calculators
//! 5. Run the subcommand against stdout
//!
//! ## Usage
//! ```bash
//! basket-cli demo
//! basket-cli price R01 R01 B01
//! basket-cli price R01 G01 --json
//! basket-cli --config ./basket.toml catalogue
//! ```

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use basket_cli::cli::Args;
use basket_cli::config::PricingConfig;
use basket_cli::{commands, init_tracing};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    debug!(?args, "Starting basket-cli");

    let config =
        PricingConfig::load(args.config.clone()).context("Failed to load pricing config")?;
    let rules = config.build().context("Failed to build pricing rules")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&args.command, &rules, &mut out)
}
