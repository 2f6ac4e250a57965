//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "basket-cli")]
#[command(about = "Price shopping baskets against a catalogue, offer and delivery tiers")]
#[command(version)]
pub struct Args {
    /// Enable verbose logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pricing configuration file (TOML)
    #[arg(short, long, global = true, env = "BASKET_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Price the four reference baskets
    Demo,

    /// Price one basket made of the given product codes
    Price {
        /// Product codes, one per unit (repeat a code for several units)
        #[arg(required = true)]
        codes: Vec<String>,

        /// Print the full breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the configured catalogue
    Catalogue,
}
