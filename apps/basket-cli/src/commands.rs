//! # Commands
//!
//! One function per subcommand. Each writes to any `io::Write` so the
//! output can be checked in tests without a terminal.
//!
//! ## Flow
//! ```text
//! Command::Demo      ──► demo()      ──► "Test case: ..." / "Total: ..."  × 4
//! Command::Price     ──► price()     ──► "Total: ..." or JSON breakdown
//! Command::Catalogue ──► catalogue() ──► one line per product
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use basket_core::BasketTotals;
use serde::Serialize;
use tracing::info;

use crate::cli::Command;
use crate::config::PricingRules;

/// The reference baskets priced by `demo`.
pub const DEMO_BASKETS: [&[&str]; 4] = [
    &["B01", "G01"],
    &["R01", "R01"],
    &["R01", "G01"],
    &["B01", "B01", "R01", "R01", "R01"],
];

/// Dispatches a parsed command.
pub fn run<W: Write>(command: &Command, rules: &PricingRules, out: &mut W) -> Result<()> {
    match command {
        Command::Demo => demo(rules, out),
        Command::Price { codes, json } => price(rules, codes, *json, out),
        Command::Catalogue => catalogue(rules, out),
    }
}

/// Prices each reference basket in a fresh basket.
pub fn demo<W: Write>(rules: &PricingRules, out: &mut W) -> Result<()> {
    for codes in DEMO_BASKETS {
        let mut basket = rules.basket();
        for code in codes {
            basket
                .add(code)
                .with_context(|| format!("demo basket {}", codes.join(", ")))?;
        }

        writeln!(out, "Test case: {}", codes.join(", "))?;
        writeln!(out, "Total: {}", rules.format(basket.total()))?;
        writeln!(out)?;
    }
    info!(baskets = DEMO_BASKETS.len(), "Demo complete");
    Ok(())
}

/// JSON shape of `price --json`. Amounts are decimal strings so a half
/// cent discount survives intact.
#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    codes: &'a [String],
    item_count: usize,
    subtotal: String,
    discount: String,
    delivery_charge: String,
    total: String,
}

impl<'a> PriceReport<'a> {
    fn new(codes: &'a [String], totals: &BasketTotals) -> Self {
        PriceReport {
            codes,
            item_count: totals.item_count,
            subtotal: totals.subtotal.to_decimal_string(),
            discount: totals.discount.to_decimal_string(),
            delivery_charge: totals.delivery_charge.to_decimal_string(),
            total: totals.total.to_decimal_string(),
        }
    }
}

/// Prices one basket. Unknown codes abort before anything is printed.
pub fn price<W: Write>(
    rules: &PricingRules,
    codes: &[String],
    json: bool,
    out: &mut W,
) -> Result<()> {
    let mut basket = rules.basket();
    basket.add_all(codes)?;
    let totals = basket.totals();

    if json {
        let report = PriceReport::new(codes, &totals);
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "Total: {}", rules.format(totals.total))?;
    }
    Ok(())
}

/// Lists every product with its price.
pub fn catalogue<W: Write>(rules: &PricingRules, out: &mut W) -> Result<()> {
    for product in rules.catalogue.iter() {
        writeln!(
            out,
            "{:<6} {:<20} {:>10}",
            product.code(),
            product.name(),
            rules.format(product.price())
        )?;
    }
    Ok(())
}
