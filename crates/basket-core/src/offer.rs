//! # Offers
//!
//! Promotional discounts computed from the items in a basket.
//!
//! ## Red Widget Offer
//! "Buy one red widget, get the second half price."
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  red widgets in basket   complete pairs   discount                      │
//! │  ─────────────────────   ──────────────   ────────                      │
//! │          0 / 1                 0          $0.00                         │
//! │          2 / 3                 1          $16.475                       │
//! │          4 / 5                 2          $32.95                        │
//! │                                                                         │
//! │  discount = floor(count / 2) × (unit price × discount share)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The unit price is a parameter of the calculator, fixed when it is built.
//! It is never read from the basket's products at calculation time, so a
//! calculator keeps pricing the offer the same way for every basket it
//! serves. Use [`OfferCalculator::from_catalogue`] to take the price from a
//! catalogue entry once, up front.

use tracing::trace;

use crate::catalogue::Catalogue;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_code, validate_discount_bps, MAX_AMOUNT_CENTS};
use crate::RED_WIDGET;

/// Half price, in basis points.
pub const HALF_PRICE_BPS: u32 = 5000;

/// Unit price the red widget offer is configured with.
pub const RED_WIDGET_UNIT_PRICE: Money = Money::from_cents(3295);

// =============================================================================
// Policy Trait
// =============================================================================

/// Something that discounts a basket.
///
/// Implementations must be pure and never return a negative amount.
pub trait OfferPolicy {
    /// Returns the total discount for the given items.
    fn discount(&self, items: &[&Product]) -> Money;
}

// =============================================================================
// Pair Offer
// =============================================================================

/// "Buy one, get the second at a discount" for a single product code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferCalculator {
    product_code: String,
    unit_price: Money,
    discount_bps: u32,
}

impl OfferCalculator {
    /// Builds an offer for `product_code`, discounting every second unit by
    /// `discount_bps` of `unit_price`.
    pub fn new(
        product_code: impl Into<String>,
        unit_price: Money,
        discount_bps: u32,
    ) -> CoreResult<Self> {
        let product_code = product_code.into();
        validate_code(&product_code)?;
        if unit_price.is_negative() || unit_price > Money::from_cents(MAX_AMOUNT_CENTS) {
            return Err(ValidationError::OutOfRange {
                field: "unit_price".to_string(),
                min: 0,
                max: MAX_AMOUNT_CENTS,
            }
            .into());
        }
        validate_discount_bps(discount_bps)?;
        Ok(OfferCalculator {
            product_code,
            unit_price,
            discount_bps,
        })
    }

    /// The red widget offer: second R01 half price, at $32.95 a unit.
    pub fn red_widget() -> Self {
        OfferCalculator {
            product_code: RED_WIDGET.to_string(),
            unit_price: RED_WIDGET_UNIT_PRICE,
            discount_bps: HALF_PRICE_BPS,
        }
    }

    /// Builds an offer whose unit price is taken from the catalogue entry
    /// for `product_code`.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Catalogue, OfferCalculator};
    ///
    /// let offer = OfferCalculator::from_catalogue(&Catalogue::reference(), "R01", 5000).unwrap();
    /// assert_eq!(offer, OfferCalculator::red_widget());
    ///
    /// assert!(OfferCalculator::from_catalogue(&Catalogue::reference(), "X99", 5000).is_err());
    /// ```
    pub fn from_catalogue(
        catalogue: &Catalogue,
        product_code: &str,
        discount_bps: u32,
    ) -> CoreResult<Self> {
        let product = catalogue
            .get(product_code)
            .ok_or_else(|| CoreError::ProductNotFound(product_code.to_string()))?;
        OfferCalculator::new(product.code(), product.price(), discount_bps)
    }

    /// Returns the discount earned by `items`.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    /// use basket_core::{OfferCalculator, Product};
    ///
    /// let red = Product::new("R01", "Red Widget", 3295);
    /// let offer = OfferCalculator::red_widget();
    ///
    /// assert_eq!(offer.apply_red_widget_offer(&[&red]), Money::zero());
    /// assert_eq!(offer.apply_red_widget_offer(&[&red, &red]), Money::from_mills(16475));
    /// ```
    pub fn apply_red_widget_offer(&self, items: &[&Product]) -> Money {
        let count = items
            .iter()
            .filter(|product| product.code() == self.product_code)
            .count();

        if count < 2 {
            return Money::zero();
        }

        let pairs = (count / 2) as i64;
        let discount = self.discount_per_pair() * pairs;
        trace!(
            code = %self.product_code,
            count,
            pairs,
            discount = %discount.to_decimal_string(),
            "Offer applied"
        );
        discount
    }

    /// Amount taken off for each complete pair.
    pub fn discount_per_pair(&self) -> Money {
        self.unit_price.percentage(self.discount_bps)
    }

    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn discount_bps(&self) -> u32 {
        self.discount_bps
    }
}

impl Default for OfferCalculator {
    fn default() -> Self {
        OfferCalculator::red_widget()
    }
}

impl OfferPolicy for OfferCalculator {
    fn discount(&self, items: &[&Product]) -> Money {
        self.apply_red_widget_offer(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
