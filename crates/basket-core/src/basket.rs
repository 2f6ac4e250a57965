//! # Basket
//!
//! A basket collects products by code and prices them with one offer
//! policy and one delivery policy.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket::total()                                  │
//! │                                                                         │
//! │  items ──► Σ price ─────────────────► subtotal          $65.90          │
//! │  items ──► OfferPolicy::discount ───► discount          $16.475         │
//! │                                                                         │
//! │  subtotal − discount ───────────────► adjusted          $49.425         │
//! │  DeliveryPolicy::delivery_charge(adjusted) ──► charge   $4.95           │
//! │                                                                         │
//! │  round_to_cents(adjusted + charge) ─► total             $54.38          │
//! │                                                                         │
//! │  Only the last step rounds. Everything before it is exact.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! A basket starts empty and only grows. `add` either appends exactly one
//! product or fails with [`CoreError::ProductNotFound`] and changes nothing.
//! `total` is read-only and returns the same value until the next `add`.
//!
//! ## Sharing
//! The catalogue and both policies are borrowed, so any number of baskets
//! can price against the same set of rules:
//! ```rust
//! use basket_core::{Basket, Catalogue, DeliveryCalculator, OfferCalculator};
//!
//! let catalogue = Catalogue::reference();
//! let delivery = DeliveryCalculator::standard();
//! let offer = OfferCalculator::red_widget();
//!
//! let mut first = Basket::new(&catalogue, &delivery, &offer);
//! first.add("B01").unwrap();
//! first.add("G01").unwrap();
//! assert_eq!(first.total().to_string(), "$37.85");
//!
//! let mut second = Basket::new(&catalogue, &delivery, &offer);
//! second.add("R01").unwrap();
//! second.add("R01").unwrap();
//! assert_eq!(second.total().to_string(), "$54.38");
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalogue::Catalogue;
use crate::delivery::{DeliveryCalculator, DeliveryPolicy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::offer::{OfferCalculator, OfferPolicy};
use crate::types::Product;

// =============================================================================
// Basket
// =============================================================================

/// Products selected for purchase, in the order they were added.
///
/// ## Invariants
/// - Every item was resolved from the bound catalogue
/// - Duplicates are separate units (two "R01" = two red widgets)
/// - Items are never removed
#[derive(Debug)]
pub struct Basket<'a, D = DeliveryCalculator, O = OfferCalculator> {
    catalogue: &'a Catalogue,
    delivery: &'a D,
    offer: &'a O,
    items: Vec<&'a Product>,
}

impl<'a, D, O> Basket<'a, D, O>
where
    D: DeliveryPolicy,
    O: OfferPolicy,
{
    /// Creates an empty basket bound to a catalogue and a rule set.
    pub fn new(catalogue: &'a Catalogue, delivery: &'a D, offer: &'a O) -> Self {
        Basket {
            catalogue,
            delivery,
            offer,
            items: Vec::new(),
        }
    }

    /// Adds one unit of the product with the given code.
    ///
    /// ## Errors
    /// `ProductNotFound(code)` if the catalogue has no such product. The
    /// basket is left exactly as it was.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Basket, Catalogue, CoreError, DeliveryCalculator, OfferCalculator};
    ///
    /// let catalogue = Catalogue::reference();
    /// let (delivery, offer) = (DeliveryCalculator::default(), OfferCalculator::default());
    /// let mut basket = Basket::new(&catalogue, &delivery, &offer);
    ///
    /// basket.add("R01").unwrap();
    /// assert_eq!(basket.add("X99"), Err(CoreError::ProductNotFound("X99".into())));
    /// assert_eq!(basket.len(), 1);
    /// ```
    pub fn add(&mut self, product_code: &str) -> CoreResult<()> {
        let product = self.resolve(product_code)?;
        self.items.push(product);
        debug!(code = product_code, items = self.items.len(), "Added to basket");
        Ok(())
    }

    /// Adds several codes at once. Either every code is added or, if any
    /// code is unknown, none are.
    pub fn add_all<I, S>(&mut self, product_codes: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolved = product_codes
            .into_iter()
            .map(|code| self.resolve(code.as_ref()))
            .collect::<CoreResult<Vec<_>>>()?;
        let added = resolved.len();
        self.items.extend(resolved);
        debug!(added, items = self.items.len(), "Added batch to basket");
        Ok(())
    }

    fn resolve(&self, product_code: &str) -> CoreResult<&'a Product> {
        self.catalogue.get(product_code).ok_or_else(|| {
            warn!(code = product_code, "Unknown product code");
            CoreError::ProductNotFound(product_code.to_string())
        })
    }

    /// Sum of item prices, before discounts and delivery.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|product| product.price()).sum()
    }

    /// Full price breakdown. Only `total` is rounded.
    pub fn totals(&self) -> BasketTotals {
        let subtotal = self.subtotal();
        let discount = self.offer.discount(&self.items);
        let adjusted = subtotal - discount;
        let delivery_charge = self.delivery.delivery_charge(adjusted);
        let total = (adjusted + delivery_charge).round_to_cents();

        debug!(
            items = self.items.len(),
            subtotal = %subtotal.to_decimal_string(),
            discount = %discount.to_decimal_string(),
            delivery = %delivery_charge.to_decimal_string(),
            total = %total,
            "Basket priced"
        );

        BasketTotals {
            item_count: self.items.len(),
            subtotal,
            discount,
            delivery_charge,
            total,
        }
    }

    /// Amount payable, rounded to whole cents (half away from zero).
    pub fn total(&self) -> Money {
        self.totals().total
    }

    /// Items in the order they were added.
    pub fn items(&self) -> &[&'a Product] {
        &self.items
    }

    /// Number of units in the basket.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Totals Summary
// =============================================================================

/// Price breakdown of a basket, for reports and JSON output.
///
/// `subtotal`, `discount` and `delivery_charge` are exact (the discount may
/// carry a half cent); `total` is rounded to whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BasketTotals {
    pub item_count: usize,
    pub subtotal: Money,
    pub discount: Money,
    pub delivery_charge: Money,
    pub total: Money,
}

impl<'a, D, O> From<&Basket<'a, D, O>> for BasketTotals
where
    D: DeliveryPolicy,
    O: OfferPolicy,
{
    fn from(basket: &Basket<'a, D, O>) -> Self {
        basket.totals()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Rules {
        catalogue: Catalogue,
        delivery: DeliveryCalculator,
        offer: OfferCalculator,
    }

    impl Rules {
        fn reference() -> Self {
            Rules {
                catalogue: Catalogue::reference(),
                delivery: DeliveryCalculator::standard(),
                offer: OfferCalculator::red_widget(),
            }
        }

        fn basket(&self) -> Basket<'_> {
            Basket::new(&self.catalogue, &self.delivery, &self.offer)
        }

        fn total_for(&self, codes: &[&str]) -> Money {
            let mut basket = self.basket();
            for code in codes {
                basket.add(code).unwrap();
            }
            basket.total()
        }
    }

    // -------------------------------------------------------------------------
    // Reference scenarios
    // -------------------------------------------------------------------------

    #[test]
    fn test_blue_and_green() {
        let rules = Rules::reference();
        assert_eq!(rules.total_for(&["B01", "G01"]), Money::from_cents(3785));
    }

    #[test]
    fn test_two_reds_rounds_half_up() {
        let rules = Rules::reference();
        let mut basket = rules.basket();
        basket.add_all(["R01", "R01"]).unwrap();

        let totals = basket.totals();
        assert_eq!(totals.subtotal, Money::from_cents(6590));
        assert_eq!(totals.discount, Money::from_mills(16475));
        assert_eq!(totals.delivery_charge, Money::from_cents(495));
        // 49.425 + 4.95 = 54.375 → 54.38
        assert_eq!(totals.total, Money::from_cents(5438));
    }

    #[test]
    fn test_red_and_green() {
        let rules = Rules::reference();
        assert_eq!(rules.total_for(&["R01", "G01"]), Money::from_cents(6085));
    }

    #[test]
    fn test_three_reds_two_blues_free_delivery() {
        let rules = Rules::reference();
        let mut basket = rules.basket();
        basket.add_all(["B01", "B01", "R01", "R01", "R01"]).unwrap();

        let totals = basket.totals();
        assert_eq!(totals.subtotal, Money::from_cents(11475));
        assert_eq!(totals.discount, Money::from_mills(16475));
        assert!(totals.delivery_charge.is_zero());
        assert_eq!(totals.total, Money::from_cents(9828));
    }

    // -------------------------------------------------------------------------
    // Edge cases
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_basket_pays_base_delivery() {
        let rules = Rules::reference();
        let basket = rules.basket();
        assert!(basket.is_empty());
        assert_eq!(basket.subtotal(), Money::zero());
        assert_eq!(basket.total(), Money::from_cents(495));
    }

    #[test]
    fn test_threshold_boundaries_inclusive() {
        let catalogue = Catalogue::from_products([
            Product::new("F50", "Fifty", 5000),
            Product::new("F90", "Ninety", 9000),
            Product::new("C01", "Cent", 1),
        ])
        .unwrap();
        let delivery = DeliveryCalculator::standard();
        let offer = OfferCalculator::red_widget();

        let mut basket = Basket::new(&catalogue, &delivery, &offer);
        basket.add("F50").unwrap();
        assert_eq!(basket.total(), Money::from_cents(5295));

        let mut basket = Basket::new(&catalogue, &delivery, &offer);
        basket.add("F90").unwrap();
        assert_eq!(basket.total(), Money::from_cents(9000));

        // One cent more than the threshold still pays the lower tier price
        let mut basket = Basket::new(&catalogue, &delivery, &offer);
        basket.add_all(["F50", "C01"]).unwrap();
        assert_eq!(basket.total(), Money::from_cents(5296));
    }

    #[test]
    fn test_discount_applies_before_delivery_threshold() {
        // Two reds: 65.90 would be mid tier, but 49.425 after the offer is not.
        let rules = Rules::reference();
        let mut basket = rules.basket();
        basket.add_all(["R01", "R01"]).unwrap();
        assert_eq!(basket.totals().delivery_charge, Money::from_cents(495));
    }

    #[test]
    fn test_unknown_code_leaves_basket_unchanged() {
        let rules = Rules::reference();
        let mut basket = rules.basket();
        basket.add("G01").unwrap();
        let before = basket.total();

        let err = basket.add("X99").unwrap_err();
        assert_eq!(err, CoreError::ProductNotFound("X99".to_string()));
        assert_eq!(basket.len(), 1);
        assert_eq!(basket.total(), before);
    }

    #[test]
    fn test_add_all_is_all_or_nothing() {
        let rules = Rules::reference();
        let mut basket = rules.basket();
        basket.add("B01").unwrap();

        let err = basket.add_all(["R01", "NOPE", "G01"]).unwrap_err();
        assert_eq!(err, CoreError::ProductNotFound("NOPE".to_string()));
        assert_eq!(basket.len(), 1);
    }

    #[test]
    fn test_items_keep_add_order() {
        let rules = Rules::reference();
        let mut basket = rules.basket();
        basket.add_all(["G01", "R01", "G01"]).unwrap();
        let codes: Vec<&str> = basket.items().iter().map(|p| p.code()).collect();
        assert_eq!(codes, vec!["G01", "R01", "G01"]);
    }

    #[test]
    fn test_total_is_idempotent() {
        let rules = Rules::reference();
        let mut basket = rules.basket();
        basket.add_all(["R01", "R01", "B01"]).unwrap();
        assert_eq!(basket.total(), basket.total());
        assert_eq!(BasketTotals::from(&basket), basket.totals());
    }

    #[test]
    fn test_custom_policies() {
        struct FlatDelivery;
        impl DeliveryPolicy for FlatDelivery {
            fn delivery_charge(&self, _subtotal: Money) -> Money {
                Money::from_cents(100)
            }
        }

        struct NoOffer;
        impl OfferPolicy for NoOffer {
            fn discount(&self, _items: &[&Product]) -> Money {
                Money::zero()
            }
        }

        let catalogue = Catalogue::reference();
        let mut basket = Basket::new(&catalogue, &FlatDelivery, &NoOffer);
        basket.add_all(["R01", "R01"]).unwrap();
        assert_eq!(basket.total(), Money::from_cents(6690));
    }

    #[test]
    fn test_totals_serialize() {
        let rules = Rules::reference();
        let mut basket = rules.basket();
        basket.add_all(["R01", "R01"]).unwrap();
        let json = serde_json::to_value(basket.totals()).unwrap();
        assert_eq!(json["item_count"], 2);
        assert_eq!(json["discount"], 16475);
        assert_eq!(json["total"], 54380);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn reference_codes() -> impl Strategy<Value = Vec<&'static str>> {
        prop::collection::vec(prop::sample::select(vec!["R01", "G01", "B01"]), 0..24)
    }

    proptest! {
        #[test]
        fn prop_total_matches_formula(codes in reference_codes()) {
            let rules = Rules::reference();
            let mut basket = rules.basket();
            basket.add_all(&codes).unwrap();

            let t = basket.totals();
            let adjusted = t.subtotal - t.discount;
            prop_assert_eq!(t.delivery_charge, rules.delivery.calculate_delivery_charge(adjusted));
            prop_assert_eq!(t.total, (adjusted + t.delivery_charge).round_to_cents());
            prop_assert!(!t.total.is_negative());
            prop_assert_eq!(basket.total(), t.total);
        }

        #[test]
        fn prop_discount_within_red_share(codes in reference_codes()) {
            let rules = Rules::reference();
            let mut basket = rules.basket();
            basket.add_all(&codes).unwrap();

            let reds = codes.iter().filter(|c| **c == "R01").count() as i64;
            let discount = basket.totals().discount;
            prop_assert!(!discount.is_negative());
            prop_assert!(discount * 2 <= Money::from_cents(3295) * reds);
        }

        #[test]
        fn prop_non_red_item_raises_adjusted_subtotal(
            codes in reference_codes(),
            extra in prop::sample::select(vec!["G01", "B01"]),
        ) {
            let rules = Rules::reference();
            let mut basket = rules.basket();
            basket.add_all(&codes).unwrap();
            let before = basket.totals();

            basket.add(extra).unwrap();
            let after = basket.totals();

            let price = rules.catalogue.get(extra).map(Product::price).unwrap();
            prop_assert_eq!(
                (after.subtotal - after.discount) - (before.subtotal - before.discount),
                price
            );
            prop_assert_eq!(after.item_count, before.item_count + 1);
        }
    }
}
