//! # Delivery Charges
//!
//! Maps a (discounted) subtotal to a delivery charge through fixed tiers.
//!
//! ## Standard Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal ≥ $90.00  ──►  $0.00   (free delivery)                        │
//! │  subtotal ≥ $50.00  ──►  $2.95                                          │
//! │  otherwise          ──►  $4.95   (base charge, also for empty baskets)  │
//! │                                                                         │
//! │  Thresholds are inclusive and evaluated highest first.                 │
//! │  The subtotal is compared exactly, in mills: $49.425 is below $50.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::trace;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Subtotal at which the mid tier starts.
pub const STANDARD_MID_THRESHOLD: Money = Money::from_cents(5000);

/// Subtotal at which delivery becomes free.
pub const STANDARD_FREE_THRESHOLD: Money = Money::from_cents(9000);

/// Charge below every threshold.
pub const STANDARD_BASE_CHARGE: Money = Money::from_cents(495);

/// Charge for the mid tier.
pub const STANDARD_MID_CHARGE: Money = Money::from_cents(295);

// =============================================================================
// Policy Trait
// =============================================================================

/// Something that prices delivery for a basket.
///
/// Implementations must be pure: same subtotal, same charge.
pub trait DeliveryPolicy {
    /// Returns the delivery charge for the given subtotal (after discounts).
    fn delivery_charge(&self, subtotal: Money) -> Money;
}

// =============================================================================
// Tiered Calculator
// =============================================================================

/// One row of the tier table: subtotals at or above `min_subtotal` pay
/// `charge`, unless a higher tier also matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryTier {
    pub min_subtotal: Money,
    pub charge: Money,
}

impl DeliveryTier {
    pub const fn new(min_subtotal: Money, charge: Money) -> Self {
        DeliveryTier {
            min_subtotal,
            charge,
        }
    }
}

/// Tiered delivery calculator.
///
/// ## Example
/// ```rust
/// use basket_core::money::Money;
/// use basket_core::DeliveryCalculator;
///
/// let delivery = DeliveryCalculator::default();
/// assert_eq!(delivery.calculate_delivery_charge(Money::from_cents(3290)), Money::from_cents(495));
/// assert_eq!(delivery.calculate_delivery_charge(Money::from_cents(5000)), Money::from_cents(295));
/// assert_eq!(delivery.calculate_delivery_charge(Money::from_cents(9000)), Money::zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryCalculator {
    base_charge: Money,
    /// Sorted by `min_subtotal`, highest first.
    tiers: Vec<DeliveryTier>,
}

impl DeliveryCalculator {
    /// Builds a calculator from a base charge and any number of tiers.
    ///
    /// Tiers may be given in any order. Fails when two tiers share a
    /// threshold or when any charge is negative.
    pub fn new<I>(base_charge: Money, tiers: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = DeliveryTier>,
    {
        if base_charge.is_negative() {
            return Err(CoreError::InvalidDeliveryTiers {
                reason: format!("base charge {} is negative", base_charge),
            });
        }

        let mut tiers: Vec<DeliveryTier> = tiers.into_iter().collect();
        if let Some(tier) = tiers.iter().find(|t| t.charge.is_negative()) {
            return Err(CoreError::InvalidDeliveryTiers {
                reason: format!(
                    "charge {} at threshold {} is negative",
                    tier.charge, tier.min_subtotal
                ),
            });
        }

        tiers.sort_by(|a, b| b.min_subtotal.cmp(&a.min_subtotal));
        if let Some(pair) = tiers
            .windows(2)
            .find(|w| w[0].min_subtotal == w[1].min_subtotal)
        {
            return Err(CoreError::InvalidDeliveryTiers {
                reason: format!("threshold {} appears more than once", pair[0].min_subtotal),
            });
        }

        Ok(DeliveryCalculator { base_charge, tiers })
    }

    /// The standard table: free from $90, $2.95 from $50, else $4.95.
    pub fn standard() -> Self {
        DeliveryCalculator {
            base_charge: STANDARD_BASE_CHARGE,
            tiers: vec![
                DeliveryTier::new(STANDARD_FREE_THRESHOLD, Money::zero()),
                DeliveryTier::new(STANDARD_MID_THRESHOLD, STANDARD_MID_CHARGE),
            ],
        }
    }

    /// Returns the charge for `subtotal`. First matching tier wins.
    pub fn calculate_delivery_charge(&self, subtotal: Money) -> Money {
        let charge = self
            .tiers
            .iter()
            .find(|tier| subtotal >= tier.min_subtotal)
            .map_or(self.base_charge, |tier| tier.charge);
        trace!(subtotal = %subtotal.to_decimal_string(), charge = %charge, "Delivery charge");
        charge
    }

    /// Charge applied when no tier matches.
    pub fn base_charge(&self) -> Money {
        self.base_charge
    }

    /// Tiers, highest threshold first.
    pub fn tiers(&self) -> &[DeliveryTier] {
        &self.tiers
    }
}

impl Default for DeliveryCalculator {
    fn default() -> Self {
        DeliveryCalculator::standard()
    }
}

impl DeliveryPolicy for DeliveryCalculator {
    fn delivery_charge(&self, subtotal: Money) -> Money {
        self.calculate_delivery_charge(subtotal)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
