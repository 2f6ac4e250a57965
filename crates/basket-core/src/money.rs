//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    49.425 + 4.95 = 54.37499999999999  → rounds to 54.37  ❌ WRONG!      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Mills (tenths of a cent)                         │
//! │    49425 + 4950 = 54375 mills → half-up → 54380 → $54.38               │
//! │                                                                         │
//! │  Why not plain cents? The red widget offer takes half of $32.95,       │
//! │  which is $16.475. Mills hold that exactly, and only the final         │
//! │  basket total is rounded to whole cents.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::money::Money;
//!
//! // Create from cents (preferred for catalogue prices)
//! let price = Money::from_cents(3295); // $32.95
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // $65.90
//! let half = price.percentage(5000);            // $16.475 (exact)
//! assert_eq!(half.mills(), 16475);
//! assert_eq!((doubled - half).round_to_cents().to_string(), "$49.43");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::validation::{validate_amount_cents, ValidationResult};

/// Mills per cent. One mill is a tenth of a cent.
pub const MILLS_PER_CENT: i64 = 10;

/// Mills per major currency unit.
pub const MILLS_PER_UNIT: i64 = 1000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in mills (thousandths of the major unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediates such as discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Mills, not cents**: Every cent amount converts losslessly, and halving
///   a cent amount is always exact
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price_cents ──► Basket.subtotal ──┐                            │
/// │                                            ├──► adjusted subtotal       │
/// │  OfferCalculator ──────► discount ─────────┘          │                 │
/// │                                                       ▼                 │
/// │                                   DeliveryCalculator ──► charge        │
/// │                                                       │                 │
/// │  round_to_cents(adjusted + charge) ◄──────────────────┘                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole cents.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let price = Money::from_cents(3295); // $32.95
    /// assert_eq!(price.mills(), 32950);
    /// assert_eq!(price.whole_cents(), 3295);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents * MILLS_PER_CENT)
    }

    /// Creates a Money value from mills (tenths of a cent).
    #[inline]
    pub const fn from_mills(mills: i64) -> Self {
        Money(mills)
    }

    /// Creates a Money value from untrusted whole cents.
    ///
    /// Rejects negative amounts and anything above
    /// [`MAX_AMOUNT_CENTS`](crate::validation::MAX_AMOUNT_CENTS), naming
    /// `field` in the error.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_cents("charge", 495).unwrap(), Money::from_cents(495));
    /// assert!(Money::try_from_cents("charge", i64::MAX).is_err());
    /// ```
    pub fn try_from_cents(field: &str, cents: i64) -> ValidationResult<Self> {
        validate_amount_cents(field, cents)?;
        Ok(Money::from_cents(cents))
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let price = Money::from_major_minor(24, 95); // $24.95
    /// assert_eq!(price.whole_cents(), 2495);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -$5.50
    /// assert_eq!(negative.whole_cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money::from_cents(major * 100 - minor)
        } else {
            Money::from_cents(major * 100 + minor)
        }
    }

    /// Returns the exact value in mills.
    #[inline]
    pub const fn mills(&self) -> i64 {
        self.0
    }

    /// Returns the value in whole cents, rounded half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// assert_eq!(Money::from_mills(54375).whole_cents(), 5438);
    /// assert_eq!(Money::from_mills(54374).whole_cents(), 5437);
    /// ```
    #[inline]
    pub const fn whole_cents(&self) -> i64 {
        self.round_to_cents().0 / MILLS_PER_CENT
    }

    /// Returns the major unit (dollars) portion of the cent-rounded value.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.whole_cents() / 100
    }

    /// Returns the minor unit (cents) portion of the cent-rounded value (0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.whole_cents() % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Rounds to whole cents, half away from zero.
    ///
    /// ## Rounding Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  HALF AWAY FROM ZERO                                                │
    /// │                                                                     │
    /// │   54.375 → 54.38      54.374 → 54.37                               │
    /// │   98.275 → 98.28     -0.005  → -0.01                               │
    /// │                                                                     │
    /// │  Applied ONCE, to the final basket total. Rounding intermediates   │
    /// │  (the discount, the adjusted subtotal) would drift by a cent.      │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let total = Money::from_mills(98275);
    /// assert_eq!(total.round_to_cents(), Money::from_cents(9828));
    /// ```
    pub const fn round_to_cents(&self) -> Money {
        let rem = self.0 % MILLS_PER_CENT;
        let base = self.0 - rem;
        if rem >= MILLS_PER_CENT / 2 {
            Money(base + MILLS_PER_CENT)
        } else if rem <= -(MILLS_PER_CENT / 2) {
            Money(base - MILLS_PER_CENT)
        } else {
            Money(base)
        }
    }

    /// Returns the given share of this amount, in basis points (5000 = 50%).
    ///
    /// The result is rounded to the nearest mill. Any share of a whole-cent
    /// amount that lands on a half cent is exact.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let red_widget = Money::from_cents(3295);
    /// assert_eq!(red_widget.percentage(5000), Money::from_mills(16475));
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 so large amounts cannot overflow before the division
        let share = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(share as i64)
    }

    /// Formats the cent-rounded amount with the given currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(3785).display_with("£"), "£37.85");
    /// assert_eq!(Money::from_cents(-550).display_with("€"), "-€5.50");
    /// ```
    pub fn display_with(&self, symbol: &str) -> String {
        let sign = if self.whole_cents() < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }

    /// Formats the exact amount as a plain decimal, keeping the third
    /// decimal place only when it is non-zero.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// assert_eq!(Money::from_mills(16475).to_decimal_string(), "16.475");
    /// assert_eq!(Money::from_cents(3290).to_decimal_string(), "32.90");
    /// assert_eq!(Money::from_mills(-5).to_decimal_string(), "-0.005");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let major = abs / MILLS_PER_UNIT;
        let frac = abs % MILLS_PER_UNIT;
        if frac % MILLS_PER_CENT == 0 {
            format!("{}{}.{:02}", sign, major, frac / MILLS_PER_CENT)
        } else {
            format!("{}{}.{:03}", sign, major, frac)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the cent-rounded amount with a dollar sign.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a count (pairs, quantities).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.mills(), 10990);
        assert_eq!(money.whole_cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_try_from_cents_rejects_out_of_range() {
        use crate::validation::MAX_AMOUNT_CENTS;

        assert_eq!(
            Money::try_from_cents("price", MAX_AMOUNT_CENTS).unwrap().whole_cents(),
            MAX_AMOUNT_CENTS
        );
        assert!(Money::try_from_cents("price", MAX_AMOUNT_CENTS + 1).is_err());
        assert!(Money::try_from_cents("price", i64::MAX / MILLS_PER_CENT + 1).is_err());
        assert!(Money::try_from_cents("price", -1).is_err());
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(32, 95), Money::from_cents(3295));
        assert_eq!(Money::from_major_minor(-5, 50).whole_cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
        // Display rounds sub-cent amounts
        assert_eq!(format!("{}", Money::from_mills(16475)), "$16.48");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).whole_cents(), 1500);
        assert_eq!((a - b).whole_cents(), 500);
        assert_eq!((a * 3).whole_cents(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_cents(250);
        assert_eq!(c, Money::from_cents(1250));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(Money::from_mills(54375).round_to_cents().mills(), 54380);
        assert_eq!(Money::from_mills(54374).round_to_cents().mills(), 54370);
        assert_eq!(Money::from_mills(54376).round_to_cents().mills(), 54380);
        assert_eq!(Money::from_mills(-5).round_to_cents().mills(), -10);
        assert_eq!(Money::from_mills(-4).round_to_cents().mills(), 0);
        assert_eq!(Money::from_cents(4950).round_to_cents(), Money::from_cents(4950));
    }

    #[test]
    fn test_percentage_is_exact_for_half_cents() {
        assert_eq!(Money::from_cents(3295).percentage(5000).mills(), 16475);
        assert_eq!(Money::from_cents(795).percentage(5000).mills(), 3975);
        assert_eq!(Money::from_cents(10000).percentage(1000), Money::from_cents(1000));
        assert_eq!(Money::from_cents(3295).percentage(0), Money::zero());
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_cents(795), Money::from_cents(2495)];
        let total: Money = prices.iter().sum();
        assert_eq!(total, Money::from_cents(3290));

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs(), Money::from_cents(100));
    }

    #[test]
    fn test_serde_transparent_mills() {
        let json = serde_json::to_string(&Money::from_mills(16475)).unwrap();
        assert_eq!(json, "16475");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_mills(16475));
    }
}
