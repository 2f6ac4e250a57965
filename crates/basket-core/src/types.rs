//! # Domain Types
//!
//! The catalogue entry type shared by every pricing rule.
//!
//! ## Product
//! ```text
//! ┌─────────────────────────┐
//! │        Product          │
//! │  ─────────────────────  │
//! │  code        "R01"      │  unique catalogue key
//! │  name        "Red ..."  │  display only
//! │  price_cents 3295       │  whole cents, never negative
//! └─────────────────────────┘
//! ```
//!
//! Products are immutable: fields are private and only readable through
//! accessors. Baskets borrow them from the catalogue and never copy or
//! change them.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{validate_code, validate_price_cents, validate_product_name};

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalogue key, e.g. "R01".
    code: String,

    /// Display name, e.g. "Red Widget".
    name: String,

    /// Unit price in cents (smallest currency unit).
    price_cents: i64,
}

impl Product {
    /// Creates a product without validating its fields.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::Product;
    ///
    /// let widget = Product::new("R01", "Red Widget", 3295);
    /// assert_eq!(widget.code(), "R01");
    /// assert_eq!(widget.price().to_string(), "$32.95");
    /// ```
    pub fn new(code: impl Into<String>, name: impl Into<String>, price_cents: i64) -> Self {
        Product {
            code: code.into(),
            name: name.into(),
            price_cents,
        }
    }

    /// Creates a product after validating code, name and price.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::Product;
    ///
    /// assert!(Product::try_new("G01", "Green Widget", 2495).is_ok());
    /// assert!(Product::try_new("G01", "Green Widget", -1).is_err());
    /// ```
    pub fn try_new(
        code: impl Into<String>,
        name: impl Into<String>,
        price_cents: i64,
    ) -> CoreResult<Self> {
        let product = Product::new(code, name, price_cents);
        product.validate()?;
        Ok(product)
    }

    /// Checks the product's fields against the catalogue rules.
    pub fn validate(&self) -> CoreResult<()> {
        validate_code(&self.code)?;
        validate_product_name(&self.name)?;
        validate_price_cents(self.price_cents)?;
        Ok(())
    }

    /// Returns the catalogue code.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price in cents.
    #[inline]
    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    #[test]
    fn test_accessors() {
        let product = Product::new("B01", "Blue Widget", 795);
        assert_eq!(product.code(), "B01");
        assert_eq!(product.name(), "Blue Widget");
        assert_eq!(product.price_cents(), 795);
        assert_eq!(product.price(), Money::from_cents(795));
    }

    #[test]
    fn test_try_new_rejects_bad_fields() {
        let err = Product::try_new("", "Nameless", 100).unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation(ValidationError::Required {
                field: "code".to_string()
            })
        );

        assert!(Product::try_new("R01", " ", 100).is_err());
        assert!(Product::try_new("R01", "Red Widget", -5).is_err());
        assert!(Product::try_new("R01", "Red Widget", i64::MAX).is_err());
    }

    #[test]
    fn test_try_new_rejects_padded_code() {
        // The code is stored as given, so " R01" would never match "R01".
        let err = Product::try_new(" R01", "Red Widget", 3295).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_serde_shape() {
        let product = Product::new("R01", "Red Widget", 3295);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "R01", "name": "Red Widget", "price_cents": 3295 })
        );
    }
}
