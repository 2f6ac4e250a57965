//! # Catalogue
//!
//! Read-only mapping from product code to [`Product`].
//!
//! A catalogue is built once and then shared by reference: every basket
//! borrows it, none can change it. Codes are unique; building from a list
//! with a repeated code fails instead of silently keeping one entry.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::{BLUE_WIDGET, GREEN_WIDGET, RED_WIDGET};

/// Fixed set of products keyed by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    products: BTreeMap<String, Product>,
}

impl Catalogue {
    /// Builds a catalogue, validating every product and rejecting
    /// duplicate codes.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Catalogue, CoreError, Product};
    ///
    /// let catalogue = Catalogue::from_products([
    ///     Product::new("R01", "Red Widget", 3295),
    ///     Product::new("G01", "Green Widget", 2495),
    /// ])
    /// .unwrap();
    /// assert_eq!(catalogue.len(), 2);
    ///
    /// let dup = Catalogue::from_products([
    ///     Product::new("R01", "Red Widget", 3295),
    ///     Product::new("R01", "Red Widget", 3000),
    /// ]);
    /// assert_eq!(dup.unwrap_err(), CoreError::DuplicateProduct("R01".into()));
    /// ```
    pub fn from_products<I>(products: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = Product>,
    {
        let mut map: BTreeMap<String, Product> = BTreeMap::new();
        for product in products {
            product.validate()?;
            if map.contains_key(product.code()) {
                return Err(CoreError::DuplicateProduct(product.code().to_string()));
            }
            map.insert(product.code().to_string(), product);
        }
        debug!(products = map.len(), "Catalogue built");
        Ok(Catalogue { products: map })
    }

    /// The reference catalogue: red, green and blue widgets.
    ///
    /// | Code | Name         | Price  |
    /// |------|--------------|--------|
    /// | R01  | Red Widget   | $32.95 |
    /// | G01  | Green Widget | $24.95 |
    /// | B01  | Blue Widget  | $7.95  |
    pub fn reference() -> Self {
        let products = [
            Product::new(RED_WIDGET, "Red Widget", 3295),
            Product::new(GREEN_WIDGET, "Green Widget", 2495),
            Product::new(BLUE_WIDGET, "Blue Widget", 795),
        ];
        Catalogue {
            products: products
                .into_iter()
                .map(|p| (p.code().to_string(), p))
                .collect(),
        }
    }

    /// Looks up a product by code.
    #[inline]
    pub fn get(&self, code: &str) -> Option<&Product> {
        self.products.get(code)
    }

    /// Returns true if the code is in the catalogue.
    #[inline]
    pub fn contains(&self, code: &str) -> bool {
        self.products.contains_key(code)
    }

    /// Number of products.
    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterates over products in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_reference_catalogue() {
        let catalogue = Catalogue::reference();
        assert_eq!(catalogue.len(), 3);
        assert_eq!(
            catalogue.get("R01").map(Product::price),
            Some(Money::from_cents(3295))
        );
        assert_eq!(
            catalogue.get("G01").map(Product::name),
            Some("Green Widget")
        );
        assert_eq!(
            catalogue.get("B01").map(Product::price),
            Some(Money::from_cents(795))
        );
        assert!(catalogue.get("X99").is_none());
    }

    #[test]
    fn test_iter_is_code_ordered() {
        let catalogue = Catalogue::reference();
        let codes: Vec<&str> = catalogue.iter().map(Product::code).collect();
        assert_eq!(codes, vec!["B01", "G01", "R01"]);
    }

    #[test]
    fn test_from_products_validates() {
        let err = Catalogue::from_products([Product::new("R01", "Red Widget", -1)]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let padded = Catalogue::from_products([Product::new("R01 ", "Red Widget", 3295)]);
        assert!(padded.is_err());
    }

    #[test]
    fn test_empty_catalogue() {
        let catalogue = Catalogue::from_products(Vec::<Product>::new()).unwrap();
        assert!(catalogue.is_empty());
        assert!(!catalogue.contains("R01"));
    }
}
