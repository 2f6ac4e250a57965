//! # basket-core: Pure Pricing Logic
//!
//! This crate prices a shopping basket against a fixed catalogue, a pair
//! offer and a tiered delivery charge. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Basket Pricing Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    basket-cli (apps/)                           │   │
//! │  │     config file ──► rules ──► baskets ──► printed totals       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ catalogue │  │  offer /  │  │  basket   │  │   │
//! │  │   │   Money   │  │  Product  │  │ delivery  │  │  Basket   │  │   │
//! │  │   │  (mills)  │  │  lookup   │  │  policies │  │  totals   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO ENVIRONMENT • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - The `Product` catalogue entry
//! - [`catalogue`] - Read-only code → product mapping
//! - [`delivery`] - Tiered delivery charges
//! - [`offer`] - Pair discounts
//! - [`basket`] - Basket and its price breakdown
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation for untrusted input
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{Basket, Catalogue, DeliveryCalculator, OfferCalculator};
//!
//! let catalogue = Catalogue::reference();
//! let delivery = DeliveryCalculator::standard();
//! let offer = OfferCalculator::red_widget();
//!
//! let mut basket = Basket::new(&catalogue, &delivery, &offer);
//! for code in ["B01", "B01", "R01", "R01", "R01"] {
//!     basket.add(code).unwrap();
//! }
//!
//! // 114.75 − 16.475 = 98.275, free delivery, rounded once → $98.28
//! assert_eq!(basket.total().to_string(), "$98.28");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod catalogue;
pub mod delivery;
pub mod error;
pub mod money;
pub mod offer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::{Basket, BasketTotals};
pub use catalogue::Catalogue;
pub use delivery::{DeliveryCalculator, DeliveryPolicy, DeliveryTier};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use offer::{OfferCalculator, OfferPolicy};
pub use types::Product;

// =============================================================================
// Reference Catalogue Codes
// =============================================================================

/// Red widget, the product the default offer applies to.
pub const RED_WIDGET: &str = "R01";

/// Green widget.
pub const GREEN_WIDGET: &str = "G01";

/// Blue widget.
pub const BLUE_WIDGET: &str = "B01";
