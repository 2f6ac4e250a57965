//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basket-core errors (this file)                                        │
//! │  ├── CoreError        - Lookup failures and rule construction errors   │
//! │  └── ValidationError  - Product field validation failures              │
//! │                                                                         │
//! │  basket-cli errors (app crate)                                         │
//! │  └── ConfigError      - Config file / environment failures             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ConfigError → anyhow → stderr     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product code, field name)
//! 3. Errors are enum variants, never String
//! 4. `Basket::add` only ever fails with `ProductNotFound`

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Product code is not in the catalogue.
    ///
    /// ## When This Occurs
    /// ```text
    /// basket.add("X99")
    ///      │
    ///      ▼
    /// catalogue.get("X99") → None
    ///      │
    ///      ▼
    /// ProductNotFound("X99")   (basket left unchanged)
    /// ```
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two catalogue entries share a code.
    #[error("Duplicate product code in catalogue: {0}")]
    DuplicateProduct(String),

    /// Delivery tiers cannot form a consistent table.
    #[error("Invalid delivery tiers: {reason}")]
    InvalidDeliveryTiers { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building products and rules from untrusted input such as a
/// config file. Never raised once a basket exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. disallowed characters in a product code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
