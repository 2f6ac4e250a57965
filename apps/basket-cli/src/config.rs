//! # Pricing Configuration
//!
//! Loads the catalogue and rule parameters the CLI prices baskets with.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BASKET_CURRENCY_SYMBOL=£                                           │
//! │     BASKET_OFFER_PRODUCT=G01                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, else                                              │
//! │     ~/.config/basket-pricing/basket.toml (Linux)                       │
//! │     ~/Library/Application Support/com.basket.pricing/basket.toml (mac) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Reference catalogue, standard delivery, red widget offer           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! currency_symbol = "$"
//!
//! [[products]]
//! code = "R01"
//! name = "Red Widget"
//! price_cents = 3295
//!
//! [delivery]
//! base_charge_cents = 495
//! tiers = [
//!   { min_subtotal_cents = 5000, charge_cents = 295 },
//!   { min_subtotal_cents = 9000, charge_cents = 0 },
//! ]
//!
//! [offer]
//! product_code = "R01"
//! unit_price_cents = 3295   # omit to use the catalogue price
//! discount_bps = 5000
//! ```

use std::path::{Path, PathBuf};

use basket_core::delivery::{
    STANDARD_BASE_CHARGE, STANDARD_FREE_THRESHOLD, STANDARD_MID_CHARGE, STANDARD_MID_THRESHOLD,
};
use basket_core::offer::{HALF_PRICE_BPS, RED_WIDGET_UNIT_PRICE};
use basket_core::{
    Basket, Catalogue, CoreError, CoreResult, DeliveryCalculator, DeliveryTier, Money,
    OfferCalculator, Product, RED_WIDGET,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Default config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "basket.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid pricing rules: {0}")]
    Invalid(#[from] CoreError),
}

// =============================================================================
// Settings Sections
// =============================================================================

/// `[delivery]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliverySettings {
    /// Charge when no tier matches.
    pub base_charge_cents: i64,

    /// Tiers in any order.
    pub tiers: Vec<TierSettings>,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        DeliverySettings {
            base_charge_cents: STANDARD_BASE_CHARGE.whole_cents(),
            tiers: vec![
                TierSettings {
                    min_subtotal_cents: STANDARD_MID_THRESHOLD.whole_cents(),
                    charge_cents: STANDARD_MID_CHARGE.whole_cents(),
                },
                TierSettings {
                    min_subtotal_cents: STANDARD_FREE_THRESHOLD.whole_cents(),
                    charge_cents: 0,
                },
            ],
        }
    }
}

/// One delivery tier row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSettings {
    pub min_subtotal_cents: i64,
    pub charge_cents: i64,
}

/// `[offer]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferSettings {
    /// Product the pair offer applies to.
    pub product_code: String,

    /// Unit price the discount is computed from. `None` takes the
    /// catalogue price of `product_code`. Left out of an `[offer]` section
    /// it is `None`; only a config with no `[offer]` at all gets $32.95.
    #[serde(default)]
    pub unit_price_cents: Option<i64>,

    /// Share of the unit price taken off each second unit (5000 = 50%).
    pub discount_bps: u32,
}

impl Default for OfferSettings {
    fn default() -> Self {
        OfferSettings {
            product_code: RED_WIDGET.to_string(),
            unit_price_cents: Some(RED_WIDGET_UNIT_PRICE.whole_cents()),
            discount_bps: HALF_PRICE_BPS,
        }
    }
}

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Complete pricing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Symbol printed before amounts.
    pub currency_symbol: String,

    /// Catalogue entries.
    pub products: Vec<Product>,

    /// Delivery tiers.
    pub delivery: DeliverySettings,

    /// Pair offer.
    pub offer: OfferSettings,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            currency_symbol: "$".to_string(),
            products: Catalogue::reference().iter().cloned().collect(),
            delivery: DeliverySettings::default(),
            offer: OfferSettings::default(),
        }
    }
}

impl PricingConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform default)
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file just means defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading pricing config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML; missing sections keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(symbol) = lookup("BASKET_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.currency_symbol = symbol;
        }

        if let Some(code) = lookup("BASKET_OFFER_PRODUCT") {
            debug!(code = %code, "Overriding offer product from environment");
            self.offer.product_code = code;
            // A fixed unit price belongs to the old product.
            self.offer.unit_price_cents = None;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "basket", "pricing")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Validates the configuration and builds the pricing rules.
    pub fn build(&self) -> Result<PricingRules, ConfigError> {
        let catalogue = Catalogue::from_products(self.products.iter().cloned())?;

        let tiers = self
            .delivery
            .tiers
            .iter()
            .map(|tier| -> CoreResult<DeliveryTier> {
                Ok(DeliveryTier::new(
                    Money::try_from_cents("min_subtotal_cents", tier.min_subtotal_cents)?,
                    Money::try_from_cents("charge_cents", tier.charge_cents)?,
                ))
            })
            .collect::<CoreResult<Vec<_>>>()?;
        let base_charge =
            Money::try_from_cents("base_charge_cents", self.delivery.base_charge_cents)
                .map_err(CoreError::from)?;
        let delivery = DeliveryCalculator::new(base_charge, tiers)?;

        let offer = match self.offer.unit_price_cents {
            Some(cents) => {
                if !catalogue.contains(&self.offer.product_code) {
                    warn!(
                        code = %self.offer.product_code,
                        "Offer product is not in the catalogue; the offer will never apply"
                    );
                }
                let unit_price = Money::try_from_cents("unit_price_cents", cents)
                    .map_err(CoreError::from)?;
                OfferCalculator::new(
                    self.offer.product_code.as_str(),
                    unit_price,
                    self.offer.discount_bps,
                )?
            }
            None => OfferCalculator::from_catalogue(
                &catalogue,
                &self.offer.product_code,
                self.offer.discount_bps,
            )?,
        };

        info!(
            products = catalogue.len(),
            tiers = delivery.tiers().len(),
            offer = %offer.product_code(),
            "Pricing rules ready"
        );

        Ok(PricingRules {
            currency_symbol: self.currency_symbol.clone(),
            catalogue,
            delivery,
            offer,
        })
    }
}

// =============================================================================
// Built Rules
// =============================================================================

/// Validated catalogue and calculators, shared by every basket.
#[derive(Debug, Clone)]
pub struct PricingRules {
    pub currency_symbol: String,
    pub catalogue: Catalogue,
    pub delivery: DeliveryCalculator,
    pub offer: OfferCalculator,
}

impl PricingRules {
    /// Starts an empty basket against these rules.
    pub fn basket(&self) -> Basket<'_> {
        Basket::new(&self.catalogue, &self.delivery, &self.offer)
    }

    /// Formats an amount with the configured currency symbol.
    pub fn format(&self, amount: Money) -> String {
        amount.display_with(&self.currency_symbol)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
