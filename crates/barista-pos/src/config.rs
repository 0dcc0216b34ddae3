//! # Session Configuration
//!
//! Fixed knobs the session layer needs: store branding for receipts, the
//! public receipt origin, the GST rate and the simulated payment delay.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BARISTA_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after startup, so no lock is needed.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use barista_core::{TaxRate, DEFAULT_TAX_RATE_BPS};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosConfig {
    /// Store name (printed on tickets, shown on the receipt card).
    pub store_name: String,

    /// Tax registration number shown on the receipt card.
    pub gstin: String,

    /// Origin of the hosted receipt page. The QR payload and share link are
    /// `<web_base_url>/bill/<billId>` and must match its routing exactly.
    pub web_base_url: String,

    /// GST rate in basis points (500 = 5%).
    pub tax_rate_bps: u32,

    /// How long the simulated payment gateway takes to "process".
    #[serde(skip)]
    pub payment_delay: Duration,
}

impl PosConfig {
    /// Loads configuration from `BARISTA_*` environment variables, falling
    /// back to the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = PosConfig::default();

        PosConfig {
            store_name: env::var("BARISTA_STORE_NAME").unwrap_or(defaults.store_name),
            gstin: env::var("BARISTA_GSTIN").unwrap_or(defaults.gstin),
            web_base_url: env::var("BARISTA_WEB_BASE_URL").unwrap_or(defaults.web_base_url),
            tax_rate_bps: env::var("BARISTA_TAX_RATE_BPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.tax_rate_bps),
            payment_delay: defaults.payment_delay,
        }
    }

    /// The configured tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

impl Default for PosConfig {
    fn default() -> Self {
        PosConfig {
            store_name: "Barista Cafe".to_string(),
            gstin: "07AAAAA0000A1Z5".to_string(),
            web_base_url: "https://bills.barista.example".to_string(),
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            payment_delay: Duration::from_secs(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PosConfig::default();
        assert_eq!(config.tax_rate().bps(), 500);
        assert_eq!(config.payment_delay, Duration::from_secs(2));
        assert!(!config.web_base_url.ends_with('/'));
    }
}
