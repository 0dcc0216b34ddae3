//! # Domain Types
//!
//! Core domain types for Barista POS bills.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Bill       │   │    BillItem     │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id ('BRST…')   │   │  bill_id (FK)   │   │  bps (u32)      │       │
//! │  │  subtotal_cents │   │  item_name      │   │  500 = 5%       │       │
//! │  │  payment_status │   │  quantity       │   └─────────────────┘       │
//! │  │  created_at     │   │  price_cents    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  PaymentStatus  │   │  PaymentMethod  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Unpaid         │   │  Upi            │                             │
//! │  │  Paid           │   │  Card           │                             │
//! │  └─────────────────┘   │  Cash           │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `BillItem` freezes name/price/total at save time. Editing the menu
//! catalog later must never change a bill that has already been persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000.
/// 500 bps = 5% (the café's GST rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a whole-number percentage.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        TaxRate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Payment state of a persisted bill.
///
/// The only legal transition is `Unpaid → Paid`; nothing in this system
/// reverses it.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Bill saved, no payment recorded.
    Unpaid,
    /// Payment recorded via one of the payment methods.
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a bill was settled. Set on the bill only when it is paid.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Code-scan payment (GPay, PhonePe, ...).
    Upi,
    /// Credit or debit card.
    Card,
    /// Cash at the counter.
    Cash,
}

// =============================================================================
// Bill
// =============================================================================

/// A persisted bill header.
///
/// Immutable once written, except `payment_status`/`payment_method` which
/// flip exactly once when the bill is paid. The money fields are the cart's
/// totals frozen at save time.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    /// External-facing bill id, assigned at save time, never reused.
    /// Sequence ids look like `BRST000042`.
    pub id: String,
    /// Sum of line totals, in cents.
    pub subtotal_cents: i64,
    /// Tax rate applied, in basis points (frozen at save time).
    pub tax_rate_bps: u32,
    /// `round2(subtotal * rate / 100)`, in cents.
    pub tax_amount_cents: i64,
    /// `subtotal + tax`, in cents.
    pub total_amount_cents: i64,
    pub payment_status: PaymentStatus,
    /// Set only when the bill is paid.
    pub payment_method: Option<PaymentMethod>,
    /// Assigned by the persistence gateway at insert time.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the tax amount as Money.
    #[inline]
    pub fn tax_amount(&self) -> Money {
        Money::from_cents(self.tax_amount_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }

    /// Returns the tax rate.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Whether the bill has been paid.
    #[inline]
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

// =============================================================================
// Bill Item
// =============================================================================

/// One line of a persisted bill.
///
/// Values are a snapshot of the cart line at save time; later catalog price
/// changes must not retroactively affect a saved bill.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillItem {
    /// Row id (UUID v4).
    pub id: String,
    /// Owning bill.
    pub bill_id: String,
    /// Product name at save time (frozen).
    pub item_name: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit price in cents at save time (frozen).
    pub price_cents: i64,
    /// `price × quantity` in cents.
    pub item_total_cents: i64,
}

impl BillItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn item_total(&self) -> Money {
        Money::from_cents(self.item_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_conversions() {
        let rate = TaxRate::from_percent(5);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_payment_status_default() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_payment_method_serde_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Upi).unwrap(),
            "\"upi\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"cash\""
        );
    }

    #[test]
    fn test_bill_money_accessors() {
        let bill = Bill {
            id: "BRST000001".to_string(),
            subtotal_cents: 25000,
            tax_rate_bps: 500,
            tax_amount_cents: 1250,
            total_amount_cents: 26250,
            payment_status: PaymentStatus::Unpaid,
            payment_method: None,
            created_at: Utc::now(),
        };
        assert_eq!(bill.subtotal().cents(), 25000);
        assert_eq!(bill.total_amount().to_decimal_string(), "262.50");
        assert!(!bill.is_paid());
    }
}
