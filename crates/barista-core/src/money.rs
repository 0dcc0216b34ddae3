//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The reference cart did `(subtotal * TAX_RATE / 100).toFixed(2)` on    │
//! │  IEEE doubles and hoped the string round-trip fixed the drift.         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount is an i64 count of the smallest currency unit.         │
//! │    Rounding happens exactly once, explicitly, in calculate_tax().      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use barista_core::money::Money;
//!
//! let espresso = Money::from_cents(12000); // 120.00
//! let two = espresso * 2;
//! assert_eq!(two.cents(), 24000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: the Tally export needs a negated Cash ledger amount
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
///
/// ## Where Money flows
/// ```text
/// MenuItem.price_cents ──► CartLine.unit_price ──► CartLine.line_total
///                                  │
///                                  ▼
/// Cart.subtotal ──► calculate_tax ──► Cart.total ──► Bill.total_amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use barista_core::money::Money;
    ///
    /// let latte = Money::from_cents(16000); // 160.00
    /// assert_eq!(latte.cents(), 16000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the negated value. Used for the Cash ledger entry in the
    /// accounting export, which must be the negative of the bill total.
    #[inline]
    pub const fn negated(&self) -> Self {
        Money(-self.0)
    }

    /// Calculates tax, rounding half-up at cent precision.
    ///
    /// The reference behavior is `round2(subtotal * ratePercent / 100)`:
    /// the tax amount is rounded to two decimals on its own, *before* it is
    /// added to the subtotal. With amounts held in integer cents the second
    /// rounding step (`round2(subtotal + tax)`) is the identity, so a single
    /// explicit rounding here reproduces the two-step rule exactly.
    ///
    /// ## Implementation
    /// Integer math: `(cents * bps + 5000) / 10000`. The +5000 term rounds
    /// the half case up, matching `toFixed(2)` on the amounts this system
    /// produces. i128 intermediates prevent overflow on large subtotals.
    ///
    /// ```rust
    /// use barista_core::money::Money;
    /// use barista_core::types::TaxRate;
    ///
    /// // 250.00 at 5% GST = 12.50
    /// let subtotal = Money::from_cents(25000);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(500));
    /// assert_eq!(tax.cents(), 1250);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity (line total = unit price × qty).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Formats the amount as a plain two-decimal string with no currency
    /// symbol: `"262.50"`, `"-262.50"`.
    ///
    /// This is the canonical representation used by the Tally XML export
    /// and anywhere else a bare decimal amount is required.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a currency symbol, for receipts and debugging.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Default money is zero.
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

/// Multiplication by integer quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
        let money = Money::from_cents(16050);
        assert_eq!(money.cents(), 16050);
        assert_eq!(money.major(), 160);
        assert_eq!(money.minor(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(12000)), "$120.00");
        assert_eq!(format!("{}", Money::from_cents(1250)), "$12.50");
        assert_eq!(format!("{}", Money::from_cents(-26250)), "-$262.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(26250).to_decimal_string(), "262.50");
        assert_eq!(Money::from_cents(-26250).to_decimal_string(), "-262.50");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(25000);
        let b = Money::from_cents(1250);

        assert_eq!((a + b).cents(), 26250);
        assert_eq!((a - b).cents(), 23750);
        assert_eq!((b * 2).cents(), 2500);
    }

    #[test]
    fn test_negated() {
        assert_eq!(Money::from_cents(26250).negated().cents(), -26250);
        assert_eq!(Money::zero().negated().cents(), 0);
    }

    #[test]
    fn test_tax_spec_example() {
        // 100.00 × 2 + 50.00 × 1 = 250.00 subtotal; 5% GST → 12.50, total 262.50
        let subtotal = Money::from_cents(25000);
        let tax = subtotal.calculate_tax(TaxRate::from_bps(500));
        assert_eq!(tax.cents(), 1250);
        assert_eq!((subtotal + tax).cents(), 26250);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 1.30 at 5% = 0.065 → rounds to 0.07
        let tax = Money::from_cents(130).calculate_tax(TaxRate::from_bps(500));
        assert_eq!(tax.cents(), 7);

        // 1.20 at 5% = 0.06 exactly
        let tax = Money::from_cents(120).calculate_tax(TaxRate::from_bps(500));
        assert_eq!(tax.cents(), 6);
    }

    #[test]
    fn test_tax_rounds_independently_per_step() {
        // Tax is rounded to cents before the total is formed, so the total
        // never carries sub-cent residue.
        let subtotal = Money::from_cents(12345); // 123.45
        let tax = subtotal.calculate_tax(TaxRate::from_bps(500)); // 6.1725 → 6.17
        assert_eq!(tax.cents(), 617);
        assert_eq!((subtotal + tax).cents(), 12962);
    }

    #[test]
    fn test_zero_tax_rate() {
        let tax = Money::from_cents(25000).calculate_tax(TaxRate::zero());
        assert!(tax.is_zero());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit = Money::from_cents(15000);
        assert_eq!(unit.multiply_quantity(3).cents(), 45000);
    }
}
