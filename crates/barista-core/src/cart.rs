//! # Cart Engine
//!
//! The in-memory order being built, with derived totals that are recomputed
//! on every mutation.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Engine Operations                             │
//! │                                                                         │
//! │  Staff Action               Operation              Line Set Change      │
//! │  ────────────               ─────────              ───────────────      │
//! │                                                                         │
//! │  Tap menu item ───────────► add_item() ──────────► qty += 1 or insert   │
//! │                                                                         │
//! │  Tap minus ───────────────► remove_item() ───────► qty -= 1, drop at 0  │
//! │                                                                         │
//! │  Type a quantity ─────────► set_quantity() ──────► replace, ≤0 drops    │
//! │                                                                         │
//! │  Bill saved ──────────────► clear() ─────────────► empty + zero totals  │
//! │                                                                         │
//! │  EVERY path above ends in recompute(). There is no mutation path that   │
//! │  can leave the stored aggregates stale.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - A product id appears at most once among the lines (duplicate adds merge).
//! - No line ever has quantity ≤ 0.
//! - `subtotal == Σ line_total`, `tax == round2(subtotal × rate/100)`,
//!   `total == subtotal + tax` after every operation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::TaxRate;

// =============================================================================
// Cart Line
// =============================================================================

/// One product line in the in-progress order.
///
/// The unit price is captured when the line is created. A catalog price
/// change while the order is open does not touch lines already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Stable identifier into the menu catalog.
    pub product_id: String,
    /// Display name, frozen at add time.
    pub name: String,
    /// Unit price in cents, frozen at add time.
    pub unit_price_cents: i64,
    /// Always ≥ 1; a line at quantity 0 is deleted instead.
    pub quantity: i64,
}

impl CartLine {
    /// Line total (unit price × quantity) in cents.
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Immutable view of the cart handed to observers after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub subtotal_cents: i64,
    pub tax_amount_cents: i64,
    pub total_cents: i64,
}

impl CartSnapshot {
    /// Whether the snapshot holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The working order and its derived money fields, kept consistent as a
/// single unit.
///
/// The aggregates are stored rather than computed on read so that a snapshot
/// is a plain copy, and recomputed inside every mutating operation so they can
/// never drift from the line set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    subtotal_cents: i64,
    tax_amount_cents: i64,
    total_cents: i64,
    tax_rate_bps: u32,
}

impl Cart {
    /// Creates an empty cart with the given tax rate.
    ///
    /// The rate is a fixed configuration constant for the session, not
    /// per-line.
    pub fn new(tax_rate: TaxRate) -> Self {
        Cart {
            lines: Vec::new(),
            subtotal_cents: 0,
            tax_amount_cents: 0,
            total_cents: 0,
            tax_rate_bps: tax_rate.bps(),
        }
    }

    /// Adds one unit of a product.
    ///
    /// If a line for `product_id` already exists its quantity is incremented;
    /// otherwise a new line is inserted with quantity 1. Name and price are
    /// a caller contract and are not validated here.
    pub fn add_item(&mut self, product_id: &str, name: &str, unit_price: Money) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product_id: product_id.to_string(),
                name: name.to_string(),
                unit_price_cents: unit_price.cents(),
                quantity: 1,
            });
        }
        self.recompute();
    }

    /// Removes one unit of a product.
    ///
    /// A line that reaches quantity 0 is deleted. Removing a product that is
    /// not in the cart is a no-op (idempotent).
    pub fn remove_item(&mut self, product_id: &str) {
        if let Some(idx) = self.lines.iter().position(|l| l.product_id == product_id) {
            if self.lines[idx].quantity <= 1 {
                self.lines.remove(idx);
            } else {
                self.lines[idx].quantity -= 1;
            }
        }
        self.recompute();
    }

    /// Sets an explicit quantity for a product.
    ///
    /// `qty ≤ 0` deletes the line. Setting a quantity for a product that is
    /// not in the cart is a no-op.
    pub fn set_quantity(&mut self, product_id: &str, qty: i64) {
        if qty <= 0 {
            self.lines.retain(|l| l.product_id != product_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = qty;
        }
        self.recompute();
    }

    /// Empties all lines and zeroes the aggregates. Used after a successful
    /// checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    /// Recomputes the stored aggregates from the current line set.
    ///
    /// The tax amount is rounded to cents on its own before the total is
    /// formed; see [`Money::calculate_tax`] for why the two-step rounding
    /// matters.
    fn recompute(&mut self) {
        self.subtotal_cents = self.lines.iter().map(|l| l.line_total_cents()).sum();
        self.tax_amount_cents = Money::from_cents(self.subtotal_cents)
            .calculate_tax(TaxRate::from_bps(self.tax_rate_bps))
            .cents();
        self.total_cents = self.subtotal_cents + self.tax_amount_cents;
    }

    /// The current lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Subtotal before tax, in cents.
    #[inline]
    pub fn subtotal_cents(&self) -> i64 {
        self.subtotal_cents
    }

    /// Tax amount, in cents.
    #[inline]
    pub fn tax_amount_cents(&self) -> i64 {
        self.tax_amount_cents
    }

    /// Grand total, in cents.
    #[inline]
    pub fn total_cents(&self) -> i64 {
        self.total_cents
    }

    /// The fixed tax rate this cart was created with.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Copies the current state into an immutable snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            subtotal_cents: self.subtotal_cents,
            tax_amount_cents: self.tax_amount_cents,
            total_cents: self.total_cents,
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new(TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
