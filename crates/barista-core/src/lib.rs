//! # barista-core: Pure Business Logic for Barista POS
//!
//! This crate is the **heart** of Barista POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Barista POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front Ends (staff app, web receipt page)           │   │
//! │  │    Menu UI ──► Cart UI ──► Bill Preview ──► Receipt / Payment   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 barista-pos (session layer)                      │   │
//! │  │    CartState, CheckoutService, PaymentService                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ barista-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │   │   │
//! │  │   │   Bill    │  │   Money   │  │   Cart    │  │ MenuItem  │   │   │
//! │  │   │ BillItem  │  │  TaxCalc  │  │ CartLine  │  │  lookup   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           barista-db (SQLite) / barista-export (renderers)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Bill, BillItem, payment enums, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart engine and its derived totals
//! - [`catalog`] - The static menu
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same input = same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: errors are typed enums, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use barista_core::cart::Cart;
//! use barista_core::money::Money;
//! use barista_core::types::TaxRate;
//!
//! let mut cart = Cart::new(TaxRate::from_bps(500)); // 5% GST
//! cart.add_item("hd1", "Espresso", Money::from_cents(12000));
//! cart.add_item("hd1", "Espresso", Money::from_cents(12000));
//!
//! assert_eq!(cart.subtotal_cents(), 24000);
//! assert_eq!(cart.tax_amount_cents(), 1200);
//! assert_eq!(cart.total_cents(), 25200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use barista_core::Money` instead of
// `use barista_core::money::Money`.

pub use cart::{Cart, CartLine, CartSnapshot};
pub use catalog::{Category, MenuItem, CATEGORIES, MENU_ITEMS};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use types::{Bill, BillItem, PaymentMethod, PaymentStatus, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST rate applied to every order, in basis points (500 = 5%).
///
/// A fixed configuration constant, not per-line; the cart freezes it into
/// each saved bill so historic bills keep the rate they were issued under.
pub const DEFAULT_TAX_RATE_BPS: u32 = 500;

/// Prefix shared by sequence-issued and fallback bill ids.
///
/// The sequence produces `BRST000042`-style ids; the degraded local fallback
/// appends the low six digits of the current unix-millis timestamp instead.
pub const BILL_ID_PREFIX: &str = "BRST";
