//! # Cart State
//!
//! The live cart for the register session, shared across concurrent tasks.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<Cart>>`:
//! 1. The menu screen, cart screen and checkout all touch the same cart
//! 2. Only one task may mutate at a time
//! 3. Operations are short; a Mutex beats an RwLock here since almost
//!    every operation is a write
//!
//! ## Observation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart State Flow                                     │
//! │                                                                         │
//! │  Screen Action              CartState call          Watchers see        │
//! │  ─────────────              ──────────────          ────────────        │
//! │  Tap menu item ───────────► add_item() ───────────► new CartSnapshot    │
//! │  Tap minus ───────────────► remove_item() ────────► new CartSnapshot    │
//! │  Type quantity ───────────► set_quantity() ───────► new CartSnapshot    │
//! │  Checkout done ───────────► clear() ──────────────► empty snapshot      │
//! │                                                                         │
//! │  Every mutation ends by publishing cart.snapshot() on a watch channel.  │
//! │  Subscribers (badge counters, totals bars) hold a Receiver and render   │
//! │  whatever the latest snapshot says; they never lock the cart itself.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::debug;

use barista_core::{Cart, CartSnapshot, Money, TaxRate};

/// Shared, observable cart state.
#[derive(Debug)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
    snapshot_tx: watch::Sender<CartSnapshot>,
}

impl CartState {
    /// Creates an empty cart with the given tax rate.
    pub fn new(tax_rate: TaxRate) -> Self {
        let cart = Cart::new(tax_rate);
        let (snapshot_tx, _) = watch::channel(cart.snapshot());

        CartState {
            cart: Arc::new(Mutex::new(cart)),
            snapshot_tx,
        }
    }

    /// Subscribes to cart snapshots.
    ///
    /// The receiver always holds the latest snapshot; a new one is published
    /// after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Adds one unit of a product, merging into an existing line.
    pub fn add_item(&self, product_id: &str, name: &str, unit_price: Money) {
        self.mutate(|cart| cart.add_item(product_id, name, unit_price));
    }

    /// Removes one unit of a product; the line is dropped at quantity 0.
    pub fn remove_item(&self, product_id: &str) {
        self.mutate(|cart| cart.remove_item(product_id));
    }

    /// Sets an explicit quantity; `qty ≤ 0` drops the line.
    pub fn set_quantity(&self, product_id: &str, qty: i64) {
        self.mutate(|cart| cart.set_quantity(product_id, qty));
    }

    /// Empties the cart and publishes the zero snapshot.
    pub fn clear(&self) {
        self.mutate(|cart| cart.clear());
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Copies out the current snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        self.with_cart(|cart| cart.snapshot())
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.with_cart(|cart| cart.is_empty())
    }

    /// Runs a mutation under the lock, then publishes the fresh snapshot.
    fn mutate<F>(&self, f: F)
    where
        F: FnOnce(&mut Cart),
    {
        let snapshot = {
            let mut cart = self.cart.lock().expect("Cart mutex poisoned");
            f(&mut cart);
            cart.snapshot()
        };

        debug!(
            lines = snapshot.lines.len(),
            total_cents = snapshot.total_cents,
            "Cart updated"
        );
        // send_replace never fails, even with zero receivers
        self.snapshot_tx.send_replace(snapshot);
    }
}

impl Default for CartState {
    fn default() -> Self {
        CartState::new(TaxRate::from_bps(barista_core::DEFAULT_TAX_RATE_BPS))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
