//! # barista-pos: Session Layer
//!
//! Orchestrates a register session: the live cart, checkout into the bill
//! store, list views and the simulated payment gateway.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        barista-pos                                      │
//! │                                                                         │
//! │  Front ends (staff app, receipt page)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌────────────────────────┐     │
//! │  │  CartState   │  │ CheckoutService  │  │    PaymentService      │     │
//! │  │  (state/)    │─►│  (checkout.rs)   │  │    (payment.rs)        │     │
//! │  │  watch-based │  │  cart → Bill     │  │  validate → authorize  │     │
//! │  │  snapshots   │  │  list filters    │  │  → mark_paid           │     │
//! │  └──────────────┘  └────────┬─────────┘  └──────────┬─────────────┘     │
//! │                             │                       │                   │
//! │                             ▼                       ▼                   │
//! │                    ┌─────────────────────────────────────┐              │
//! │                    │        BillStore (store.rs)         │              │
//! │                    │  SqliteBillStore │ MemoryBillStore  │              │
//! │                    └─────────────────────────────────────┘              │
//! │                             │                                           │
//! │                             ▼                                           │
//! │                    barista-db (SQLite gateway)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use barista_core::Money;
//! use barista_pos::{CartState, CheckoutService, CheckoutSession, MemoryBillStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cart = Arc::new(CartState::default());
//! let store = Arc::new(MemoryBillStore::new());
//! let checkout = CheckoutService::new(cart.clone(), store);
//!
//! cart.add_item("hd1", "Espresso", Money::from_cents(12000));
//!
//! let mut session = CheckoutSession::new();
//! let bill_id = checkout.save_bill(&mut session).await.unwrap();
//! assert_eq!(bill_id, "BRST000001");
//! # }
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod exports;
pub mod payment;
pub mod state;
pub mod store;

pub use checkout::{BillFilter, BillsSummary, CheckoutService, CheckoutSession};
pub use config::PosConfig;
pub use error::{PosError, PosResult};
pub use payment::{PaymentAuthorizer, PaymentDetails, PaymentService, SimulatedGateway};
pub use state::CartState;
pub use store::{BillStore, MemoryBillStore, SqliteBillStore};
