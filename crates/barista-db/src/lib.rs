//! # barista-db: Bill Persistence Gateway
//!
//! SQLite-backed storage for Barista POS bills.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         barista-db                                      │
//! │                                                                         │
//! │  barista-pos (session layer)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────────────────────────────┐  │
//! │  │  Database (pool.rs)                                               │  │
//! │  │    │                                                              │  │
//! │  │    └──► BillRepository (repository/bill.rs)                       │  │
//! │  │           • generate_bill_id  (sequence + timestamp fallback)     │  │
//! │  │           • save_bill         (header row, then line items)       │  │
//! │  │           • get_by_id / get_items / list_bills                    │  │
//! │  │           • mark_paid         (one-way, guarded update)           │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (WAL) ── migrations embedded via sqlx::migrate!            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pool`] - Connection pool setup and the `Database` handle
//! - [`repository`] - The bill repository
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - `DbError` and the two-sided `SaveBillError`

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult, SaveBillError};
pub use pool::{Database, DbConfig};
pub use repository::BillRepository;
