//! # Checkout Flow
//!
//! Turns the live cart into a persisted bill.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Flow                                    │
//! │                                                                         │
//! │  "Save Bill" tap                                                        │
//! │       │                                                                 │
//! │       ├── session already has a bill id? ──► return it (re-tap guard)   │
//! │       ▼                                                                 │
//! │  snapshot the cart ── empty? ──► EmptyCart error                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  generate_bill_id() ── sequence, or local fallback                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  freeze snapshot into Bill + BillItems (created_at = now)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.save_bill() ── header, then line items                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  remember the id on the session; cart stays intact until the ticket     │
//! │  prints (complete() clears it)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use barista_core::{Bill, BillItem, CoreError, PaymentStatus};

use crate::error::PosResult;
use crate::state::CartState;
use crate::store::BillStore;

// =============================================================================
// Checkout Session
// =============================================================================

/// One bill-preview screen's worth of state.
///
/// Remembers the id once the bill is saved so a second tap on "Save Bill"
/// returns the existing bill instead of persisting a duplicate.
#[derive(Debug, Default)]
pub struct CheckoutSession {
    bill_id: Option<String>,
}

impl CheckoutSession {
    pub fn new() -> Self {
        CheckoutSession::default()
    }

    /// The saved bill id, if this session already saved one.
    pub fn bill_id(&self) -> Option<&str> {
        self.bill_id.as_deref()
    }
}

// =============================================================================
// Checkout Service
// =============================================================================

/// Orchestrates cart → bill persistence and the bills list views.
pub struct CheckoutService {
    cart: Arc<CartState>,
    store: Arc<dyn BillStore>,
}

impl CheckoutService {
    pub fn new(cart: Arc<CartState>, store: Arc<dyn BillStore>) -> Self {
        CheckoutService { cart, store }
    }

    /// Saves the current cart as a bill and returns its id.
    ///
    /// Idempotent per session: once a bill is saved, repeat calls return the
    /// same id without touching the store. The cart is left intact; callers
    /// clear it via [`complete`](Self::complete) once the ticket is out.
    pub async fn save_bill(&self, session: &mut CheckoutSession) -> PosResult<String> {
        if let Some(id) = &session.bill_id {
            return Ok(id.clone());
        }

        let snapshot = self.cart.snapshot();
        if snapshot.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }
        let tax_rate = self.cart.with_cart(|cart| cart.tax_rate());

        let bill_id = self.store.generate_bill_id().await;
        let now = Utc::now();

        let bill = Bill {
            id: bill_id.clone(),
            subtotal_cents: snapshot.subtotal_cents,
            tax_rate_bps: tax_rate.bps(),
            tax_amount_cents: snapshot.tax_amount_cents,
            total_amount_cents: snapshot.total_cents,
            payment_status: PaymentStatus::Unpaid,
            payment_method: None,
            created_at: now,
        };

        // Freeze the cart lines: names and prices on the bill must never
        // change when the catalog does.
        let items: Vec<BillItem> = snapshot
            .lines
            .iter()
            .map(|line| BillItem {
                id: Uuid::new_v4().to_string(),
                bill_id: bill_id.clone(),
                item_name: line.name.clone(),
                quantity: line.quantity,
                price_cents: line.unit_price_cents,
                item_total_cents: line.line_total_cents(),
            })
            .collect();

        self.store.save_bill(&bill, &items).await?;

        info!(bill_id = %bill_id, total_cents = bill.total_amount_cents, "Checkout saved");
        session.bill_id = Some(bill_id.clone());
        Ok(bill_id)
    }

    /// Finishes the session after the ticket has printed: clears the cart
    /// for the next order.
    pub fn complete(&self, session: CheckoutSession) {
        if session.bill_id.is_some() {
            self.cart.clear();
        }
    }

    /// Fetches a bill and its items for the receipt page.
    ///
    /// A missing bill is the page's "not found" state, reported as
    /// [`CoreError::BillNotFound`].
    pub async fn bill_receipt(&self, bill_id: &str) -> PosResult<(Bill, Vec<BillItem>)> {
        let bill = self
            .store
            .fetch_bill(bill_id)
            .await?
            .ok_or_else(|| CoreError::BillNotFound(bill_id.to_string()))?;
        let items = self.store.fetch_items(bill_id).await?;
        Ok((bill, items))
    }

    /// Lists bills for the history screen, newest first.
    pub async fn list_bills(&self, filter: BillFilter) -> PosResult<Vec<Bill>> {
        Ok(self.store.list_bills(filter.cutoff(Utc::now())).await?)
    }

    /// Count and revenue for a set of listed bills.
    pub fn summarize(bills: &[Bill]) -> BillsSummary {
        BillsSummary {
            count: bills.len(),
            revenue_cents: bills.iter().map(|b| b.total_amount_cents).sum(),
        }
    }
}

// =============================================================================
// List Views
// =============================================================================

/// Date-range filter for the bills history screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillFilter {
    /// Bills created since local midnight.
    Today,
    /// Bills created in the last seven days.
    LastSevenDays,
    /// Everything.
    All,
}

impl BillFilter {
    /// The `created_at` cutoff for this filter, or `None` for all bills.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            BillFilter::Today => Some(
                now.date_naive()
                    .and_hms_opt(0, 0, 0)
                    .expect("midnight is a valid time")
                    .and_utc(),
            ),
            BillFilter::LastSevenDays => Some(now - Duration::days(7)),
            BillFilter::All => None,
        }
    }
}

/// Header figures for the bills history screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillsSummary {
    pub count: usize,
    pub revenue_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosError;
    use crate::store::MemoryBillStore;
    use barista_core::Money;
    use chrono::TimeZone;

    fn service() -> (Arc<CartState>, CheckoutService) {
        let cart = Arc::new(CartState::default());
        let store = Arc::new(MemoryBillStore::new());
        let service = CheckoutService::new(cart.clone(), store);
        (cart, service)
    }

    #[tokio::test]
    async fn test_save_freezes_cart_into_bill() {
        let (cart, service) = service();
        cart.add_item("hd1", "Espresso", Money::from_cents(10000));
        cart.add_item("hd1", "Espresso", Money::from_cents(10000));
        cart.add_item("fo4", "Muffin", Money::from_cents(5000));

        let mut session = CheckoutSession::new();
        let id = service.save_bill(&mut session).await.unwrap();
        assert_eq!(id, "BRST000001");

        let (bill, items) = service.bill_receipt(&id).await.unwrap();
        assert_eq!(bill.subtotal_cents, 25000);
        assert_eq!(bill.tax_amount_cents, 1250);
        assert_eq!(bill.total_amount_cents, 26250);
        assert_eq!(bill.payment_status, PaymentStatus::Unpaid);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_name, "Espresso");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].item_total_cents, 20000);
        assert!(items.iter().all(|i| i.bill_id == id));
    }

    #[tokio::test]
    async fn test_empty_cart_cannot_checkout() {
        let (_cart, service) = service();
        let mut session = CheckoutSession::new();

        let err = service.save_bill(&mut session).await.unwrap_err();
        assert!(matches!(err, PosError::Core(CoreError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_second_save_returns_same_bill() {
        let (cart, service) = service();
        cart.add_item("hd1", "Espresso", Money::from_cents(12000));

        let mut session = CheckoutSession::new();
        let first = service.save_bill(&mut session).await.unwrap();
        let second = service.save_bill(&mut session).await.unwrap();
        assert_eq!(first, second);

        // Only one bill in the store
        let bills = service.list_bills(BillFilter::All).await.unwrap();
        assert_eq!(bills.len(), 1);
    }

    #[tokio::test]
    async fn test_cart_survives_save_and_clears_on_complete() {
        let (cart, service) = service();
        cart.add_item("hd1", "Espresso", Money::from_cents(12000));

        let mut session = CheckoutSession::new();
        service.save_bill(&mut session).await.unwrap();
        assert!(!cart.is_empty());

        service.complete(session);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_missing_bill_is_not_found() {
        let (_cart, service) = service();
        let err = service.bill_receipt("BRST999999").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_filter_cutoffs() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();

        assert_eq!(
            BillFilter::Today.cutoff(now).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap()
        );
        assert_eq!(
            BillFilter::LastSevenDays.cutoff(now).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 7, 9, 26, 53).unwrap()
        );
        assert_eq!(BillFilter::All.cutoff(now), None);
    }

    #[test]
    fn test_summary_totals() {
        let mk = |id: &str, total: i64| Bill {
            id: id.to_string(),
            subtotal_cents: total,
            tax_rate_bps: 0,
            tax_amount_cents: 0,
            total_amount_cents: total,
            payment_status: PaymentStatus::Paid,
            payment_method: None,
            created_at: Utc::now(),
        };

        let bills = vec![mk("a", 26250), mk("b", 12600)];
        let summary = CheckoutService::summarize(&bills);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.revenue_cents, 38850);
    }
}
