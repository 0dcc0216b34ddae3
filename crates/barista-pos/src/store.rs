//! # Bill Store Seam
//!
//! The session layer talks to persistence through the [`BillStore`] trait
//! rather than the SQLite repository directly, so checkout and payment can
//! be tested without a database and alternative backends can be slotted in.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use barista_core::{Bill, BillItem, PaymentMethod, PaymentStatus, BILL_ID_PREFIX};
use barista_db::{Database, DbError, DbResult, SaveBillError};

/// Persistence operations the session layer needs.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Allocates the next bill id. Never fails: implementations degrade to
    /// a local fallback id rather than blocking checkout.
    async fn generate_bill_id(&self) -> String;

    /// Persists a bill header and its line items.
    async fn save_bill(&self, bill: &Bill, items: &[BillItem]) -> Result<(), SaveBillError>;

    /// Fetches a bill header.
    async fn fetch_bill(&self, bill_id: &str) -> DbResult<Option<Bill>>;

    /// Fetches a bill's line items, in saved order.
    async fn fetch_items(&self, bill_id: &str) -> DbResult<Vec<BillItem>>;

    /// Lists bills newest-first, optionally from a cutoff.
    async fn list_bills(&self, since: Option<DateTime<Utc>>) -> DbResult<Vec<Bill>>;

    /// One-way unpaid → paid flip. `Ok(false)` means the bill was already
    /// paid; a missing bill is `Err(NotFound)`.
    async fn mark_paid(&self, bill_id: &str, method: PaymentMethod) -> DbResult<bool>;
}

// =============================================================================
// SQLite-Backed Store
// =============================================================================

/// Production store, delegating to the SQLite bill repository.
#[derive(Debug, Clone)]
pub struct SqliteBillStore {
    db: Database,
}

impl SqliteBillStore {
    pub fn new(db: Database) -> Self {
        SqliteBillStore { db }
    }
}

#[async_trait]
impl BillStore for SqliteBillStore {
    async fn generate_bill_id(&self) -> String {
        self.db.bills().generate_bill_id().await
    }

    async fn save_bill(&self, bill: &Bill, items: &[BillItem]) -> Result<(), SaveBillError> {
        self.db.bills().save_bill(bill, items).await
    }

    async fn fetch_bill(&self, bill_id: &str) -> DbResult<Option<Bill>> {
        self.db.bills().get_by_id(bill_id).await
    }

    async fn fetch_items(&self, bill_id: &str) -> DbResult<Vec<BillItem>> {
        self.db.bills().get_items(bill_id).await
    }

    async fn list_bills(&self, since: Option<DateTime<Utc>>) -> DbResult<Vec<Bill>> {
        self.db.bills().list_bills(since).await
    }

    async fn mark_paid(&self, bill_id: &str, method: PaymentMethod) -> DbResult<bool> {
        self.db.bills().mark_paid(bill_id, method).await
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// In-memory store for tests and offline demos. Same observable semantics
/// as the SQLite store, including the one-way payment flip.
#[derive(Debug, Default)]
pub struct MemoryBillStore {
    sequence: AtomicI64,
    bills: Mutex<HashMap<String, (Bill, Vec<BillItem>)>>,
}

impl MemoryBillStore {
    pub fn new() -> Self {
        MemoryBillStore::default()
    }
}

#[async_trait]
impl BillStore for MemoryBillStore {
    async fn generate_bill_id(&self) -> String {
        let n = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}{:06}", BILL_ID_PREFIX, n)
    }

    async fn save_bill(&self, bill: &Bill, items: &[BillItem]) -> Result<(), SaveBillError> {
        let mut bills = self.bills.lock().expect("Bill store mutex poisoned");
        if bills.contains_key(&bill.id) {
            return Err(SaveBillError::Header(DbError::UniqueViolation {
                field: "bills.id".to_string(),
                value: bill.id.clone(),
            }));
        }
        bills.insert(bill.id.clone(), (bill.clone(), items.to_vec()));
        Ok(())
    }

    async fn fetch_bill(&self, bill_id: &str) -> DbResult<Option<Bill>> {
        let bills = self.bills.lock().expect("Bill store mutex poisoned");
        Ok(bills.get(bill_id).map(|(bill, _)| bill.clone()))
    }

    async fn fetch_items(&self, bill_id: &str) -> DbResult<Vec<BillItem>> {
        let bills = self.bills.lock().expect("Bill store mutex poisoned");
        Ok(bills
            .get(bill_id)
            .map(|(_, items)| items.clone())
            .unwrap_or_default())
    }

    async fn list_bills(&self, since: Option<DateTime<Utc>>) -> DbResult<Vec<Bill>> {
        let bills = self.bills.lock().expect("Bill store mutex poisoned");
        let mut out: Vec<Bill> = bills
            .values()
            .map(|(bill, _)| bill.clone())
            .filter(|bill| since.map_or(true, |cutoff| bill.created_at >= cutoff))
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn mark_paid(&self, bill_id: &str, method: PaymentMethod) -> DbResult<bool> {
        let mut bills = self.bills.lock().expect("Bill store mutex poisoned");
        match bills.get_mut(bill_id) {
            Some((bill, _)) => {
                if bill.payment_status == PaymentStatus::Paid {
                    return Ok(false);
                }
                bill.payment_status = PaymentStatus::Paid;
                bill.payment_method = Some(method);
                Ok(true)
            }
            None => Err(DbError::not_found("Bill", bill_id)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bill(id: &str) -> Bill {
        Bill {
            id: id.to_string(),
            subtotal_cents: 12000,
            tax_rate_bps: 500,
            tax_amount_cents: 600,
            total_amount_cents: 12600,
            payment_status: PaymentStatus::Unpaid,
            payment_method: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_memory_store_ids() {
        let store = MemoryBillStore::new();
        assert_eq!(store.generate_bill_id().await, "BRST000001");
        assert_eq!(store.generate_bill_id().await, "BRST000002");
    }

    #[tokio::test]
    async fn test_memory_store_payment_flip_matches_sqlite_semantics() {
        let store = MemoryBillStore::new();
        store.save_bill(&sample_bill("BRST000001"), &[]).await.unwrap();

        assert!(store.mark_paid("BRST000001", PaymentMethod::Card).await.unwrap());
        assert!(!store.mark_paid("BRST000001", PaymentMethod::Cash).await.unwrap());

        let bill = store.fetch_bill("BRST000001").await.unwrap().unwrap();
        assert_eq!(bill.payment_method, Some(PaymentMethod::Card));

        let err = store.mark_paid("BRST999999", PaymentMethod::Cash).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_memory_store_duplicate_save_is_header_error() {
        let store = MemoryBillStore::new();
        let bill = sample_bill("BRST000001");
        store.save_bill(&bill, &[]).await.unwrap();

        let err = store.save_bill(&bill, &[]).await.unwrap_err();
        assert!(matches!(err, SaveBillError::Header(_)));
    }
}
