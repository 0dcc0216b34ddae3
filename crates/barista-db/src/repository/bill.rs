//! # Bill Repository
//!
//! The persistence gateway for bills: id allocation, the two-step bill save,
//! receipt reads, list views and the one-way payment status flip.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         save_bill                                       │
//! │                                                                         │
//! │  1. INSERT bills (header row: totals, status='unpaid', created_at)      │
//! │          │                                                              │
//! │          │ error ──► SaveBillError::Header (nothing persisted)          │
//! │          ▼                                                              │
//! │  2. INSERT bill_items (one row per line, insertion order)               │
//! │          │                                                              │
//! │          │ error ──► SaveBillError::LineItems (header may be orphaned)  │
//! │          ▼                                                              │
//! │  3. Ok(())                                                              │
//! │                                                                         │
//! │  No transaction wraps the two steps. A line-item failure leaves the     │
//! │  header behind; the caller surfaces the error and the operator retries. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bill Id Allocation
//! ```text
//! generate_bill_id()
//!     │
//!     ├── sequence row bump succeeds ──► "BRST000042"  (zero-padded, 6 wide)
//!     │
//!     └── any store failure ──► warn! + local fallback:
//!                               "BRST" + last 6 digits of unix-millis
//! ```
//! The fallback keeps checkout working when the sequence is unreachable, at
//! the cost of ids that are unique only in practice, not by construction.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use barista_core::{Bill, BillItem, PaymentMethod, PaymentStatus, BILL_ID_PREFIX};

use crate::error::{DbError, DbResult, SaveBillError};

// =============================================================================
// Repository
// =============================================================================

/// Repository for bill headers and line items.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    /// Creates a new bill repository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    // =========================================================================
    // Id Allocation
    // =========================================================================

    /// Bumps the persistent sequence and returns the next bill id.
    ///
    /// The single-row `bill_sequence` table is updated atomically; two
    /// concurrent callers can never observe the same value.
    pub async fn next_bill_id(&self) -> DbResult<String> {
        let value: i64 =
            sqlx::query_scalar("UPDATE bill_sequence SET value = value + 1 WHERE id = 1 RETURNING value")
                .fetch_one(&self.pool)
                .await?;

        Ok(format!("{}{:06}", BILL_ID_PREFIX, value))
    }

    /// Returns the next bill id, degrading to a local timestamp-derived id
    /// when the sequence cannot be reached.
    ///
    /// The fallback never fails and never blocks checkout; the degraded id
    /// is logged so the operator can spot it later.
    pub async fn generate_bill_id(&self) -> String {
        match self.next_bill_id().await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Bill sequence unavailable, using timestamp fallback id");
                fallback_bill_id(Utc::now())
            }
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a bill header row.
    pub async fn insert_bill(&self, bill: &Bill) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bills (
                id, subtotal_cents, tax_rate_bps, tax_amount_cents,
                total_amount_cents, payment_status, payment_method, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&bill.id)
        .bind(bill.subtotal_cents)
        .bind(bill.tax_rate_bps)
        .bind(bill.tax_amount_cents)
        .bind(bill.total_amount_cents)
        .bind(bill.payment_status)
        .bind(bill.payment_method)
        .bind(bill.created_at)
        .execute(&self.pool)
        .await?;

        debug!(bill_id = %bill.id, total_cents = bill.total_amount_cents, "Bill header inserted");
        Ok(())
    }

    /// Inserts the line-item rows for a bill, in the order given.
    pub async fn insert_items(&self, items: &[BillItem]) -> DbResult<()> {
        for item in items {
            sqlx::query(
                r#"
                INSERT INTO bill_items (
                    id, bill_id, item_name, quantity, price_cents, item_total_cents
                )
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&item.bill_id)
            .bind(&item.item_name)
            .bind(item.quantity)
            .bind(item.price_cents)
            .bind(item.item_total_cents)
            .execute(&self.pool)
            .await?;
        }

        debug!(count = items.len(), "Bill line items inserted");
        Ok(())
    }

    /// Persists a bill: header first, then line items.
    ///
    /// The two writes are NOT wrapped in a transaction. The error type tells
    /// the caller which write failed; a `LineItems` failure means an orphaned
    /// header row may exist.
    pub async fn save_bill(&self, bill: &Bill, items: &[BillItem]) -> Result<(), SaveBillError> {
        self.insert_bill(bill).await.map_err(SaveBillError::Header)?;

        self.insert_items(items)
            .await
            .map_err(SaveBillError::LineItems)?;

        info!(
            bill_id = %bill.id,
            items = items.len(),
            total_cents = bill.total_amount_cents,
            "Bill saved"
        );
        Ok(())
    }

    /// Flips a bill from unpaid to paid and records the payment method.
    ///
    /// The `WHERE payment_status = 'unpaid'` guard makes the transition
    /// one-way at the store level; a second payment attempt matches zero
    /// rows. Returns the distinction:
    ///
    /// * `Ok(true)`  - bill was unpaid and is now paid
    /// * `Ok(false)` - bill exists but was already paid
    /// * `Err(NotFound)` - no such bill
    pub async fn mark_paid(&self, bill_id: &str, method: PaymentMethod) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bills
            SET payment_status = 'paid', payment_method = ?
            WHERE id = ? AND payment_status = 'unpaid'
            "#,
        )
        .bind(method)
        .bind(bill_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(bill_id = %bill_id, method = ?method, "Bill marked paid");
            return Ok(true);
        }

        // Zero rows: either the bill is already paid or it doesn't exist.
        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bills WHERE id = ?")
            .bind(bill_id)
            .fetch_one(&self.pool)
            .await?;

        if exists > 0 {
            debug!(bill_id = %bill_id, "Payment attempt on already-paid bill");
            Ok(false)
        } else {
            Err(DbError::not_found("Bill", bill_id))
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches a bill header by id.
    pub async fn get_by_id(&self, bill_id: &str) -> DbResult<Option<Bill>> {
        let bill = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, subtotal_cents, tax_rate_bps, tax_amount_cents,
                   total_amount_cents, payment_status, payment_method, created_at
            FROM bills
            WHERE id = ?
            "#,
        )
        .bind(bill_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bill)
    }

    /// Fetches the line items of a bill, in the order they were saved.
    pub async fn get_items(&self, bill_id: &str) -> DbResult<Vec<BillItem>> {
        let items = sqlx::query_as::<_, BillItem>(
            r#"
            SELECT id, bill_id, item_name, quantity, price_cents, item_total_cents
            FROM bill_items
            WHERE bill_id = ?
            ORDER BY rowid
            "#,
        )
        .bind(bill_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists bills newest-first, optionally only those created at or after
    /// `since`.
    pub async fn list_bills(&self, since: Option<DateTime<Utc>>) -> DbResult<Vec<Bill>> {
        let bills = match since {
            Some(cutoff) => {
                sqlx::query_as::<_, Bill>(
                    r#"
                    SELECT id, subtotal_cents, tax_rate_bps, tax_amount_cents,
                           total_amount_cents, payment_status, payment_method, created_at
                    FROM bills
                    WHERE created_at >= ?
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(cutoff)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Bill>(
                    r#"
                    SELECT id, subtotal_cents, tax_rate_bps, tax_amount_cents,
                           total_amount_cents, payment_status, payment_method, created_at
                    FROM bills
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(bills)
    }
}

// =============================================================================
// Fallback Id
// =============================================================================

/// Builds the degraded local bill id from a timestamp: the prefix plus the
/// low six digits of the unix-millis clock.
fn fallback_bill_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis();
    format!("{}{:06}", BILL_ID_PREFIX, millis.rem_euclid(1_000_000))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::TimeZone;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_bill(id: &str) -> Bill {
        Bill {
            id: id.to_string(),
            subtotal_cents: 25000,
            tax_rate_bps: 500,
            tax_amount_cents: 1250,
            total_amount_cents: 26250,
            payment_status: PaymentStatus::Unpaid,
            payment_method: None,
            created_at: Utc::now(),
        }
    }

    fn sample_items(bill_id: &str) -> Vec<BillItem> {
        vec![
            BillItem {
                id: uuid::Uuid::new_v4().to_string(),
                bill_id: bill_id.to_string(),
                item_name: "Espresso".to_string(),
                quantity: 2,
                price_cents: 12000,
                item_total_cents: 24000,
            },
            BillItem {
                id: uuid::Uuid::new_v4().to_string(),
                bill_id: bill_id.to_string(),
                item_name: "Muffin".to_string(),
                quantity: 1,
                price_cents: 10000,
                item_total_cents: 10000,
            },
        ]
    }

    #[tokio::test]
    async fn test_sequence_ids_are_monotonic_and_padded() {
        let db = test_db().await;
        let repo = db.bills();

        let first = repo.next_bill_id().await.unwrap();
        let second = repo.next_bill_id().await.unwrap();

        assert_eq!(first, "BRST000001");
        assert_eq!(second, "BRST000002");
    }

    #[tokio::test]
    async fn test_generate_bill_id_uses_sequence_when_available() {
        let db = test_db().await;
        let repo = db.bills();

        let id = repo.generate_bill_id().await;
        assert_eq!(id, "BRST000001");
    }

    #[test]
    fn test_fallback_id_shape() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let id = fallback_bill_id(now);

        assert!(id.starts_with("BRST"));
        assert_eq!(id.len(), 10);
        assert!(id[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_save_and_fetch_bill() {
        let db = test_db().await;
        let repo = db.bills();

        let bill = sample_bill("BRST000001");
        let items = sample_items(&bill.id);
        repo.save_bill(&bill, &items).await.unwrap();

        let fetched = repo.get_by_id("BRST000001").await.unwrap().unwrap();
        assert_eq!(fetched.total_amount_cents, 26250);
        assert_eq!(fetched.payment_status, PaymentStatus::Unpaid);
        assert_eq!(fetched.payment_method, None);

        let fetched_items = repo.get_items("BRST000001").await.unwrap();
        assert_eq!(fetched_items.len(), 2);
        // Insertion order is preserved
        assert_eq!(fetched_items[0].item_name, "Espresso");
        assert_eq!(fetched_items[1].item_name, "Muffin");
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let db = test_db().await;
        let repo = db.bills();

        assert!(repo.get_by_id("BRST999999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_header_is_a_header_error() {
        let db = test_db().await;
        let repo = db.bills();

        let bill = sample_bill("BRST000001");
        repo.save_bill(&bill, &sample_items(&bill.id)).await.unwrap();

        let err = repo
            .save_bill(&bill, &sample_items(&bill.id))
            .await
            .unwrap_err();
        assert!(matches!(err, SaveBillError::Header(_)));
    }

    #[tokio::test]
    async fn test_item_failure_leaves_header_behind() {
        let db = test_db().await;
        let repo = db.bills();

        let bill = sample_bill("BRST000001");
        // Line item pointing at a nonexistent bill trips the FK check.
        let bad_items = vec![BillItem {
            id: uuid::Uuid::new_v4().to_string(),
            bill_id: "BRST424242".to_string(),
            item_name: "Latte".to_string(),
            quantity: 1,
            price_cents: 16000,
            item_total_cents: 16000,
        }];

        let err = repo.save_bill(&bill, &bad_items).await.unwrap_err();
        assert!(matches!(err, SaveBillError::LineItems(_)));

        // No rollback: the header row survives the failed save.
        assert!(repo.get_by_id("BRST000001").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_mark_paid_is_one_way() {
        let db = test_db().await;
        let repo = db.bills();

        let bill = sample_bill("BRST000001");
        repo.save_bill(&bill, &sample_items(&bill.id)).await.unwrap();

        let updated = repo.mark_paid("BRST000001", PaymentMethod::Upi).await.unwrap();
        assert!(updated);

        let paid = repo.get_by_id("BRST000001").await.unwrap().unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(paid.payment_method, Some(PaymentMethod::Upi));

        // Second attempt matches zero rows and changes nothing.
        let second = repo.mark_paid("BRST000001", PaymentMethod::Cash).await.unwrap();
        assert!(!second);

        let still_upi = repo.get_by_id("BRST000001").await.unwrap().unwrap();
        assert_eq!(still_upi.payment_method, Some(PaymentMethod::Upi));
    }

    #[tokio::test]
    async fn test_mark_paid_missing_bill_is_not_found() {
        let db = test_db().await;
        let repo = db.bills();

        let err = repo
            .mark_paid("BRST999999", PaymentMethod::Cash)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_bills_newest_first_with_cutoff() {
        let db = test_db().await;
        let repo = db.bills();

        let mut old = sample_bill("BRST000001");
        old.created_at = Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap();
        let mut recent = sample_bill("BRST000002");
        recent.created_at = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();

        repo.insert_bill(&old).await.unwrap();
        repo.insert_bill(&recent).await.unwrap();

        let all = repo.list_bills(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "BRST000002"); // newest first

        let cutoff = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let filtered = repo.list_bills(Some(cutoff)).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "BRST000002");
    }
}
