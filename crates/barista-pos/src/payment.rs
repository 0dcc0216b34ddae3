//! # Payment Simulator
//!
//! The simulated payment flow for the public receipt page: validate the
//! form, "process" for a fixed delay, then flip the bill to paid.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Payment Flow                                     │
//! │                                                                         │
//! │  "Pay Now" with details                                                 │
//! │       │                                                                 │
//! │       ├── details invalid ──────────► InvalidPaymentDetails             │
//! │       ▼                                                                 │
//! │  fetch bill                                                             │
//! │       ├── missing ──────────────────► BillNotFound                      │
//! │       ├── already paid ─────────────► InvalidPaymentTransition          │
//! │       ▼                                                                 │
//! │  authorizer.authorize()  ── simulated gateway: sleep 2s, approve        │
//! │       ▼                                                                 │
//! │  store.mark_paid()       ── guarded update; a racing payment that       │
//! │       │                     got there first loses us the flip           │
//! │       ├── flipped ──────────────────► refetch, return the paid bill     │
//! │       └── already paid ─────────────► InvalidPaymentTransition          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use barista_core::{Bill, CoreError, CoreResult, PaymentMethod};

use crate::error::{PosError, PosResult};
use crate::store::BillStore;

// =============================================================================
// Payment Details
// =============================================================================

/// What the payer typed into the payment form.
///
/// Validation mirrors the receipt page's form rules; none of these details
/// are stored, only the resulting payment method is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum PaymentDetails {
    /// UPI id, e.g. `yourname@bank`.
    Upi { vpa: String },
    /// Card fields. Number length is checked, not Luhn-validated: this is
    /// a simulator, not a processor.
    Card {
        number: String,
        /// MM/YY
        expiry: String,
        cvv: String,
    },
    /// Pay at the counter; nothing to validate.
    Cash,
}

impl PaymentDetails {
    /// The payment method these details settle with.
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentDetails::Upi { .. } => PaymentMethod::Upi,
            PaymentDetails::Card { .. } => PaymentMethod::Card,
            PaymentDetails::Cash => PaymentMethod::Cash,
        }
    }

    /// Form-level validation, matching the receipt page's rules.
    pub fn validate(&self) -> CoreResult<()> {
        match self {
            PaymentDetails::Upi { vpa } => {
                if !vpa.contains('@') {
                    return Err(CoreError::InvalidPaymentDetails(
                        "UPI id must contain '@'".to_string(),
                    ));
                }
                Ok(())
            }
            PaymentDetails::Card { number, expiry, cvv } => {
                let digits = number.chars().filter(|c| c.is_ascii_digit()).count();
                if digits < 16 {
                    return Err(CoreError::InvalidPaymentDetails(
                        "Card number must have at least 16 digits".to_string(),
                    ));
                }
                if expiry.len() < 5 {
                    return Err(CoreError::InvalidPaymentDetails(
                        "Expiry must be MM/YY".to_string(),
                    ));
                }
                if cvv.len() < 3 {
                    return Err(CoreError::InvalidPaymentDetails(
                        "CVV must have at least 3 digits".to_string(),
                    ));
                }
                Ok(())
            }
            PaymentDetails::Cash => Ok(()),
        }
    }
}

// =============================================================================
// Authorizer Seam
// =============================================================================

/// The gateway seam: decides whether a payment goes through.
#[async_trait]
pub trait PaymentAuthorizer: Send + Sync {
    /// Authorizes a payment against a bill. Takes as long as the gateway
    /// takes; the caller shows a processing state meanwhile.
    async fn authorize(&self, bill: &Bill, details: &PaymentDetails) -> CoreResult<()>;
}

/// The simulated gateway: waits a fixed delay, then approves everything.
///
/// There is no real processor behind this system; the delay exists so the
/// "Processing Securely..." state is observable.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        SimulatedGateway { delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        SimulatedGateway::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl PaymentAuthorizer for SimulatedGateway {
    async fn authorize(&self, bill: &Bill, details: &PaymentDetails) -> CoreResult<()> {
        tokio::time::sleep(self.delay).await;
        info!(
            bill_id = %bill.id,
            method = ?details.method(),
            amount_cents = bill.total_amount_cents,
            "Simulated gateway approved payment"
        );
        Ok(())
    }
}

// =============================================================================
// Payment Service
// =============================================================================

/// Drives a payment end to end: validate, authorize, flip the bill.
pub struct PaymentService {
    store: Arc<dyn BillStore>,
    authorizer: Arc<dyn PaymentAuthorizer>,
}

impl PaymentService {
    pub fn new(store: Arc<dyn BillStore>, authorizer: Arc<dyn PaymentAuthorizer>) -> Self {
        PaymentService { store, authorizer }
    }

    /// Pays a bill. Returns the updated (paid) bill on success.
    ///
    /// The unpaid → paid transition is enforced twice: here against the
    /// fetched bill for a fast error, and again inside the store's guarded
    /// update in case another payer raced us.
    pub async fn pay(&self, bill_id: &str, details: PaymentDetails) -> PosResult<Bill> {
        details.validate()?;

        let bill = self
            .store
            .fetch_bill(bill_id)
            .await?
            .ok_or_else(|| CoreError::BillNotFound(bill_id.to_string()))?;

        if bill.is_paid() {
            return Err(already_paid(&bill));
        }

        self.authorizer.authorize(&bill, &details).await?;

        let flipped = self.store.mark_paid(bill_id, details.method()).await?;
        if !flipped {
            // Someone else paid between our fetch and the update.
            warn!(bill_id = %bill_id, "Payment lost the race; bill already paid");
            return Err(already_paid(&bill));
        }

        let paid = self
            .store
            .fetch_bill(bill_id)
            .await?
            .ok_or_else(|| CoreError::BillNotFound(bill_id.to_string()))?;
        Ok(paid)
    }
}

fn already_paid(bill: &Bill) -> PosError {
    CoreError::InvalidPaymentTransition {
        bill_id: bill.id.clone(),
        current_status: "paid".to_string(),
    }
    .into()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBillStore;
    use barista_core::PaymentStatus;
    use chrono::Utc;

    fn unpaid_bill(id: &str) -> Bill {
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

    async fn service_with_bill() -> (Arc<MemoryBillStore>, PaymentService) {
        let store = Arc::new(MemoryBillStore::new());
        store.save_bill(&unpaid_bill("BRST000001"), &[]).await.unwrap();
        // Zero delay keeps the tests fast; the flow is identical.
        let gateway = Arc::new(SimulatedGateway::new(Duration::ZERO));
        let service = PaymentService::new(store.clone(), gateway);
        (store, service)
    }

    #[test]
    fn test_details_validation() {
        assert!(PaymentDetails::Upi { vpa: "nina@bank".into() }.validate().is_ok());
        assert!(PaymentDetails::Upi { vpa: "ninabank".into() }.validate().is_err());

        let good_card = PaymentDetails::Card {
            number: "4111 1111 1111 1111".into(),
            expiry: "12/28".into(),
            cvv: "123".into(),
        };
        assert!(good_card.validate().is_ok());

        let short_card = PaymentDetails::Card {
            number: "4111".into(),
            expiry: "12/28".into(),
            cvv: "123".into(),
        };
        assert!(short_card.validate().is_err());

        assert!(PaymentDetails::Cash.validate().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_gateway_takes_the_configured_delay() {
        let gateway = SimulatedGateway::default();
        let start = tokio::time::Instant::now();

        gateway
            .authorize(&unpaid_bill("BRST000001"), &PaymentDetails::Cash)
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_successful_payment_flips_bill() {
        let (_store, service) = service_with_bill().await;

        let paid = service
            .pay("BRST000001", PaymentDetails::Upi { vpa: "nina@bank".into() })
            .await
            .unwrap();

        assert!(paid.is_paid());
        assert_eq!(paid.payment_method, Some(PaymentMethod::Upi));
    }

    #[tokio::test]
    async fn test_double_payment_is_rejected() {
        let (_store, service) = service_with_bill().await;

        service.pay("BRST000001", PaymentDetails::Cash).await.unwrap();
        let err = service.pay("BRST000001", PaymentDetails::Cash).await.unwrap_err();

        assert!(matches!(
            err,
            PosError::Core(CoreError::InvalidPaymentTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_bill_is_not_found() {
        let (_store, service) = service_with_bill().await;

        let err = service.pay("BRST999999", PaymentDetails::Cash).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_details_never_reach_the_store() {
        let (store, service) = service_with_bill().await;

        let err = service
            .pay("BRST000001", PaymentDetails::Upi { vpa: "no-at-sign".into() })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PosError::Core(CoreError::InvalidPaymentDetails(_))
        ));

        let bill = store.fetch_bill("BRST000001").await.unwrap().unwrap();
        assert!(!bill.is_paid());
    }
}
