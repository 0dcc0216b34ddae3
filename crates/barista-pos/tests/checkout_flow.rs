//! End-to-end register flow against a real (in-memory) SQLite store:
//! build a cart, save it as a bill, pay it from the receipt page, and run
//! every export over the persisted record.

use std::sync::Arc;
use std::time::Duration;

use barista_core::{Money, PaymentMethod, PaymentStatus};
use barista_db::{Database, DbConfig};
use barista_export::{render_plain, PrintCommand, TallyVoucher};
use barista_pos::{
    exports, BillFilter, CartState, CheckoutService, CheckoutSession, PaymentDetails,
    PaymentService, PosConfig, PosError, SimulatedGateway, SqliteBillStore,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("barista_pos=debug,barista_db=debug")
        .with_test_writer()
        .try_init();
}

async fn register() -> (Arc<CartState>, Arc<SqliteBillStore>, CheckoutService) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let store = Arc::new(SqliteBillStore::new(db));
    let cart = Arc::new(CartState::default());
    let checkout = CheckoutService::new(cart.clone(), store.clone());
    (cart, store, checkout)
}

#[tokio::test]
async fn full_checkout_payment_and_export_flow() {
    init_tracing();
    let config = PosConfig::default();
    let (cart, store, checkout) = register().await;

    // Build the order: 2x Espresso, 1x Muffin at 5% GST
    cart.add_item("hd1", "Espresso", Money::from_cents(12000));
    cart.add_item("hd1", "Espresso", Money::from_cents(12000));
    cart.add_item("fo4", "Muffin", Money::from_cents(10000));
    assert_eq!(cart.snapshot().total_cents, 35700);

    // Save
    let mut session = CheckoutSession::new();
    let bill_id = checkout.save_bill(&mut session).await.unwrap();
    assert_eq!(bill_id, "BRST000001");

    let (bill, items) = checkout.bill_receipt(&bill_id).await.unwrap();
    assert_eq!(bill.payment_status, PaymentStatus::Unpaid);
    assert_eq!(bill.subtotal_cents, 34000);
    assert_eq!(bill.tax_amount_cents, 1700);
    assert_eq!(bill.total_amount_cents, 35700);
    assert_eq!(items.len(), 2);

    // Ticket: QR payload points at the public receipt page
    let ticket = exports::ticket(&config, &bill, &items);
    let qr = ticket
        .iter()
        .find_map(|c| match c {
            PrintCommand::QrCode { payload, .. } => Some(payload.clone()),
            _ => None,
        })
        .expect("ticket carries a QR command");
    assert_eq!(qr, format!("{}/bill/{}", config.web_base_url, bill_id));

    let text = render_plain(&ticket);
    assert!(text.contains("Bill #BRST000001"));
    assert!(text.contains("$357.00"));

    // Tally export: ledger nets to zero on the persisted record
    let voucher = TallyVoucher::from_bill(&bill, &items);
    assert!(voucher.is_balanced());
    let (file_name, xml) = exports::tally_export(&bill, &items);
    assert_eq!(file_name, "tally-detailed-BRST000001.xml");
    assert!(xml.contains("<AMOUNT>-357.00</AMOUNT>"));
    assert!(xml.contains("<AMOUNT>340.00</AMOUNT>"));
    assert!(xml.contains("<AMOUNT>17.00</AMOUNT>"));

    // Pay from the receipt page
    let gateway = Arc::new(SimulatedGateway::new(Duration::ZERO));
    let payments = PaymentService::new(store.clone(), gateway);
    let paid = payments
        .pay(&bill_id, PaymentDetails::Upi { vpa: "guest@bank".into() })
        .await
        .unwrap();
    assert!(paid.is_paid());
    assert_eq!(paid.payment_method, Some(PaymentMethod::Upi));

    // Second payment attempt is rejected
    let err = payments.pay(&bill_id, PaymentDetails::Cash).await.unwrap_err();
    assert!(matches!(err, PosError::Core(_)));

    // Receipt card reflects the paid state
    let (paid_bill, items) = checkout.bill_receipt(&bill_id).await.unwrap();
    let card = exports::receipt_card(&config, &paid_bill, &items);
    let html = card.to_html();
    assert!(html.contains("✓ Paid"));
    assert!(html.contains("GSTIN: 07AAAAA0000A1Z5"));

    // Ticket printed → session completes, cart resets for the next order
    checkout.complete(session);
    assert!(cart.is_empty());

    // History shows the one bill
    let bills = checkout.list_bills(BillFilter::Today).await.unwrap();
    assert_eq!(bills.len(), 1);
    let summary = CheckoutService::summarize(&bills);
    assert_eq!(summary.count, 1);
    assert_eq!(summary.revenue_cents, 35700);
}

#[tokio::test]
async fn save_is_idempotent_per_session_against_sqlite() {
    init_tracing();
    let (cart, _store, checkout) = register().await;

    cart.add_item("cd1", "Cold Brew", Money::from_cents(20000));

    let mut session = CheckoutSession::new();
    let first = checkout.save_bill(&mut session).await.unwrap();
    let second = checkout.save_bill(&mut session).await.unwrap();
    assert_eq!(first, second);

    let bills = checkout.list_bills(BillFilter::All).await.unwrap();
    assert_eq!(bills.len(), 1);
}

#[tokio::test]
async fn receipt_page_not_found_state() {
    init_tracing();
    let (_cart, _store, checkout) = register().await;

    let err = checkout.bill_receipt("BRST424242").await.unwrap_err();
    assert!(err.is_not_found());
}
