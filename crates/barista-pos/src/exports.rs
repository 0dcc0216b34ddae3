//! # Export Actions
//!
//! Glue between the session configuration and the receipt renderers: these
//! are the "Print", "Tally XML" and "Share" actions, with the store branding
//! and receipt origin filled in from [`PosConfig`].
//!
//! Renderer failures (device not paired, permission denied) never touch the
//! saved bill; the caller alerts and the bill stays as persisted.

use chrono::Utc;
use tracing::info;

use barista_core::{Bill, BillItem};
use barista_export::{
    build_ticket, receipt_url, PrintCommand, PrintError, PrinterPort, ReceiptCard, TallyVoucher,
    TicketOptions,
};

use crate::config::PosConfig;

/// The shareable link for a bill, `<web_base_url>/bill/<billId>`.
pub fn share_url(config: &PosConfig, bill_id: &str) -> String {
    receipt_url(&config.web_base_url, bill_id)
}

/// Builds the printer ticket for a saved bill, stamped with the current time.
pub fn ticket(config: &PosConfig, bill: &Bill, items: &[BillItem]) -> Vec<PrintCommand> {
    let opts = TicketOptions {
        store_name: config.store_name.clone(),
        web_base_url: config.web_base_url.clone(),
        printed_at: Utc::now(),
    };
    build_ticket(bill, items, &opts)
}

/// Builds and sends the ticket to a paired printer.
pub fn print_ticket(
    port: &mut dyn PrinterPort,
    config: &PosConfig,
    bill: &Bill,
    items: &[BillItem],
) -> Result<(), PrintError> {
    let commands = ticket(config, bill, items);
    port.send(&commands)?;
    info!(bill_id = %bill.id, commands = commands.len(), "Ticket printed");
    Ok(())
}

/// Renders the Tally voucher XML, returning `(file_name, xml)`.
pub fn tally_export(bill: &Bill, items: &[BillItem]) -> (String, String) {
    let voucher = TallyVoucher::from_bill(bill, items);
    (voucher.file_name(), voucher.to_xml())
}

/// The receipt card for the web page / PDF snapshot, with branding applied.
pub fn receipt_card<'a>(config: &'a PosConfig, bill: &'a Bill, items: &'a [BillItem]) -> ReceiptCard<'a> {
    ReceiptCard::new(&config.store_name, &config.gstin, bill, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use barista_core::PaymentStatus;

    fn sample() -> (Bill, Vec<BillItem>) {
        let bill = Bill {
            id: "BRST000007".to_string(),
            subtotal_cents: 12000,
            tax_rate_bps: 500,
            tax_amount_cents: 600,
            total_amount_cents: 12600,
            payment_status: PaymentStatus::Unpaid,
            payment_method: None,
            created_at: Utc::now(),
        };
        let items = vec![BillItem {
            id: "a".to_string(),
            bill_id: bill.id.clone(),
            item_name: "Espresso".to_string(),
            quantity: 1,
            price_cents: 12000,
            item_total_cents: 12000,
        }];
        (bill, items)
    }

    #[test]
    fn test_share_url_uses_configured_origin() {
        let config = PosConfig::default();
        assert_eq!(
            share_url(&config, "BRST000007"),
            format!("{}/bill/BRST000007", config.web_base_url)
        );
    }

    #[test]
    fn test_ticket_qr_matches_share_url() {
        let config = PosConfig::default();
        let (bill, items) = sample();

        let cmds = ticket(&config, &bill, &items);
        let qr_payload = cmds
            .iter()
            .find_map(|c| match c {
                PrintCommand::QrCode { payload, .. } => Some(payload.clone()),
                _ => None,
            })
            .unwrap();

        assert_eq!(qr_payload, share_url(&config, &bill.id));
    }

    #[test]
    fn test_tally_export_names_the_file_after_the_bill() {
        let (bill, items) = sample();
        let (name, xml) = tally_export(&bill, &items);

        assert_eq!(name, "tally-detailed-BRST000007.xml");
        assert!(xml.contains("<VOUCHERNUMBER>BRST000007</VOUCHERNUMBER>"));
    }

    #[test]
    fn test_print_failure_surfaces_the_error() {
        struct DeadPrinter;
        impl PrinterPort for DeadPrinter {
            fn send(&mut self, _commands: &[PrintCommand]) -> Result<(), PrintError> {
                Err(PrintError::NotPaired("no paired devices".into()))
            }
        }

        let config = PosConfig::default();
        let (bill, items) = sample();
        let err = print_ticket(&mut DeadPrinter, &config, &bill, &items).unwrap_err();
        assert!(matches!(err, PrintError::NotPaired(_)));
    }
}
