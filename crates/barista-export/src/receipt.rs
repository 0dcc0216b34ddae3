//! # Shareable Receipt
//!
//! The public-facing receipt: the URL encoded into QR codes and share
//! sheets, and the receipt card (plain text and HTML) the web page renders
//! for a persisted bill. The HTML card is also what gets rasterized into
//! the PDF snapshot, so its structure is the single source of layout.

use serde::Serialize;

use barista_core::{Bill, BillItem};

/// Builds the public receipt URL for a bill.
///
/// Must exactly match the hosted receipt page's routing; the same string is
/// printed in the QR code and used by the share action.
pub fn receipt_url(base: &str, bill_id: &str) -> String {
    format!("{}/bill/{}", base.trim_end_matches('/'), bill_id)
}

// =============================================================================
// Receipt Card
// =============================================================================

/// The receipt card for one persisted bill.
///
/// Pure view model: every field is already computed by the time the bill is
/// saved. Serializable so the web page can take it as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptCard<'a> {
    pub store_name: &'a str,
    pub tagline: &'a str,
    /// Tax registration line shown under the store name.
    pub gstin: &'a str,
    pub bill: &'a Bill,
    pub items: &'a [BillItem],
}

impl<'a> ReceiptCard<'a> {
    /// Builds the card with the café's fixed branding.
    pub fn new(store_name: &'a str, gstin: &'a str, bill: &'a Bill, items: &'a [BillItem]) -> Self {
        ReceiptCard {
            store_name,
            tagline: "Every cup tells a story",
            gstin,
            bill,
            items,
        }
    }

    /// Status badge text: `✓ Paid` or `⚠ Unpaid`.
    pub fn status_badge(&self) -> &'static str {
        if self.bill.is_paid() {
            "✓ Paid"
        } else {
            "⚠ Unpaid"
        }
    }

    fn tax_line_label(&self) -> String {
        let bps = self.bill.tax_rate_bps;
        if bps % 100 == 0 {
            format!("GST ({}%)", bps / 100)
        } else {
            format!("GST ({:.2}%)", bps as f64 / 100.0)
        }
    }

    fn formatted_date(&self) -> String {
        self.bill.created_at.format("%d %b %Y, %I:%M %p").to_string()
    }

    /// Renders the card as plain text, for logs and text-only channels.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("{}\n", self.store_name));
        out.push_str(&format!("GSTIN: {}\n", self.gstin));
        out.push_str(&format!("Bill No: {}\n", self.bill.id));
        out.push_str(&format!("Date & Time: {}\n", self.formatted_date()));
        out.push_str(&format!("Status: {}\n\n", self.status_badge()));

        for item in self.items {
            out.push_str(&format!(
                "{} x{}  {}  = {}\n",
                item.item_name,
                item.quantity,
                item.price(),
                item.item_total()
            ));
        }

        out.push_str(&format!("\nSubtotal: {}\n", self.bill.subtotal()));
        out.push_str(&format!("{}: {}\n", self.tax_line_label(), self.bill.tax_amount()));
        out.push_str(&format!("Total: {}\n", self.bill.total_amount()));
        out.push_str("\nThank you for your visit!\n");

        out
    }

    /// Renders the card as a standalone HTML fragment.
    ///
    /// Mirrors the web receipt page's card: header with branding and GSTIN,
    /// bill meta, four-column item table, totals block, thanks footer.
    pub fn to_html(&self) -> String {
        let mut rows = String::new();
        for item in self.items {
            rows.push_str(&format!(
                "      <tr><td>{}</td><td class=\"center\">{}</td>\
                 <td class=\"right\">{}</td><td class=\"right\">{}</td></tr>\n",
                html_escape(&item.item_name),
                item.quantity,
                item.price(),
                item.item_total()
            ));
        }

        format!(
            r#"<div class="bill-card">
  <div class="status-badge {status_class}">{status}</div>
  <header>
    <h1>{store}</h1>
    <h2>{tagline}</h2>
    <p class="gstin">GSTIN: {gstin}</p>
  </header>
  <dl class="meta">
    <div><dt>Bill No</dt><dd>{id}</dd></div>
    <div><dt>Date &amp; Time</dt><dd>{date}</dd></div>
  </dl>
  <table>
    <thead>
      <tr><th>Item</th><th class="center">Qty</th><th class="right">Price</th><th class="right">Total</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
  <div class="totals">
    <div><span>Subtotal</span><span>{subtotal}</span></div>
    <div><span>{tax_label}</span><span>{tax}</span></div>
    <div class="grand-total"><span>Total</span><span>{total}</span></div>
  </div>
  <p class="thanks">Thank you for your visit!</p>
</div>"#,
            status_class = if self.bill.is_paid() { "paid" } else { "unpaid" },
            status = self.status_badge(),
            store = html_escape(self.store_name),
            tagline = html_escape(self.tagline),
            gstin = html_escape(self.gstin),
            id = html_escape(&self.bill.id),
            date = self.formatted_date(),
            rows = rows,
            subtotal = self.bill.subtotal(),
            tax_label = self.tax_line_label(),
            tax = self.bill.tax_amount(),
            total = self.bill.total_amount(),
        )
    }
}

/// Escapes HTML-special characters in text content.
fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use barista_core::{PaymentMethod, PaymentStatus};
    use chrono::{TimeZone, Utc};

    fn sample() -> (Bill, Vec<BillItem>) {
        let bill = Bill {
            id: "BRST000042".to_string(),
            subtotal_cents: 25000,
            tax_rate_bps: 500,
            tax_amount_cents: 1250,
            total_amount_cents: 26250,
            payment_status: PaymentStatus::Paid,
            payment_method: Some(PaymentMethod::Upi),
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 0).unwrap(),
        };
        let items = vec![BillItem {
            id: "a".to_string(),
            bill_id: bill.id.clone(),
            item_name: "Latte".to_string(),
            quantity: 1,
            price_cents: 16000,
            item_total_cents: 16000,
        }];
        (bill, items)
    }

    #[test]
    fn test_receipt_url() {
        assert_eq!(
            receipt_url("https://bills.example.com", "BRST000042"),
            "https://bills.example.com/bill/BRST000042"
        );
        // Trailing slash on the base must not double up
        assert_eq!(
            receipt_url("https://bills.example.com/", "BRST000042"),
            "https://bills.example.com/bill/BRST000042"
        );
    }

    #[test]
    fn test_text_card() {
        let (bill, items) = sample();
        let card = ReceiptCard::new("Barista Cafe", "07AAAAA0000A1Z5", &bill, &items);
        let text = card.to_text();

        assert!(text.contains("GSTIN: 07AAAAA0000A1Z5"));
        assert!(text.contains("Bill No: BRST000042"));
        assert!(text.contains("Status: ✓ Paid"));
        assert!(text.contains("GST (5%): $12.50"));
        assert!(text.contains("Total: $262.50"));
    }

    #[test]
    fn test_html_card_escapes_item_names() {
        let (bill, mut items) = sample();
        items[0].item_name = "Tea & <Biscuits>".to_string();

        let card = ReceiptCard::new("Barista Cafe", "07AAAAA0000A1Z5", &bill, &items);
        let html = card.to_html();

        assert!(html.contains("Tea &amp; &lt;Biscuits&gt;"));
        assert!(html.contains("status-badge paid"));
        assert!(!html.contains("<Biscuits>"));
    }

    #[test]
    fn test_unpaid_badge() {
        let (mut bill, items) = sample();
        bill.payment_status = PaymentStatus::Unpaid;
        bill.payment_method = None;

        let card = ReceiptCard::new("Barista Cafe", "07AAAAA0000A1Z5", &bill, &items);
        assert_eq!(card.status_badge(), "⚠ Unpaid");
    }
}
