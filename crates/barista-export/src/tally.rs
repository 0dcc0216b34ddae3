//! # Tally Voucher Export
//!
//! Renders a saved bill as an accounting-interchange XML document in the
//! fixed Tally import schema (ENVELOPE / BODY / VOUCHER).
//!
//! ## Ledger Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Sales Voucher for one bill                             │
//! │                                                                         │
//! │  Inventory entries:   one per line item (name, rate, amount, qty)       │
//! │                                                                         │
//! │  Ledger entries:      Cash        -total      (party side)              │
//! │                       Sales       +subtotal                             │
//! │                       Output GST  +tax                                  │
//! │                                   ─────────                             │
//! │                       net                0   ← must hold for every      │
//! │                                               generated document        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are rendered with exactly two decimals. The schema is string
//! templated on purpose: the vendor format is fixed and flat, and a
//! structural XML writer buys nothing here.

use tracing::debug;

use barista_core::{Bill, BillItem, Money};

/// A bill reshaped into the vendor's voucher model, ready to render.
#[derive(Debug, Clone)]
pub struct TallyVoucher {
    /// Voucher number and reference (the bill id).
    bill_id: String,
    /// Voucher date, YYYYMMDD.
    date: String,
    /// One entry per bill line.
    inventory: Vec<InventoryEntry>,
    /// Party-side amount: negative of the bill total.
    cash_amount: Money,
    /// Sales ledger amount: the subtotal.
    sales_amount: Money,
    /// Output GST ledger amount: the tax.
    gst_amount: Money,
}

#[derive(Debug, Clone)]
struct InventoryEntry {
    stock_item_name: String,
    rate: Money,
    amount: Money,
    quantity: i64,
}

impl TallyVoucher {
    /// Reshapes a persisted bill into a voucher.
    pub fn from_bill(bill: &Bill, items: &[BillItem]) -> Self {
        let inventory = items
            .iter()
            .map(|item| InventoryEntry {
                stock_item_name: item.item_name.clone(),
                rate: item.price(),
                amount: item.item_total(),
                quantity: item.quantity,
            })
            .collect();

        let voucher = TallyVoucher {
            bill_id: bill.id.clone(),
            date: bill.created_at.format("%Y%m%d").to_string(),
            inventory,
            cash_amount: bill.total_amount().negated(),
            sales_amount: bill.subtotal(),
            gst_amount: bill.tax_amount(),
        };

        debug!(
            bill_id = %voucher.bill_id,
            balanced = voucher.is_balanced(),
            "Tally voucher built"
        );
        voucher
    }

    /// Whether the three ledger amounts net to zero.
    ///
    /// Holds by construction for any bill whose total equals subtotal plus
    /// tax; exposed so callers and tests can verify every document.
    pub fn is_balanced(&self) -> bool {
        (self.cash_amount + self.sales_amount + self.gst_amount).is_zero()
    }

    /// The download filename for this voucher.
    pub fn file_name(&self) -> String {
        format!("tally-detailed-{}.xml", self.bill_id)
    }

    /// Renders the voucher as Tally import XML.
    pub fn to_xml(&self) -> String {
        let mut inventory_xml = String::new();
        for entry in &self.inventory {
            inventory_xml.push_str(&format!(
                r#"
                        <ALLINVENTORYENTRIES.LIST>
                            <STOCKITEMNAME>{name}</STOCKITEMNAME>
                            <ISDEEMEDPOSITIVE>No</ISDEEMEDPOSITIVE>
                            <RATE>{rate}</RATE>
                            <AMOUNT>{amount}</AMOUNT>
                            <ACTUALQTY>{qty} Nos</ACTUALQTY>
                            <BILLEDQTY>{qty} Nos</BILLEDQTY>
                        </ALLINVENTORYENTRIES.LIST>"#,
                name = xml_escape(&entry.stock_item_name),
                rate = entry.rate.to_decimal_string(),
                amount = entry.amount.to_decimal_string(),
                qty = entry.quantity,
            ));
        }

        format!(
            r#"<?xml version="1.0"?>
<ENVELOPE>
    <HEADER><TALLYREQUEST>Import Data</TALLYREQUEST></HEADER>
    <BODY>
        <IMPORTDATA>
            <REQUESTDESC><REPORTNAME>Vouchers</REPORTNAME></REQUESTDESC>
            <REQUESTDATA>
                <TALLYMESSAGE xmlns:UDF="TallyUDF">
                    <VOUCHER VCHTYPE="Sales" ACTION="Create">
                        <DATE>{date}</DATE>
                        <VOUCHERNUMBER>{id}</VOUCHERNUMBER>
                        <REFERENCE>{id}</REFERENCE>
                        <PARTYLEDGERNAME>Cash</PARTYLEDGERNAME>
                        <STATENAME>Delhi</STATENAME>
                        <FBTPAYMENTTYPE>Default</FBTPAYMENTTYPE>
                        <PERSISTEDVIEW>InvoiceView</PERSISTEDVIEW>
                        <ALLLEDGERENTRIES.LIST>
                            <LEDGERNAME>Cash</LEDGERNAME>
                            <ISDEEMEDPOSITIVE>Yes</ISDEEMEDPOSITIVE>
                            <AMOUNT>{cash}</AMOUNT>
                        </ALLLEDGERENTRIES.LIST>{inventory}
                        <ALLLEDGERENTRIES.LIST>
                            <LEDGERNAME>Sales</LEDGERNAME>
                            <ISDEEMEDPOSITIVE>No</ISDEEMEDPOSITIVE>
                            <AMOUNT>{sales}</AMOUNT>
                        </ALLLEDGERENTRIES.LIST>
                        <ALLLEDGERENTRIES.LIST>
                            <LEDGERNAME>Output GST</LEDGERNAME>
                            <ISDEEMEDPOSITIVE>No</ISDEEMEDPOSITIVE>
                            <AMOUNT>{gst}</AMOUNT>
                        </ALLLEDGERENTRIES.LIST>
                    </VOUCHER>
                </TALLYMESSAGE>
            </REQUESTDATA>
        </IMPORTDATA>
    </BODY>
</ENVELOPE>"#,
            date = self.date,
            id = xml_escape(&self.bill_id),
            cash = self.cash_amount.to_decimal_string(),
            sales = self.sales_amount.to_decimal_string(),
            gst = self.gst_amount.to_decimal_string(),
            inventory = inventory_xml,
        )
    }
}

/// Escapes the five XML-special characters in text content.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
