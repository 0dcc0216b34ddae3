//! # Printer Ticket
//!
//! Builds the thermal-printer ticket for a saved bill as a stream of
//! [`PrintCommand`]s, mirroring what an ESC/POS-class device consumes over a
//! paired wireless link.
//!
//! ## Ticket Layout (32-column paper)
//! ```text
//!          Barista Cafe            ← centered, bold
//!        Bill #BRST000042
//!      14 Mar 2026, 09:26 AM
//! --------------------------------
//! Item               Qty     Total   ← columns [18, 5, 9]
//! --------------------------------
//! Espresso            2    $240.00
//! Muffin              1    $100.00
//! --------------------------------
//! Subtotal:              $340.00    ← columns [23, 9]
//! GST (5%):               $17.00
//! --------------------------------
//! TOTAL:                 $357.00    ← bold
//! --------------------------------
//!
//!   Scan to view your bill online
//!          [ QR CODE ]              ← <base>/bill/<id>, size 280, EC M
//! ```
//!
//! The command stream is the contract; [`render_plain`] flattens it to text
//! for previews and tests. Column widths and bold toggles are reproduced
//! faithfully for visual parity, but carry no data-integrity meaning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use barista_core::{Bill, BillItem};

use crate::receipt::receipt_url;

/// Width of the item columns: name, quantity, line total.
const ITEM_COLUMNS: [usize; 3] = [18, 5, 9];

/// Width of the totals columns: label, amount.
const TOTAL_COLUMNS: [usize; 2] = [23, 9];

/// The 32-dash rule between ticket sections.
const RULE: &str = "--------------------------------";

/// QR module size understood by the printer.
const QR_SIZE: u32 = 280;

// =============================================================================
// Command Stream
// =============================================================================

/// Text alignment for a command or a column cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// One instruction in the printer protocol.
///
/// A ticket is a `Vec<PrintCommand>`; the device bridge walks the stream in
/// order. Serializable so a remote bridge process can consume it as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "cmd")]
pub enum PrintCommand {
    /// Sets alignment for subsequent text.
    Align { alignment: Alignment },
    /// Toggles emphasis for subsequent text.
    Bold { on: bool },
    /// Prints one line of text.
    Text { line: String },
    /// Prints one row of fixed-width columns.
    Columns {
        widths: Vec<usize>,
        aligns: Vec<Alignment>,
        cells: Vec<String>,
    },
    /// Prints a QR code with error-correction level M.
    QrCode { payload: String, size: u32 },
    /// Advances the paper by `lines` blank lines.
    Feed { lines: u8 },
}

/// Failures from the device side of the printer seam.
///
/// These never touch the saved bill; the caller shows an alert and the bill
/// stays exactly as persisted.
#[derive(Debug, Error)]
pub enum PrintError {
    /// No paired device reachable.
    #[error("Printer not available: {0}")]
    NotPaired(String),

    /// The OS denied the wireless link permission.
    #[error("Printer permission denied: {0}")]
    PermissionDenied(String),

    /// The device rejected or dropped mid-stream.
    #[error("Printer write failed: {0}")]
    WriteFailed(String),
}

/// The seam between ticket building and the physical device.
///
/// Production wires this to the paired Bluetooth printer; tests use an
/// in-memory recorder.
pub trait PrinterPort {
    /// Sends a full command stream to the device.
    fn send(&mut self, commands: &[PrintCommand]) -> Result<(), PrintError>;
}

// =============================================================================
// Ticket Builder
// =============================================================================

/// Knobs the ticket needs beyond the bill itself.
#[derive(Debug, Clone)]
pub struct TicketOptions {
    /// Store name printed in the ticket header.
    pub store_name: String,
    /// Base origin of the public receipt page, e.g. `https://bills.example.com`.
    pub web_base_url: String,
    /// Wall-clock time printed under the bill id.
    pub printed_at: DateTime<Utc>,
}

/// Builds the full ticket command stream for a saved bill.
pub fn build_ticket(bill: &Bill, items: &[BillItem], opts: &TicketOptions) -> Vec<PrintCommand> {
    let mut cmds = Vec::with_capacity(items.len() + 24);

    // Header
    cmds.push(PrintCommand::Align { alignment: Alignment::Center });
    cmds.push(PrintCommand::Bold { on: true });
    cmds.push(PrintCommand::Text { line: opts.store_name.clone() });
    cmds.push(PrintCommand::Bold { on: false });
    cmds.push(PrintCommand::Text { line: format!("Bill #{}", bill.id) });
    cmds.push(PrintCommand::Text {
        line: opts.printed_at.format("%d %b %Y, %I:%M %p").to_string(),
    });
    cmds.push(PrintCommand::Text { line: RULE.to_string() });

    // Item table header
    cmds.push(PrintCommand::Align { alignment: Alignment::Left });
    cmds.push(item_row("Item", "Qty", "Total"));
    cmds.push(PrintCommand::Text { line: RULE.to_string() });

    // One row per line item, name clipped to its column
    for item in items {
        let name: String = item.item_name.chars().take(ITEM_COLUMNS[0]).collect();
        cmds.push(item_row(
            &name,
            &item.quantity.to_string(),
            &format!("{}", item.item_total()),
        ));
    }

    // Totals
    cmds.push(PrintCommand::Text { line: RULE.to_string() });
    cmds.push(total_row("Subtotal:", &format!("{}", bill.subtotal())));
    cmds.push(total_row(&tax_label(bill), &format!("{}", bill.tax_amount())));
    cmds.push(PrintCommand::Text { line: RULE.to_string() });
    cmds.push(PrintCommand::Bold { on: true });
    cmds.push(total_row("TOTAL:", &format!("{}", bill.total_amount())));
    cmds.push(PrintCommand::Bold { on: false });
    cmds.push(PrintCommand::Text { line: RULE.to_string() });
    cmds.push(PrintCommand::Feed { lines: 1 });

    // QR block pointing at the public receipt page
    cmds.push(PrintCommand::Align { alignment: Alignment::Center });
    cmds.push(PrintCommand::Text {
        line: "Scan to view your bill online".to_string(),
    });
    cmds.push(PrintCommand::QrCode {
        payload: receipt_url(&opts.web_base_url, &bill.id),
        size: QR_SIZE,
    });
    cmds.push(PrintCommand::Feed { lines: 3 });

    cmds
}

fn item_row(name: &str, qty: &str, total: &str) -> PrintCommand {
    PrintCommand::Columns {
        widths: ITEM_COLUMNS.to_vec(),
        aligns: vec![Alignment::Left, Alignment::Center, Alignment::Right],
        cells: vec![name.to_string(), qty.to_string(), total.to_string()],
    }
}

fn total_row(label: &str, amount: &str) -> PrintCommand {
    PrintCommand::Columns {
        widths: TOTAL_COLUMNS.to_vec(),
        aligns: vec![Alignment::Left, Alignment::Right],
        cells: vec![label.to_string(), amount.to_string()],
    }
}

/// Tax line label, e.g. `GST (5%)`.
fn tax_label(bill: &Bill) -> String {
    let bps = bill.tax_rate_bps;
    if bps % 100 == 0 {
        format!("GST ({}%):", bps / 100)
    } else {
        format!("GST ({:.2}%):", bps as f64 / 100.0)
    }
}

// =============================================================================
// Plain-Text Rendering
// =============================================================================

/// Flattens a command stream into plain text, one printed line per row.
///
/// Bold and alignment state commands produce no output of their own; QR
/// codes render as a placeholder line with the payload. Used for ticket
/// previews and tests.
pub fn render_plain(commands: &[PrintCommand]) -> String {
    let mut out = String::new();

    for cmd in commands {
        match cmd {
            PrintCommand::Align { .. } | PrintCommand::Bold { .. } => {}
            PrintCommand::Text { line } => {
                out.push_str(line);
                out.push('\n');
            }
            PrintCommand::Columns { widths, aligns, cells } => {
                for ((cell, width), align) in cells.iter().zip(widths).zip(aligns) {
                    out.push_str(&pad_cell(cell, *width, *align));
                }
                out.push('\n');
            }
            PrintCommand::QrCode { payload, .. } => {
                out.push_str(&format!("[QR {}]\n", payload));
            }
            PrintCommand::Feed { lines } => {
                for _ in 0..*lines {
                    out.push('\n');
                }
            }
        }
    }

    out
}

/// Clips and pads one cell to its column width.
fn pad_cell(cell: &str, width: usize, align: Alignment) -> String {
    let clipped: String = cell.chars().take(width).collect();
    let slack = width - clipped.chars().count();

    match align {
        Alignment::Left => format!("{}{}", clipped, " ".repeat(slack)),
        Alignment::Right => format!("{}{}", " ".repeat(slack), clipped),
        Alignment::Center => {
            let left = slack / 2;
            format!("{}{}{}", " ".repeat(left), clipped, " ".repeat(slack - left))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
