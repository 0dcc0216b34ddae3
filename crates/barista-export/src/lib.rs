//! # barista-export: Receipt Renderers
//!
//! Renders a persisted bill into its outward-facing forms.
//!
//! ## Render Targets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        barista-export                                   │
//! │                                                                         │
//! │   (Bill, Vec<BillItem>)  ──  already persisted, already totalled        │
//! │        │                                                                │
//! │        ├──► ticket.rs   PrintCommand stream for a thermal printer       │
//! │        │                (columns, bold toggles, QR code)                │
//! │        │                                                                │
//! │        ├──► tally.rs    Accounting voucher XML (fixed vendor schema)    │
//! │        │                Cash / Sales / Output GST ledger lines that     │
//! │        │                must net to zero                                │
//! │        │                                                                │
//! │        └──► receipt.rs  Shareable receipt: public URL, text card,       │
//! │                         HTML card for the web page / PDF snapshot       │
//! │                                                                         │
//! │   Everything here is a pure function of the persisted record. The one   │
//! │   trait seam, PrinterPort, is where the paired device plugs in.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod receipt;
pub mod tally;
pub mod ticket;

pub use receipt::{receipt_url, ReceiptCard};
pub use tally::TallyVoucher;
pub use ticket::{build_ticket, render_plain, Alignment, PrintCommand, PrintError, PrinterPort, TicketOptions};
