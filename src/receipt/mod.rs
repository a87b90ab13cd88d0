//! # Receipt Composer
//!
//! Turns sale data plus a [`StoreProfile`] into the exact ESC/POS byte stream
//! for one receipt.
//!
//! ## Page Structure
//!
//! ```text
//! ESC @                                   initialize
//! ESC a 1   TOKO ANDA                     centered header
//!           Jalan Kenangan No. 123
//!           08123456789                   (only when set)
//!           ================================================
//! ESC a 0   TRX TRXM1ABCD       Kasir: Sari   (cashier optional)
//!             ----------------------------------------------
//!           KOPI 2x10.000                           20.000
//!             ----------------------------------------------
//!           Total Item                                   2
//!           Total Belanja                           20.000
//!           Kembali                                 30.000   (only when paid > 0)
//!             ----------------------------------------------
//! ESC a 1        Tgl 18/10/2026, 14.05
//!           ================================================
//!
//!           Terima kasih atas kunjungan Anda!
//!           <notes>                              (optional)
//!           Sales order created on ...           (optional)
//!
//!
//! GS V 0                                  full cut
//! ```
//!
//! Items that fail [`LineItem`] parsing are skipped and counted, never fatal.

pub mod format;
pub mod test_page;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::MalformedItem;
use crate::printer::StoreProfile;
use crate::protocol::commands::{self, LF};
use crate::protocol::text;

pub use test_page::TestPageComposer;

// ============================================================================
// DATA MODEL
// ============================================================================

/// One sold product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub qty: f64,
    pub price: f64,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(name: impl Into<String>, qty: f64, price: f64) -> Self {
        Self {
            name: name.into(),
            qty,
            price,
        }
    }

    /// `qty * price`
    #[inline]
    pub fn subtotal(&self) -> f64 {
        self.qty * self.price
    }

    /// The printed row: `NAME qtyxprice` left, subtotal right.
    pub fn row(&self, width: usize) -> String {
        let left = format!(
            "{} {}x{}",
            self.name.to_uppercase(),
            format::quantity(self.qty),
            format::group_thousands(self.price)
        );
        format::justify(&left, &format::group_thousands(self.subtotal()), width)
    }
}

impl TryFrom<&Value> for LineItem {
    type Error = MalformedItem;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let item = value.as_object().ok_or(MalformedItem::NotAnObject)?;

        let name = item
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .ok_or(MalformedItem::InvalidName)?;
        let qty = item
            .get("qty")
            .and_then(Value::as_f64)
            .ok_or(MalformedItem::InvalidQuantity)?;
        let price = item
            .get("price")
            .and_then(Value::as_f64)
            .ok_or(MalformedItem::InvalidPrice)?;

        if qty <= 0.0 {
            return Err(MalformedItem::NonPositiveQuantity(qty));
        }
        if price < 0.0 {
            return Err(MalformedItem::NegativePrice(price));
        }

        Ok(Self::new(name, qty, price))
    }
}

impl From<LineItem> for Value {
    fn from(item: LineItem) -> Self {
        json!({ "name": item.name, "qty": item.qty, "price": item.price })
    }
}

/// One sale as received from the caller.
///
/// Items stay raw JSON so malformed entries can be carried through and
/// excluded at composition time. The text fields take strings or numbers
/// (`"trx_id": 1001` prints as `TRX 1001`), and `payment_amount` takes a
/// number or a numeric string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptData {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub trx_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cashier: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub payment_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: Option<String>,
    /// RFC 3339 / `YYYY-MM-DD HH:MM:SS` text, or epoch milliseconds
    #[serde(default)]
    pub created_at: Option<Value>,
}

impl ReceiptData {
    /// Receipt data holding only well-formed items.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = LineItem>,
    {
        Self {
            items: items.into_iter().map(Value::from).collect(),
            ..Default::default()
        }
    }

    /// Amount paid, treating a missing value as zero.
    pub fn payment(&self) -> f64 {
        self.payment_amount.unwrap_or(0.0)
    }
}

/// Printable text of a string or number field.
pub(crate) fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A finite amount from a number or a numeric string.
pub(crate) fn amount_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|amount| amount.is_finite())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_value(&Value::deserialize(deserializer)?))
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(amount_value(&Value::deserialize(deserializer)?))
}

/// Output of [`ReceiptComposer::compose`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedReceipt {
    /// Complete ESC/POS stream, ending with the cut sequence
    pub bytes: Vec<u8>,
    /// Sum of `qty * price` over printed items
    pub total: f64,
    /// Item rows printed
    pub printed_items: usize,
    /// Items excluded as malformed
    pub skipped_items: usize,
}

// ============================================================================
// PAGE BUFFER
// ============================================================================

/// Byte buffer with text-line helpers, shared by the composers.
#[derive(Debug, Default)]
pub(crate) struct Page {
    bytes: Vec<u8>,
}

impl Page {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn command(&mut self, command: Vec<u8>) {
        self.bytes.extend(command);
    }

    /// Raw text, no terminator.
    pub(crate) fn text(&mut self, content: &str) {
        self.bytes.extend_from_slice(content.as_bytes());
    }

    /// Text followed by LF.
    pub(crate) fn line(&mut self, content: &str) {
        self.text(content);
        self.bytes.push(LF);
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

// ============================================================================
// COMPOSER
// ============================================================================

/// Renders sale receipts for one store profile.
///
/// ## Example
///
/// ```
/// use struk::printer::StoreProfile;
/// use struk::receipt::{LineItem, ReceiptComposer, ReceiptData};
///
/// let profile = StoreProfile::default();
/// let data = ReceiptData::from_items([LineItem::new("Kopi", 2.0, 10000.0)]);
///
/// let receipt = ReceiptComposer::new(&profile).compose(&data);
/// assert_eq!(receipt.total, 20000.0);
/// assert!(receipt.bytes.ends_with(&[0x1D, 0x56, 0x00]));
/// ```
#[derive(Debug, Clone)]
pub struct ReceiptComposer<'a> {
    profile: &'a StoreProfile,
    now: DateTime<Local>,
}

impl<'a> ReceiptComposer<'a> {
    /// Composer stamping receipts with the current local time.
    pub fn new(profile: &'a StoreProfile) -> Self {
        Self {
            profile,
            now: Local::now(),
        }
    }

    /// Use a fixed composition time.
    pub fn at(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Build the full receipt.
    pub fn compose(&self, data: &ReceiptData) -> ComposedReceipt {
        let paper = self.profile.paper_size;
        let width = paper.width();
        let mut page = Page::new();

        page.command(commands::init());

        // Header
        page.command(text::align_center());
        page.line(&self.profile.store_name);
        page.line(&self.profile.store_address);
        if let Some(phone) = self.profile.phone() {
            page.line(phone);
        }
        page.text(&paper.separator());

        // Transaction
        page.command(text::align_left());
        let trx_text = format!("TRX {}", self.trx_id(data));
        match data.cashier.as_deref().filter(|c| !c.is_empty()) {
            Some(cashier) => {
                page.line(&format::justify(&trx_text, &format!("Kasir: {}", cashier), width))
            }
            None => page.line(&trx_text),
        }
        page.text(&paper.dash_separator());

        // Items
        let mut total = 0.0;
        let mut quantity = 0.0;
        let mut printed_items = 0;
        let mut skipped_items = 0;
        for (index, raw) in data.items.iter().enumerate() {
            match LineItem::try_from(raw) {
                Ok(item) => {
                    total += item.subtotal();
                    quantity += item.qty;
                    printed_items += 1;
                    page.line(&item.row(width));
                }
                Err(reason) => {
                    skipped_items += 1;
                    warn!(index, %reason, "Skipping malformed receipt item");
                }
            }
        }
        page.text(&paper.dash_separator());

        // Totals
        page.line(&format::justify(
            "Total Item",
            &format::quantity(quantity),
            width,
        ));
        page.line(&format::justify(
            "Total Belanja",
            &format::group_thousands(total),
            width,
        ));
        let payment = data.payment();
        if payment > 0.0 {
            page.line(&format::justify(
                "Kembali",
                &format::group_thousands(payment - total),
                width,
            ));
        }
        page.text(&paper.dash_separator());

        // Date stamp
        page.command(text::align_center());
        page.line(&format!(
            "     Tgl {}, {}",
            self.now.format("%d/%m/%Y"),
            self.now.format("%H.%M")
        ));

        // Footer
        page.text(&paper.separator());
        page.line("");
        page.line(&self.profile.store_footer);
        if let Some(notes) = data.notes.as_deref().filter(|n| !n.is_empty()) {
            page.line(notes);
        }
        if let Some(raw) = &data.created_at {
            match parse_timestamp(raw) {
                Some(created) => page.line(&format!(
                    "Sales order created on {}",
                    created.format("%m/%d/%Y, %I:%M:%S %p")
                )),
                None => warn!(created_at = %raw, "Ignoring unparseable created_at"),
            }
        }
        page.text("\n\n");

        page.command(commands::cut_full());

        debug!(
            printed_items,
            skipped_items,
            total,
            "Receipt composed"
        );

        ComposedReceipt {
            bytes: page.into_bytes(),
            total,
            printed_items,
            skipped_items,
        }
    }

    fn trx_id(&self, data: &ReceiptData) -> String {
        match data.trx_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => generate_trx_id(self.now),
        }
    }
}

/// Compose a receipt stamped with the current time.
pub fn compose(data: &ReceiptData, profile: &StoreProfile) -> ComposedReceipt {
    ReceiptComposer::new(profile).compose(data)
}

/// `TRX` followed by the epoch milliseconds of `now` in upper-case base 36.
pub fn generate_trx_id(now: DateTime<Local>) -> String {
    format!("TRX{}", to_base36(now.timestamp_millis().unsigned_abs()))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Parse a `created_at` value into local time.
fn parse_timestamp(value: &Value) -> Option<DateTime<Local>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Local))
            .ok()
            .or_else(|| {
                s.parse::<NaiveDateTime>()
                    .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
                    .ok()
                    .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            }),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Local.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::PaperSize;
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 18, 14, 5, 9).unwrap()
    }

    fn text_of(receipt: &ComposedReceipt) -> String {
        String::from_utf8_lossy(&receipt.bytes).into_owned()
    }

    #[test]
    fn test_line_item_row_80mm() {
        let row = LineItem::new("Kopi", 2.0, 10000.0).row(48);
        assert!(row.starts_with("KOPI 2x10.000"));
        assert!(row.ends_with("20.000"));
        assert_eq!(row.len(), 48);
        assert_eq!(row, format!("KOPI 2x10.000{}20.000", " ".repeat(29)));
    }

    #[test]
    fn test_line_item_parse_rejects_malformed() {
        let cases = [
            (json!("kopi"), MalformedItem::NotAnObject),
            (json!({"qty": 1, "price": 1}), MalformedItem::InvalidName),
            (json!({"name": "  ", "qty": 1, "price": 1}), MalformedItem::InvalidName),
            (json!({"name": "A", "qty": "2", "price": 1}), MalformedItem::InvalidQuantity),
            (json!({"name": "A", "qty": 1}), MalformedItem::InvalidPrice),
            (json!({"name": "A", "qty": 0, "price": 1}), MalformedItem::NonPositiveQuantity(0.0)),
            (json!({"name": "A", "qty": 1, "price": -5}), MalformedItem::NegativePrice(-5.0)),
        ];
        for (value, expected) in cases {
            assert_eq!(LineItem::try_from(&value), Err(expected), "{value}");
        }
    }

    #[test]
    fn test_line_item_zero_price_is_valid() {
        let item = LineItem::try_from(&json!({"name": "Gratis", "qty": 1, "price": 0})).unwrap();
        assert_eq!(item.subtotal(), 0.0);
    }

    #[test]
    fn test_total_skips_malformed_items() {
        let profile = StoreProfile::default();
        let data = ReceiptData {
            items: vec![
                json!({"name": "Kopi", "qty": 2, "price": 10000}),
                json!({"name": "Teh", "qty": 0, "price": 5000}),
                json!({"name": "", "qty": 1, "price": 5000}),
                json!({"name": "Roti", "qty": 1, "price": 7500}),
            ],
            ..Default::default()
        };

        let receipt = ReceiptComposer::new(&profile).at(fixed_now()).compose(&data);
        assert_eq!(receipt.total, 27500.0);
        assert_eq!(receipt.printed_items, 2);
        assert_eq!(receipt.skipped_items, 2);

        let text = text_of(&receipt);
        assert!(!text.contains("TEH"));
        assert!(text.contains(&format::justify("Total Item", "3", 48)));
        assert!(text.contains(&format::justify("Total Belanja", "27.500", 48)));
    }

    #[test]
    fn test_change_row_only_when_paid() {
        let profile = StoreProfile::default();
        let mut data = ReceiptData::from_items([LineItem::new("Kopi", 2.0, 10000.0)]);

        let unpaid = ReceiptComposer::new(&profile).at(fixed_now()).compose(&data);
        assert!(!text_of(&unpaid).contains("Kembali"));

        data.payment_amount = Some(50000.0);
        let paid = ReceiptComposer::new(&profile).at(fixed_now()).compose(&data);
        assert!(text_of(&paid).contains(&format::justify("Kembali", "30.000", 48)));
    }

    #[test]
    fn test_short_payment_prints_negative_change() {
        let profile = StoreProfile::default();
        let mut data = ReceiptData::from_items([LineItem::new("Kopi", 2.0, 10000.0)]);
        data.payment_amount = Some(15000.0);

        let receipt = ReceiptComposer::new(&profile).at(fixed_now()).compose(&data);
        assert!(text_of(&receipt).contains(&format::justify("Kembali", "-5.000", 48)));
    }

    #[test]
    fn test_header_and_cashier_row() {
        let profile = StoreProfile {
            paper_size: PaperSize::Mm58,
            ..Default::default()
        };
        let data = ReceiptData {
            trx_id: Some("INV-001".into()),
            cashier: Some("Sari".into()),
            ..ReceiptData::from_items([LineItem::new("Kopi", 1.0, 5000.0)])
        };

        let receipt = ReceiptComposer::new(&profile).at(fixed_now()).compose(&data);
        let text = text_of(&receipt);

        let mut expected_start = Vec::new();
        expected_start.extend(commands::init());
        expected_start.extend(text::align_center());
        expected_start.extend(b"TOKO ANDA\nJalan Kenangan No. 123\n08123456789\n");
        assert!(receipt.bytes.starts_with(&expected_start));

        let row = format::justify("TRX INV-001", "Kasir: Sari", 32);
        assert_eq!(row.len(), 32);
        assert!(text.contains(&format!("{}\n", row)));
    }

    #[test]
    fn test_generated_trx_id() {
        let profile = StoreProfile::default();
        let data = ReceiptData::from_items([LineItem::new("Kopi", 1.0, 5000.0)]);

        let receipt = ReceiptComposer::new(&profile).at(fixed_now()).compose(&data);
        let expected = format!("TRX {}\n", generate_trx_id(fixed_now()));
        assert!(text_of(&receipt).contains(&expected));
        assert!(generate_trx_id(fixed_now()).starts_with("TRX"));
    }

    #[test]
    fn test_numeric_fields_are_accepted() {
        let profile = StoreProfile::default();
        let data: ReceiptData = serde_json::from_value(json!({
            "items": [{"name": "Kopi", "qty": 2, "price": 10000}],
            "trx_id": 1001,
            "cashier": 7,
            "payment_amount": " 50000 ",
            "notes": null
        }))
        .unwrap();

        assert_eq!(data.trx_id.as_deref(), Some("1001"));
        assert_eq!(data.cashier.as_deref(), Some("7"));
        assert_eq!(data.payment(), 50000.0);
        assert_eq!(data.notes, None);

        let text = text_of(&ReceiptComposer::new(&profile).at(fixed_now()).compose(&data));
        assert!(text.contains(&format::justify("TRX 1001", "Kasir: 7", 48)));
        assert!(text.contains(&format::justify("Kembali", "30.000", 48)));
    }

    #[test]
    fn test_unreadable_payment_counts_as_unpaid() {
        let data: ReceiptData =
            serde_json::from_value(json!({"items": [], "payment_amount": "lima ribu"})).unwrap();
        assert_eq!(data.payment_amount, None);
        assert_eq!(data.payment(), 0.0);
        assert_eq!(amount_value(&json!("NaN")), None);
    }

    #[test]
    fn test_fractional_total_item_is_rounded() {
        let profile = StoreProfile::default();
        let data = ReceiptData::from_items([
            LineItem::new("Gula", 0.1, 10000.0),
            LineItem::new("Garam", 0.2, 10000.0),
        ]);

        let text = text_of(&ReceiptComposer::new(&profile).at(fixed_now()).compose(&data));
        assert!(text.contains(&format!("{}\n", format::justify("Total Item", "0.3", 48))));
        assert!(!text.contains("0.30000000000000004"));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "LOYW3V28");
    }

    #[test]
    fn test_footer_section() {
        let profile = StoreProfile::default();
        let data = ReceiptData {
            notes: Some("Meja 4".into()),
            created_at: Some(json!("2026-01-05 14:30:15")),
            ..ReceiptData::from_items([LineItem::new("Kopi", 1.0, 5000.0)])
        };

        let receipt = ReceiptComposer::new(&profile).at(fixed_now()).compose(&data);
        let text = text_of(&receipt);

        assert!(text.contains("     Tgl 18/10/2026, 14.05\n"));
        let footer = format!(
            "{}\n\nTerima kasih atas kunjungan Anda!\nMeja 4\nSales order created on 01/05/2026, 02:30:15 PM\n\n\n",
            "=".repeat(48)
        );
        assert!(text.contains(&footer), "{text}");
        assert!(receipt.bytes.ends_with(&commands::CUT_SEQUENCE));
    }

    #[test]
    fn test_unparseable_created_at_is_dropped() {
        let profile = StoreProfile::default();
        let data = ReceiptData {
            created_at: Some(json!("yesterday-ish")),
            ..Default::default()
        };
        let receipt = ReceiptComposer::new(&profile).at(fixed_now()).compose(&data);
        assert!(!text_of(&receipt).contains("Sales order"));
    }

    #[test]
    fn test_no_phone_line_when_absent() {
        let profile = StoreProfile {
            store_phone: None,
            ..Default::default()
        };
        let receipt = ReceiptComposer::new(&profile)
            .at(fixed_now())
            .compose(&ReceiptData::default());
        assert!(!text_of(&receipt).contains("08123456789"));
        assert!(text_of(&receipt).contains(&format!("Jalan Kenangan No. 123\n{}", "=".repeat(48))));
    }
}
