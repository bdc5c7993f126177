//! Report generation business logic.
//!
//! Transforms a filtered transaction sequence into display-ready rows:
//! product name resolved (with an "Unknown" fallback for deleted products),
//! kind mapped to a human-readable label, quantity and notes carried through.
//! Projection is pure and restartable - callers may rebuild the same rows any
//! number of times without side effects. Rendering is delegated to a
//! [`ReportExporter`]; page layout and fonts are the exporter's concern.

use std::collections::HashMap;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    entities::{TransactionKind, transaction},
    errors::Result,
};

/// Name shown for a transaction whose product no longer resolves.
pub const UNKNOWN_PRODUCT: &str = "Unknown";

/// A single display-ready report row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// When the movement occurred
    pub date: DateTime<Utc>,
    /// Resolved product name, or [`UNKNOWN_PRODUCT`] if the product is gone
    pub product_name: String,
    /// "In" or "Out"
    pub kind_label: &'static str,
    /// Quantity moved, as recorded (always positive)
    pub quantity: Decimal,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Title and date-range header consumed by the Export Port alongside the
/// rows.
#[derive(Debug, Clone)]
pub struct ReportHeader {
    /// Report title line
    pub title: String,
    /// Company name from settings, if configured
    pub company_name: Option<String>,
    /// Start of the reported period (inclusive)
    pub from: NaiveDate,
    /// End of the reported period (inclusive, end-of-day)
    pub to: NaiveDate,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}

/// Export Port: consumes a header plus ordered rows and produces a document
/// or print stream. Implementations own all presentation concerns.
pub trait ReportExporter {
    /// Renders one report.
    ///
    /// # Errors
    /// Returns an error if writing the output fails.
    fn export(&mut self, header: &ReportHeader, rows: &[ReportRow]) -> Result<()>;
}

/// Projects filtered transactions into report rows.
///
/// `names` maps product ids to product names (see
/// [`crate::cache::InventoryCache::name_lookup`]). A transaction whose
/// product id is absent from the map still renders, with
/// [`UNKNOWN_PRODUCT`] as its product name; a deleted product never fails
/// the whole report.
#[must_use]
pub fn build_report(
    transactions: &[transaction::Model],
    names: &HashMap<i64, String>,
) -> Vec<ReportRow> {
    transactions
        .iter()
        .map(|t| ReportRow {
            date: t.date,
            product_name: names
                .get(&t.product_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            kind_label: t.kind.label(),
            quantity: t.quantity,
            notes: t.notes.clone(),
        })
        .collect()
}

/// Formats a quantity with its movement sign: `+5.00` for In, `-2.00` for
/// Out.
#[must_use]
pub fn format_quantity(kind: TransactionKind, quantity: Decimal) -> String {
    match kind {
        TransactionKind::In => format!("+{quantity:.2}"),
        TransactionKind::Out => format!("-{quantity:.2}"),
    }
}

/// Reference [`ReportExporter`] that writes an aligned plain-text table.
///
/// Used by the binary for terminal output and by tests; a PDF or print
/// exporter would implement the same trait.
pub struct TextExporter<W: Write> {
    writer: W,
}

impl<W: Write> TextExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportExporter for TextExporter<W> {
    fn export(&mut self, header: &ReportHeader, rows: &[ReportRow]) -> Result<()> {
        writeln!(self.writer, "{}", header.title)?;
        if let Some(ref company) = header.company_name {
            writeln!(self.writer, "{company}")?;
        }
        writeln!(
            self.writer,
            "Generated on: {}",
            header.generated_at.format("%Y-%m-%d %H:%M")
        )?;
        writeln!(self.writer, "Period: {} to {}", header.from, header.to)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{:<17}  {:<30}  {:<4}  {:>10}  Notes",
            "Date", "Product", "Type", "Quantity"
        )?;

        for row in rows {
            writeln!(
                self.writer,
                "{:<17}  {:<30}  {:<4}  {:>10.2}  {}",
                row.date.format("%Y-%m-%d %H:%M"),
                row.product_name,
                row.kind_label,
                row.quantity,
                row.notes.as_deref().unwrap_or_default()
            )?;
        }

        Ok(())
    }
}
