//! CSV export of the ledger

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{TallyError, TallyResult};
use crate::models::{Transaction, DATE_FORMAT};

/// Column order of the export file
pub const CSV_HEADER: [&str; 6] = ["id", "date", "type", "category", "amount", "description"];

/// One exported transaction, fields in `CSV_HEADER` order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    pub id: u64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    /// Stored amount at full precision
    pub amount: String,
    pub description: String,
}

impl From<&Transaction> for CsvRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.value(),
            date: txn.date.format(DATE_FORMAT).to_string(),
            kind: txn.kind.as_str().to_string(),
            category: txn.category.clone(),
            amount: txn.amount.value().to_string(),
            description: txn.description_text().to_string(),
        }
    }
}

/// One row per transaction, in the order given
pub fn to_csv_rows(transactions: &[Transaction]) -> Vec<CsvRow> {
    transactions.iter().map(CsvRow::from).collect()
}

/// Write the header and one row per transaction
pub fn write_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> TallyResult<()> {
    let mut out = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    out.write_record(CSV_HEADER)?;
    for row in to_csv_rows(transactions) {
        out.serialize(row)?;
    }

    out.flush()
        .map_err(|e| TallyError::Export(format!("Failed to flush CSV output: {}", e)))?;
    Ok(())
}

/// Export transactions to a CSV file, returning the number of rows written
pub fn export_transactions_csv(transactions: &[Transaction], path: &Path) -> TallyResult<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            TallyError::Export(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let file = File::create(path)
        .map_err(|e| TallyError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    write_transactions_csv(transactions, file)?;

    tracing::info!(path = %path.display(), rows = transactions.len(), "exported transactions");
    Ok(transactions.len())
}
