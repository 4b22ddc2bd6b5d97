//! Export module for tally
//!
//! - CSV: the full ledger in store order (spreadsheet-compatible)
//! - Charts: a PNG image with the four monthly report panels

pub mod chart;
pub mod csv;

pub use self::chart::{monthly_chart, write_monthly_charts};
pub use self::csv::{export_transactions_csv, to_csv_rows, write_transactions_csv, CsvRow, CSV_HEADER};
