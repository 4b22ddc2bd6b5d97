//! Display formatting for terminal output
//!
//! Registers, summaries, breakdowns and monthly reports as plain strings so
//! the CLI and the interactive menu print identical output.

pub mod report;
pub mod transaction;

pub use report::{format_breakdown, format_monthly_report, format_summary};
pub use transaction::{format_transaction_line, format_transaction_register};
