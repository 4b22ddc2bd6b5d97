//! Transaction display formatting
//!
//! Register views rendered with `tabled`.

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Transaction, DATE_FORMAT};

use super::report::truncate;

const DESCRIPTION_WIDTH: usize = 30;

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl RegisterRow {
    fn new(txn: &Transaction, symbol: &str) -> Self {
        Self {
            id: txn.id.value(),
            date: txn.date.format(DATE_FORMAT).to_string(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            amount: txn.amount.format_with_symbol(symbol),
            description: truncate(txn.description_text(), DESCRIPTION_WIDTH),
        }
    }
}

/// Format a list of transactions as a register table
pub fn format_transaction_register(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<RegisterRow> = transactions
        .iter()
        .map(|t| RegisterRow::new(t, symbol))
        .collect();

    let mut output = Table::new(rows).with(Style::modern()).to_string();
    output.push('\n');
    output
}

/// One-line confirmation, e.g. `#4 2024-11-05 expense Groceries $350.00 (Weekly shopping)`
pub fn format_transaction_line(txn: &Transaction, symbol: &str) -> String {
    let mut line = format!(
        "#{} {} {} {} {}",
        txn.id,
        txn.date.format(DATE_FORMAT),
        txn.kind,
        txn.category,
        txn.amount.format_with_symbol(symbol)
    );

    if let Some(desc) = &txn.description {
        line.push_str(&format!(" ({})", desc));
    }

    line
}
