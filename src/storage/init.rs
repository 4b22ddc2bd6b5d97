//! Demonstration data for a fresh ledger

use crate::error::TallyResult;
use crate::models::{Money, NewTransaction, TransactionKind};

use super::ledger::LedgerStore;

/// (kind, category, amount, description, date)
const SAMPLES: [(TransactionKind, &str, i64, &str, &str); 8] = [
    (TransactionKind::Income, "Salary", 5000, "Monthly salary", "2024-11-01"),
    (TransactionKind::Income, "Freelance", 800, "Side project", "2024-11-15"),
    (TransactionKind::Expense, "Rent", 1500, "Monthly rent", "2024-11-01"),
    (TransactionKind::Expense, "Groceries", 350, "Weekly shopping", "2024-11-05"),
    (TransactionKind::Expense, "Utilities", 150, "Electric & water", "2024-11-10"),
    (TransactionKind::Expense, "Transportation", 200, "Gas & metro", "2024-11-12"),
    (TransactionKind::Expense, "Entertainment", 120, "Movies & dining", "2024-11-18"),
    (TransactionKind::Expense, "Groceries", 280, "Weekly shopping", "2024-11-20"),
];

/// The demonstration transactions, in insertion order
pub fn sample_transactions() -> Vec<NewTransaction> {
    SAMPLES
        .iter()
        .map(|&(kind, category, units, description, date)| {
            NewTransaction::new(kind, category, Money::from_units(units))
                .described(description)
                .on(date)
        })
        .collect()
}

/// Load the November 2024 demonstration transactions into an empty ledger
///
/// A ledger that already holds anything is left alone. Returns how many
/// transactions were inserted.
pub fn seed_sample_data(store: &LedgerStore) -> TallyResult<usize> {
    if store.count()? > 0 {
        tracing::debug!("ledger not empty, skipping sample data");
        return Ok(0);
    }

    let samples = sample_transactions();
    let inserted = samples.len();
    for sample in samples {
        store.insert(sample)?;
    }

    tracing::info!(inserted, "seeded sample data");
    Ok(inserted)
}
