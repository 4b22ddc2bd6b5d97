//! Category breakdown
//!
//! Groups one kind of transaction by category. Totals keep full precision;
//! sorting uses the exact totals and rounding is left to presentation.

use std::collections::HashMap;

use crate::models::{Money, Transaction, TransactionKind};

/// One category's aggregated amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

impl CategoryTotal {
    /// Total rounded to cents for display
    pub fn rounded_total(&self) -> Money {
        self.total.round_cents()
    }
}

/// Per-category totals for one kind, largest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    pub kind: TransactionKind,
    pub rows: Vec<CategoryTotal>,
}

impl Breakdown {
    /// True when no transaction of this kind was present
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of every row
    pub fn total(&self) -> Money {
        self.rows.iter().map(|r| r.total).sum()
    }
}

/// Aggregate `transactions` of the given kind by category
///
/// Rows are ordered by total descending, ties by category name ascending.
pub fn category_breakdown(transactions: &[Transaction], kind: TransactionKind) -> Breakdown {
    let mut totals: HashMap<&str, (Money, usize)> = HashMap::new();

    for txn in transactions.iter().filter(|t| t.kind == kind) {
        let entry = totals
            .entry(txn.category.as_str())
            .or_insert((Money::zero(), 0));
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    let mut rows: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

    Breakdown { kind, rows }
}
