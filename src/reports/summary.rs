//! Income/expense summary

use crate::models::{Money, Transaction, TransactionKind};

/// Totals over a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_income: Money,
    pub total_expense: Money,
    /// Always `total_income - total_expense`
    pub net_balance: Money,
    pub transaction_count: usize,
}

impl Summary {
    /// True when no transactions were summarized
    ///
    /// Distinct from a summary whose totals happen to be zero.
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}

/// Total income, expense and net balance of `transactions`
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary::default();

    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => summary.total_income += txn.amount,
            TransactionKind::Expense => summary.total_expense += txn.amount,
        }
    }

    summary.net_balance = summary.total_income - summary.total_expense;
    summary.transaction_count = transactions.len();
    summary
}
