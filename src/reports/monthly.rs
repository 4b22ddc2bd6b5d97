//! Monthly report
//!
//! Combines the summary, both breakdowns and the most recent transactions
//! for one calendar month.

use crate::models::{MonthPeriod, Transaction, TransactionKind};

use super::breakdown::{category_breakdown, Breakdown};
use super::summary::{summarize, Summary};

/// How many transactions the report lists
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub period: MonthPeriod,
    pub summary: Summary,
    pub expense_breakdown: Breakdown,
    pub income_breakdown: Breakdown,
    /// First `RECENT_LIMIT` transactions in ledger order (newest first)
    pub recent: Vec<Transaction>,
}

impl MonthlyReport {
    /// Build the report from the month's transactions, already in ledger order
    pub fn generate(period: MonthPeriod, transactions: &[Transaction]) -> Self {
        Self {
            period,
            summary: summarize(transactions),
            expense_breakdown: category_breakdown(transactions, TransactionKind::Expense),
            income_breakdown: category_breakdown(transactions, TransactionKind::Income),
            recent: transactions.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }

    /// No transactions in the month
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionId};
    use chrono::NaiveDate;

    fn txn(id: u64, day: u32, kind: TransactionKind) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            date: NaiveDate::from_ymd_opt(2024, 11, day).unwrap(),
            kind,
            category: format!("C{}", id % 3),
            amount: Money::from_units(id as i64 * 10),
            description: None,
        }
    }

    #[test]
    fn test_recent_is_capped_and_ordered() {
        let ts: Vec<Transaction> = (1..=12)
            .rev()
            .map(|i| txn(i, i as u32, TransactionKind::Expense))
            .collect();

        let report = MonthlyReport::generate(MonthPeriod::new(2024, 11).unwrap(), &ts);

        assert_eq!(report.recent.len(), RECENT_LIMIT);
        assert_eq!(report.recent[0].id, TransactionId::new(12));
        assert_eq!(report.recent[9].id, TransactionId::new(3));
        assert_eq!(report.summary.transaction_count, 12);
    }

    #[test]
    fn test_breakdowns_split_by_kind() {
        let ts = vec![
            txn(2, 2, TransactionKind::Income),
            txn(1, 1, TransactionKind::Expense),
        ];

        let report = MonthlyReport::generate(MonthPeriod::new(2024, 11).unwrap(), &ts);
        assert_eq!(report.income_breakdown.rows.len(), 1);
        assert_eq!(report.expense_breakdown.rows.len(), 1);
        assert_eq!(report.income_breakdown.kind, TransactionKind::Income);
    }

    #[test]
    fn test_empty_month() {
        let report = MonthlyReport::generate(MonthPeriod::new(2024, 10).unwrap(), &[]);
        assert!(report.is_empty());
        assert!(report.expense_breakdown.is_empty());
        assert!(report.income_breakdown.is_empty());
        assert!(report.recent.is_empty());
    }
}
