//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionId};

/// Ledger mutations that get audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Transaction was recorded
    Create,
    /// Transaction was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
///
/// Carries a snapshot of the transaction: `after` for creates, `before` for
/// deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub transaction_id: TransactionId,

    /// One-line description, e.g. `expense Rent $1,500.00 on 2024-11-01`
    pub summary: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

fn summarize(txn: &Transaction) -> String {
    format!(
        "{} {} {} on {}",
        txn.kind,
        txn.category,
        txn.amount,
        txn.date.format(crate::models::DATE_FORMAT)
    )
}

impl AuditEntry {
    /// Entry for a newly recorded transaction
    pub fn create(txn: &Transaction) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            transaction_id: txn.id,
            summary: summarize(txn),
            before: None,
            after: serde_json::to_value(txn).ok(),
        }
    }

    /// Entry for a deleted transaction
    pub fn delete(txn: &Transaction) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            transaction_id: txn.id,
            summary: summarize(txn),
            before: serde_json::to_value(txn).ok(),
            after: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {} #{} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.transaction_id,
            self.summary
        )
    }
}
