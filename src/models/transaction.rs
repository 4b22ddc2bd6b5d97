//! Transaction model
//!
//! A ledger transaction is either income or expense, tagged with a free-text
//! category. Transactions are never edited in place; they are only inserted
//! and deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use crate::error::{TallyError, TallyResult};

/// The one calendar format dates are stored and accepted in
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a transaction brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// The literal stored in the ledger and CSV export
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(TallyError::Validation(format!(
                "Type must be 'income' or 'expense', got '{}'",
                other
            ))),
        }
    }
}

/// A recorded ledger transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Ledger-assigned identifier
    pub id: TransactionId,

    /// Calendar date, stored as YYYY-MM-DD
    pub date: NaiveDate,

    /// Income or expense
    pub kind: TransactionKind,

    /// Free-text category label
    pub category: String,

    /// Amount at the precision it was entered with
    pub amount: Money,

    /// Optional annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Description or an empty string
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} {}",
            self.id,
            self.date.format(DATE_FORMAT),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// Input for recording a new transaction
///
/// The ledger assigns the id; `date` defaults to today when omitted.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl NewTransaction {
    /// Create an input with no description, dated today
    pub fn new(kind: TransactionKind, category: impl Into<String>, amount: Money) -> Self {
        Self {
            kind,
            category: category.into(),
            amount,
            description: None,
            date: None,
        }
    }

    /// Set the date string (YYYY-MM-DD)
    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the description
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Parse a date in the ledger's fixed calendar format
pub fn parse_date(s: &str) -> TallyResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
        TallyError::Validation(format!("Date must be in 'YYYY-MM-DD' format, got '{}'", s))
    })
}
