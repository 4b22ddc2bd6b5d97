//! Core data models for tally
//!
//! The ledger has a single entity, the transaction. Money, ids and month
//! periods are small value types around it.

pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use ids::TransactionId;
pub use money::Money;
pub use period::{period_label, MonthPeriod};
pub use transaction::{parse_date, NewTransaction, Transaction, TransactionKind, DATE_FORMAT};
