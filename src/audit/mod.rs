//! Audit trail for ledger mutations
//!
//! Every recorded and deleted transaction is appended to `audit.log` as one
//! JSON line holding the operation and a snapshot of the transaction.
//!
//! ```rust,ignore
//! use tally::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&transaction))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
