//! Service layer for tally
//!
//! Validation and audit logging on top of the storage layer.

pub mod ledger;

pub use ledger::LedgerService;
