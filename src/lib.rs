//! tally - terminal personal finance ledger
//!
//! Records income and expense transactions in a JSON ledger and derives
//! summaries, category breakdowns and monthly reports (terminal output,
//! PNG chart images and CSV exports) from them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Transactions, money, ids and month periods
//! - `storage`: JSON ledger store with atomic writes
//! - `audit`: Append-only audit log of ledger mutations
//! - `services`: Validation and audit on top of the store
//! - `reports`: Pure report engine over transaction sets
//! - `display`: Terminal formatting
//! - `export`: CSV and chart image output
//! - `cli`: Subcommand handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::config::TallyPaths;
//! use tally::models::{Money, NewTransaction, TransactionKind};
//! use tally::reports::summarize;
//! use tally::services::LedgerService;
//!
//! let service = LedgerService::open(&TallyPaths::new()?)?;
//! service.record(
//!     NewTransaction::new(TransactionKind::Expense, "Rent", Money::from_units(1500))
//!         .on("2024-11-01"),
//! )?;
//! let summary = summarize(&service.list_month(2024, 11)?);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
