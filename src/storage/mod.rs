//! Storage layer for tally
//!
//! A single JSON ledger file with atomic writes and automatic directory
//! creation.

pub mod file_io;
pub mod init;
pub mod ledger;

pub use file_io::{read_json, write_json_atomic};
pub use init::seed_sample_data;
pub use ledger::{sort_newest_first, LedgerStore};
