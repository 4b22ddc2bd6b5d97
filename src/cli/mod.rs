//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers write to
//! any `Write` so they can be exercised without a terminal.

pub mod export;
pub mod history;
pub mod menu;
pub mod report;
pub mod transaction;

pub use export::{handle_export, ExportArgs};
pub use history::{handle_history, HistoryArgs};
pub use menu::Menu;
pub use report::{handle_breakdown, handle_report, handle_summary, BreakdownArgs, ReportArgs, SummaryArgs};
pub use transaction::{
    handle_add, handle_delete, handle_list, handle_seed, AddArgs, DeleteArgs, ListArgs,
};

use crate::error::TallyResult;
use crate::models::MonthPeriod;

/// Parse an optional `YYYY-MM` argument; `None` means all time
pub fn parse_period(month: Option<&str>) -> TallyResult<Option<MonthPeriod>> {
    month.map(MonthPeriod::parse).transpose()
}
