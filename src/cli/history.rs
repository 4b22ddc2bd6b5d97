//! Audit history CLI command

use std::io::Write;

use clap::Args;

use crate::error::TallyResult;
use crate::services::LedgerService;

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

pub fn handle_history<W: Write>(
    service: &LedgerService,
    args: HistoryArgs,
    out: &mut W,
) -> TallyResult<()> {
    let entries = service.audit().read_recent(args.limit)?;

    if entries.is_empty() {
        writeln!(out, "No audit history yet.")?;
        return Ok(());
    }

    for entry in entries {
        writeln!(out, "{}", entry.format_human_readable())?;
    }
    Ok(())
}
