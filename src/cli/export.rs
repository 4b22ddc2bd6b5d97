//! Export CLI command

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Settings;
use crate::error::TallyResult;
use crate::export::export_transactions_csv;
use crate::services::LedgerService;

#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Destination file; defaults to the configured export file
    pub path: Option<PathBuf>,
}

/// Export the whole ledger in store order to `path`
pub fn export_ledger<W: Write>(service: &LedgerService, path: &Path, out: &mut W) -> TallyResult<()> {
    let transactions = service.list()?;
    let rows = export_transactions_csv(&transactions, path)?;
    writeln!(
        out,
        "✓ Data exported to '{}' ({} transactions)",
        path.display(),
        rows
    )?;
    Ok(())
}

pub fn handle_export<W: Write>(
    service: &LedgerService,
    settings: &Settings,
    args: ExportArgs,
    out: &mut W,
) -> TallyResult<()> {
    let path = args.path.unwrap_or_else(|| settings.export_file.clone());
    export_ledger(service, &path, out)
}
