use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tally::cli::{
    handle_add, handle_breakdown, handle_delete, handle_export, handle_history, handle_list,
    handle_report, handle_seed, handle_summary, AddArgs, BreakdownArgs, DeleteArgs, ExportArgs,
    HistoryArgs, ListArgs, Menu, ReportArgs, SummaryArgs,
};
use tally::config::{paths::DATA_DIR_ENV, Settings, TallyPaths};
use tally::services::LedgerService;

/// Environment variable holding the log filter, e.g. `TALLY_LOG=debug`
const LOG_ENV: &str = "TALLY_LOG";

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Terminal personal finance ledger",
    long_about = "tally records income and expense transactions, summarizes them by \
                  month and category, and produces monthly reports with charts and \
                  CSV exports. Run without a subcommand for the interactive menu."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu (default)
    Menu,

    /// Record an income or expense transaction
    Add(AddArgs),

    /// List transactions, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show total income, expenses and net balance
    Summary(SummaryArgs),

    /// Show totals per category for one transaction type
    Breakdown(BreakdownArgs),

    /// Print a monthly report and write its chart image
    Report(ReportArgs),

    /// Export all transactions to CSV
    Export(ExportArgs),

    /// Delete a transaction by ID
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Load demonstration transactions into an empty ledger
    Seed,

    /// Show the audit history of recorded and deleted transactions
    History(HistoryArgs),

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let service = LedgerService::open(&paths)?;

    let result = run(cli.command, &paths, &settings, &service);
    service.close();
    result
}

fn run(
    command: Option<Commands>,
    paths: &TallyPaths,
    settings: &Settings,
    service: &LedgerService,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = io::stdin();
            Menu::new(service, settings, stdin.lock(), &mut out).run()?;
        }
        Commands::Add(args) => handle_add(service, settings, args, &mut out)?,
        Commands::List(args) => handle_list(service, settings, args, &mut out)?,
        Commands::Summary(args) => handle_summary(service, settings, args, &mut out)?,
        Commands::Breakdown(args) => handle_breakdown(service, settings, args, &mut out)?,
        Commands::Report(args) => handle_report(service, settings, args, &mut out)?,
        Commands::Export(args) => handle_export(service, settings, args, &mut out)?,
        Commands::Delete(args) => handle_delete(service, args, &mut out)?,
        Commands::Seed => handle_seed(service, &mut out)?,
        Commands::History(args) => handle_history(service, args, &mut out)?,
        Commands::Config => {
            writeln!(out, "tally configuration")?;
            writeln!(out, "===================")?;
            writeln!(out, "Base directory: {}", paths.base_dir().display())?;
            writeln!(out, "Ledger file:    {}", paths.ledger_file().display())?;
            writeln!(out, "Settings file:  {}", paths.settings_file().display())?;
            writeln!(out, "Audit log:      {}", paths.audit_log().display())?;
            writeln!(out, "(override with {})", DATA_DIR_ENV)?;
            writeln!(out)?;
            writeln!(out, "Settings:")?;
            writeln!(out, "  Currency symbol:  {}", settings.currency_symbol)?;
            writeln!(out, "  Export file:      {}", settings.export_file.display())?;
            writeln!(out, "  Report directory: {}", settings.report_dir.display())?;
            writeln!(out, "  Seed sample data: {}", settings.seed_sample_data)?;
            writeln!(out, "  Recent limit:     {}", settings.recent_limit)?;
        }
    }

    Ok(())
}
