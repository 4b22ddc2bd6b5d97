//! Report CLI commands
//!
//! Summary, category breakdown and the monthly report with its chart image.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::{format_breakdown, format_monthly_report, format_summary};
use crate::error::TallyResult;
use crate::export::write_monthly_charts;
use crate::models::{period_label, MonthPeriod, TransactionKind};
use crate::reports::{category_breakdown, summarize, MonthlyReport};
use crate::services::LedgerService;

use super::parse_period;

#[derive(Args, Debug, Clone, Default)]
pub struct SummaryArgs {
    /// Limit to one month (YYYY-MM); all time when omitted
    #[arg(short, long)]
    pub month: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct BreakdownArgs {
    /// Transaction type: income or expense
    pub kind: String,
    /// Limit to one month (YYYY-MM); all time when omitted
    #[arg(short, long)]
    pub month: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Month to report on (YYYY-MM)
    pub month: String,
    /// Directory for the chart image; defaults to the configured report directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Skip writing the chart image
    #[arg(long)]
    pub no_chart: bool,
}

pub fn handle_summary<W: Write>(
    service: &LedgerService,
    settings: &Settings,
    args: SummaryArgs,
    out: &mut W,
) -> TallyResult<()> {
    let period = parse_period(args.month.as_deref())?;
    let transactions = service.list_period(period.as_ref())?;

    let summary = summarize(&transactions);
    write!(
        out,
        "{}",
        format_summary(&summary, period.as_ref(), &settings.currency_symbol)
    )?;
    Ok(())
}

pub fn handle_breakdown<W: Write>(
    service: &LedgerService,
    settings: &Settings,
    args: BreakdownArgs,
    out: &mut W,
) -> TallyResult<()> {
    let kind: TransactionKind = args.kind.parse()?;
    let period = parse_period(args.month.as_deref())?;
    let transactions = service.list_period(period.as_ref())?;

    let breakdown = category_breakdown(&transactions, kind);
    writeln!(out, "Period: {}", period_label(period.as_ref()))?;
    write!(
        out,
        "{}",
        format_breakdown(&breakdown, &settings.currency_symbol)
    )?;
    Ok(())
}

/// Print the monthly report and, unless disabled or empty, write its chart image
pub fn run_monthly_report<W: Write>(
    service: &LedgerService,
    settings: &Settings,
    period: MonthPeriod,
    chart_dir: Option<PathBuf>,
    out: &mut W,
) -> TallyResult<()> {
    let transactions = service.list_month(period.year(), period.month())?;
    let report = MonthlyReport::generate(period, &transactions);
    tracing::info!(period = %report.period, transactions = report.summary.transaction_count, "generated monthly report");

    write!(
        out,
        "{}",
        format_monthly_report(&report, &settings.currency_symbol)
    )?;

    if let (Some(dir), false) = (chart_dir, report.is_empty()) {
        let path = write_monthly_charts(&report, &dir)?;
        writeln!(out, "\n✓ Chart saved as '{}'", path.display())?;
    }
    Ok(())
}

pub fn handle_report<W: Write>(
    service: &LedgerService,
    settings: &Settings,
    args: ReportArgs,
    out: &mut W,
) -> TallyResult<()> {
    let period = MonthPeriod::parse(&args.month)?;
    let chart_dir = if args.no_chart {
        None
    } else {
        Some(args.output_dir.unwrap_or_else(|| settings.report_dir.clone()))
    };

    run_monthly_report(service, settings, period, chart_dir, out)
}
