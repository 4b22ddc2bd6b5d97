//! Transaction CLI commands

use std::io::Write;

use clap::Args;

use crate::config::Settings;
use crate::display::{format_transaction_line, format_transaction_register};
use crate::error::{TallyError, TallyResult};
use crate::models::{Money, NewTransaction, TransactionId, TransactionKind};
use crate::services::LedgerService;

use super::parse_period;

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Transaction type: income or expense
    pub kind: String,
    /// Category, e.g. Salary or Groceries
    pub category: String,
    /// Amount, e.g. "350" or "1,250.75"
    pub amount: String,
    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
    /// Optional description
    #[arg(short = 'm', long)]
    pub description: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only show this month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,
    /// Maximum number of transactions to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Transaction ID
    pub id: String,
}

/// Parse a user-entered amount; negative values are rejected
pub fn parse_amount(s: &str) -> TallyResult<Money> {
    let amount = Money::parse(s).map_err(|_| {
        TallyError::Validation(format!(
            "Invalid amount: '{}'. Use a number like '350' or '1,250.75'",
            s.trim()
        ))
    })?;

    if amount.is_negative() {
        return Err(TallyError::Validation(format!(
            "Amount cannot be negative, got {}",
            s.trim()
        )));
    }

    if amount.exceeds_limit() {
        return Err(TallyError::Validation(format!(
            "Amount cannot be larger than {}",
            Money::LIMIT
        )));
    }

    Ok(amount)
}

/// Parse a transaction id such as `12` or `#12`
pub fn parse_id(s: &str) -> TallyResult<TransactionId> {
    s.parse().map_err(|_| {
        TallyError::Validation(format!(
            "Invalid ID format: '{}'. Please enter a number",
            s.trim()
        ))
    })
}

pub fn handle_add<W: Write>(
    service: &LedgerService,
    settings: &Settings,
    args: AddArgs,
    out: &mut W,
) -> TallyResult<()> {
    let kind: TransactionKind = args.kind.parse()?;
    let amount = parse_amount(&args.amount)?;

    let mut input = NewTransaction::new(kind, args.category, amount);
    input.date = args.date;
    input.description = args.description;

    let txn = service.record(input)?;
    writeln!(
        out,
        "✓ Added {}",
        format_transaction_line(&txn, &settings.currency_symbol)
    )?;
    Ok(())
}

pub fn handle_list<W: Write>(
    service: &LedgerService,
    settings: &Settings,
    args: ListArgs,
    out: &mut W,
) -> TallyResult<()> {
    let period = parse_period(args.month.as_deref())?;
    let mut transactions = service.list_period(period.as_ref())?;

    if let Some(limit) = args.limit {
        transactions.truncate(limit);
    }

    write!(
        out,
        "{}",
        format_transaction_register(&transactions, &settings.currency_symbol)
    )?;
    Ok(())
}

pub fn handle_delete<W: Write>(
    service: &LedgerService,
    args: DeleteArgs,
    out: &mut W,
) -> TallyResult<()> {
    let id = parse_id(&args.id)?;

    if service.delete(id)? {
        writeln!(out, "✓ Transaction with ID {} deleted successfully.", id)?;
    } else {
        writeln!(out, "No transaction found with ID {}.", id)?;
    }
    Ok(())
}

pub fn handle_seed<W: Write>(service: &LedgerService, out: &mut W) -> TallyResult<()> {
    let inserted = service.seed_sample_data()?;

    if inserted == 0 {
        writeln!(out, "Ledger already has transactions; sample data not loaded.")?;
    } else {
        writeln!(out, "✓ Loaded {} sample transactions.", inserted)?;
    }
    Ok(())
}
