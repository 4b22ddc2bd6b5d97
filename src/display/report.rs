//! Report formatting for terminal output
//!
//! Amounts are rounded to cents here and nowhere earlier.

use crate::models::{period_label, MonthPeriod};
use crate::reports::{Breakdown, MonthlyReport, Summary};

use super::transaction::format_transaction_register;

const WIDTH: usize = 50;
const REPORT_WIDTH: usize = 60;
const BAR_WIDTH: usize = 20;

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Income, expense and balance block for a period (`None` = all time)
pub fn format_summary(summary: &Summary, period: Option<&MonthPeriod>, symbol: &str) -> String {
    let label = period_label(period);

    if summary.is_empty() {
        return format!("No transactions found for {}\n", label);
    }

    let mut output = String::new();
    output.push_str(&double_separator(WIDTH));
    output.push('\n');
    output.push_str(&format!("FINANCIAL SUMMARY - {}\n", label));
    output.push_str(&double_separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Total Income:    {}\n",
        summary.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Total Expenses:  {}\n",
        summary.total_expense.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Net Balance:     {}\n",
        summary.net_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Transactions:    {}\n", summary.transaction_count));
    output.push_str(&double_separator(WIDTH));
    output.push('\n');
    output
}

/// Per-category table with a proportional bar column
pub fn format_breakdown(breakdown: &Breakdown, symbol: &str) -> String {
    if breakdown.is_empty() {
        return format!("No {} transactions found\n", breakdown.kind);
    }

    let max = breakdown
        .rows
        .first()
        .map(|r| r.total.to_f64())
        .unwrap_or(0.0);

    let mut output = String::new();
    output.push_str(&format!(
        "{} BY CATEGORY:\n",
        breakdown.kind.as_str().to_uppercase()
    ));
    output.push_str(&format!(
        "{:<20} {:>14} {:>6}  {}\n",
        "Category", "Total", "Count", ""
    ));
    output.push_str(&separator(WIDTH + BAR_WIDTH - 6));
    output.push('\n');

    for row in &breakdown.rows {
        output.push_str(&format!(
            "{:<20} {:>14} {:>6}  {}\n",
            truncate(&row.category, 20),
            row.rounded_total().format_with_symbol(symbol),
            row.count,
            format_bar(row.total.to_f64(), max, BAR_WIDTH)
        ));
    }

    output
}

/// Full monthly report: summary, both breakdowns and recent transactions
pub fn format_monthly_report(report: &MonthlyReport, symbol: &str) -> String {
    if report.is_empty() {
        return format!("No transactions found for {}\n", report.period);
    }

    let mut output = String::new();
    output.push_str(&"#".repeat(REPORT_WIDTH));
    output.push('\n');
    output.push_str(&format!("  MONTHLY REPORT: {}\n", report.period));
    output.push_str(&"#".repeat(REPORT_WIDTH));
    output.push_str("\n\n");

    output.push_str(&format_summary(&report.summary, Some(&report.period), symbol));
    output.push('\n');
    output.push_str(&format_breakdown(&report.expense_breakdown, symbol));
    output.push('\n');
    output.push_str(&format_breakdown(&report.income_breakdown, symbol));
    output.push('\n');
    output.push_str("RECENT TRANSACTIONS:\n");
    output.push_str(&format_transaction_register(&report.recent, symbol));
    output
}
