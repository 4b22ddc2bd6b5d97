//! Interactive menu
//!
//! A plain synchronous loop over numbered options. Invalid answers are
//! reported and asked again; errors from an action are printed and the menu
//! comes back. End of input behaves like choosing Exit.

use std::io::{BufRead, Write};

use crate::config::Settings;
use crate::display::{
    format_breakdown, format_summary, format_transaction_line, format_transaction_register,
};
use crate::error::{TallyError, TallyResult};
use crate::models::{parse_date, MonthPeriod, NewTransaction, TransactionKind};
use crate::reports::{category_breakdown, summarize};
use crate::services::LedgerService;

use super::export::export_ledger;
use super::report::run_monthly_report;
use super::transaction::{parse_amount, parse_id};

const WIDTH: usize = 50;

/// Whether the loop keeps going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'a, R, W> {
    service: &'a LedgerService,
    settings: &'a Settings,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(service: &'a LedgerService, settings: &'a Settings, input: R, output: W) -> Self {
        Self {
            service,
            settings,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> TallyResult<()> {
        if self.settings.seed_sample_data {
            let inserted = self.service.seed_sample_data()?;
            if inserted > 0 {
                writeln!(
                    self.output,
                    "Loaded {} sample transactions for demonstration.",
                    inserted
                )?;
            }
        }

        loop {
            self.print_menu()?;

            let Some(choice) = self.prompt("\nEnter your choice (1-9): ")? else {
                break;
            };

            match self.dispatch(&choice) {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "menu action failed");
                    writeln!(self.output, "❌ {}", e)?;
                }
            }
        }

        writeln!(self.output, "\nThank you for using tally!")?;
        Ok(())
    }

    fn print_menu(&mut self) -> TallyResult<()> {
        let rule = "=".repeat(WIDTH);
        writeln!(self.output, "\n{}", rule)?;
        writeln!(self.output, "PERSONAL FINANCE TRACKER")?;
        writeln!(self.output, "{}", rule)?;
        for line in [
            "1. Add Income",
            "2. Add Expense",
            "3. View All Transactions",
            "4. View Summary",
            "5. Category Breakdown",
            "6. Generate Monthly Report",
            "7. Export to CSV",
            "8. Delete Transaction",
            "9. Exit",
        ] {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output, "{}", rule)?;
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> TallyResult<Flow> {
        match choice {
            "1" => self.add(TransactionKind::Income),
            "2" => self.add(TransactionKind::Expense),
            "3" => self.view_all(),
            "4" => self.summary(),
            "5" => self.breakdown(),
            "6" => self.monthly_report(),
            "7" => self.export(),
            "8" => self.delete(),
            "9" => Ok(Flow::Exit),
            _ => {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> TallyResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until `parse` accepts the answer; validation errors are shown and asked again
    fn prompt_until<T>(
        &mut self,
        label: &str,
        mut parse: impl FnMut(&str) -> TallyResult<T>,
    ) -> TallyResult<Option<T>> {
        loop {
            let Some(answer) = self.prompt(label)? else {
                return Ok(None);
            };

            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) if e.is_validation() => writeln!(self.output, "❌ {}", e)?,
                Err(e) => return Err(e),
            }
        }
    }

    fn prompt_period(&mut self) -> TallyResult<Option<MonthPeriod>> {
        let Some(year) = self.prompt_until("Year (e.g., 2024): ", |s| {
            let year = s
                .parse::<i32>()
                .map_err(|_| TallyError::Validation(format!("Invalid year: '{}'", s)))?;
            // Both ends of the year must be representable
            MonthPeriod::new(year, 1)?;
            MonthPeriod::new(year, 12)?;
            Ok(year)
        })?
        else {
            return Ok(None);
        };

        self.prompt_until("Month (1-12): ", |s| {
            let month = s
                .parse::<u32>()
                .map_err(|_| TallyError::Validation(format!("Invalid month: '{}'", s)))?;
            MonthPeriod::new(year, month)
        })
    }

    /// Ask whether to scope to one month; `Ok(None)` at end of input
    fn prompt_optional_period(&mut self) -> TallyResult<Option<Option<MonthPeriod>>> {
        let Some(answer) = self.prompt("View specific month? (y/n): ")? else {
            return Ok(None);
        };

        if answer.eq_ignore_ascii_case("y") {
            Ok(self.prompt_period()?.map(Some))
        } else {
            Ok(Some(None))
        }
    }

    fn add(&mut self, kind: TransactionKind) -> TallyResult<Flow> {
        let example = match kind {
            TransactionKind::Income => "Salary, Freelance",
            TransactionKind::Expense => "Rent, Groceries, Entertainment",
        };

        let Some(category) = self.prompt_until(&format!("Category (e.g., {}): ", example), |s| {
            if s.is_empty() {
                Err(TallyError::Validation("Category cannot be empty".into()))
            } else {
                Ok(s.to_string())
            }
        })?
        else {
            return Ok(Flow::Exit);
        };

        let symbol = self.settings.currency_symbol.clone();
        let Some(amount) = self.prompt_until(&format!("Amount: {}", symbol), parse_amount)? else {
            return Ok(Flow::Exit);
        };

        let Some(description) = self.prompt("Description (optional): ")? else {
            return Ok(Flow::Exit);
        };

        let Some(date) = self.prompt_until("Date (YYYY-MM-DD, blank for today): ", |s| {
            if !s.is_empty() {
                parse_date(s)?;
            }
            Ok(s.to_string())
        })?
        else {
            return Ok(Flow::Exit);
        };

        let mut input = NewTransaction::new(kind, category, amount).described(description);
        if !date.is_empty() {
            input = input.on(date);
        }

        let txn = self.service.record(input)?;
        writeln!(
            self.output,
            "✓ {} added: {}",
            capitalize(kind.as_str()),
            format_transaction_line(&txn, &symbol)
        )?;
        Ok(Flow::Continue)
    }

    fn view_all(&mut self) -> TallyResult<Flow> {
        let transactions = self.service.list()?;
        write!(
            self.output,
            "\n{}",
            format_transaction_register(&transactions, &self.settings.currency_symbol)
        )?;
        Ok(Flow::Continue)
    }

    fn summary(&mut self) -> TallyResult<Flow> {
        let Some(period) = self.prompt_optional_period()? else {
            return Ok(Flow::Exit);
        };

        let transactions = self.service.list_period(period.as_ref())?;
        write!(
            self.output,
            "\n{}",
            format_summary(
                &summarize(&transactions),
                period.as_ref(),
                &self.settings.currency_symbol
            )
        )?;
        Ok(Flow::Continue)
    }

    fn breakdown(&mut self) -> TallyResult<Flow> {
        let Some(kind) = self.prompt_until("Type (income/expense): ", |s| {
            s.parse::<TransactionKind>()
        })?
        else {
            return Ok(Flow::Exit);
        };

        let Some(period) = self.prompt_optional_period()? else {
            return Ok(Flow::Exit);
        };

        let transactions = self.service.list_period(period.as_ref())?;
        write!(
            self.output,
            "\n{}",
            format_breakdown(
                &category_breakdown(&transactions, kind),
                &self.settings.currency_symbol
            )
        )?;
        Ok(Flow::Continue)
    }

    fn monthly_report(&mut self) -> TallyResult<Flow> {
        let Some(period) = self.prompt_period()? else {
            return Ok(Flow::Exit);
        };

        writeln!(self.output)?;
        let chart_dir = Some(self.settings.report_dir.clone());
        run_monthly_report(self.service, self.settings, period, chart_dir, &mut self.output)?;
        Ok(Flow::Continue)
    }

    fn export(&mut self) -> TallyResult<Flow> {
        let path = self.settings.export_file.clone();
        export_ledger(self.service, &path, &mut self.output)?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> TallyResult<Flow> {
        let mut recent = self.service.list()?;
        if recent.is_empty() {
            writeln!(self.output, "No transactions to delete.")?;
            return Ok(Flow::Continue);
        }
        recent.truncate(self.settings.recent_limit);

        writeln!(
            self.output,
            "\n--- TRANSACTION LIST (Recent {}) ---",
            self.settings.recent_limit
        )?;
        write!(
            self.output,
            "{}",
            format_transaction_register(&recent, &self.settings.currency_symbol)
        )?;

        let Some(id) = self.prompt_until(
            "\nEnter Transaction ID to delete (or Enter to cancel): ",
            |s| {
                if s.is_empty() {
                    Ok(None)
                } else {
                    parse_id(s).map(Some)
                }
            },
        )?
        else {
            return Ok(Flow::Exit);
        };

        let Some(id) = id else {
            writeln!(self.output, "Deletion cancelled.")?;
            return Ok(Flow::Continue);
        };

        if self.service.delete(id)? {
            writeln!(self.output, "✓ Transaction with ID {} deleted successfully.", id)?;
        } else {
            writeln!(self.output, "❌ No transaction found with ID {}.", id)?;
        }
        Ok(Flow::Continue)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
