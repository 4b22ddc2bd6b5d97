//! Ledger service
//!
//! Entry boundary in front of the store: input validation, description
//! normalisation and the audit trail. Every front end (menu, subcommands,
//! tests) goes through here rather than talking to `LedgerStore` directly.

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::TallyPaths;
use crate::error::{TallyError, TallyResult};
use crate::models::{Money, MonthPeriod, NewTransaction, Transaction, TransactionId};
use crate::storage::{self, LedgerStore};

/// Owns the ledger store and the audit log for one session
pub struct LedgerService {
    store: LedgerStore,
    audit: AuditLogger,
}

impl LedgerService {
    pub fn new(store: LedgerStore, audit: AuditLogger) -> Self {
        Self { store, audit }
    }

    /// Open the ledger and audit log under the given paths
    pub fn open(paths: &TallyPaths) -> TallyResult<Self> {
        paths.ensure_directories()?;
        let store = LedgerStore::open(paths.ledger_file())?;
        Ok(Self::new(store, AuditLogger::new(paths.audit_log())))
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Validate and record a transaction, returning it as stored
    pub fn record(&self, input: NewTransaction) -> TallyResult<Transaction> {
        let input = validate(input)?;
        let id = self.store.insert(input)?;
        let txn = self
            .store
            .get(id)?
            .ok_or_else(|| TallyError::Storage(format!("Transaction {} missing after insert", id)))?;

        self.write_audit(&AuditEntry::create(&txn));
        tracing::info!(id = %txn.id, kind = %txn.kind, category = %txn.category, "recorded transaction");
        Ok(txn)
    }

    /// Every transaction, newest first
    pub fn list(&self) -> TallyResult<Vec<Transaction>> {
        self.store.query_all()
    }

    /// Transactions in one calendar month, newest first
    pub fn list_month(&self, year: i32, month: u32) -> TallyResult<Vec<Transaction>> {
        self.store.query_by_month(year, month)
    }

    /// Transactions in a period, or all of them for `None`
    pub fn list_period(&self, period: Option<&MonthPeriod>) -> TallyResult<Vec<Transaction>> {
        match period {
            Some(p) => self.store.query_range(p.start_date(), p.end_date()),
            None => self.store.query_all(),
        }
    }

    pub fn get(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        self.store.get(id)
    }

    /// Delete a transaction; `false` if no such id exists
    pub fn delete(&self, id: TransactionId) -> TallyResult<bool> {
        let Some(txn) = self.store.get(id)? else {
            tracing::debug!(%id, "delete of unknown transaction");
            return Ok(false);
        };

        let removed = self.store.delete_by_id(id)?;
        if removed {
            self.write_audit(&AuditEntry::delete(&txn));
            tracing::info!(%id, "deleted transaction");
        }
        Ok(removed)
    }

    /// Seed demonstration data if the ledger is empty
    pub fn seed_sample_data(&self) -> TallyResult<usize> {
        storage::seed_sample_data(&self.store)
    }

    /// Release the ledger; safe to call more than once
    pub fn close(&self) {
        self.store.close();
    }

    fn write_audit(&self, entry: &AuditEntry) {
        // The ledger change is already durable at this point
        if let Err(e) = self.audit.log(entry) {
            tracing::warn!(error = %e, "failed to write audit entry");
        }
    }
}

/// Reject input the ledger shouldn't hold and tidy optional fields
fn validate(mut input: NewTransaction) -> TallyResult<NewTransaction> {
    let category = input.category.trim();
    if category.is_empty() {
        tracing::warn!("rejected transaction with empty category");
        return Err(TallyError::Validation("Category cannot be empty".into()));
    }
    input.category = category.to_string();

    if input.amount.is_negative() {
        tracing::warn!(amount = %input.amount, "rejected negative amount");
        return Err(TallyError::Validation(format!(
            "Amount cannot be negative, got {}",
            input.amount
        )));
    }

    if input.amount.exceeds_limit() {
        tracing::warn!(amount = %input.amount, "rejected oversized amount");
        return Err(TallyError::Validation(format!(
            "Amount cannot be larger than {}",
            Money::LIMIT
        )));
    }

    input.description = input
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    input.date = input
        .date
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Money, TransactionKind};
    use crate::reports::{category_breakdown, summarize};
    use tempfile::TempDir;

    fn create_test_service() -> (TempDir, LedgerService) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let service = LedgerService::open(&paths).unwrap();
        (temp_dir, service)
    }

    #[test]
    fn test_record_normalises_input() {
        let (_temp_dir, service) = create_test_service();

        let txn = service
            .record(
                NewTransaction::new(TransactionKind::Expense, "  Rent ", Money::from_units(1500))
                    .described("   ")
                    .on(" 2024-11-01 "),
            )
            .unwrap();

        assert_eq!(txn.category, "Rent");
        assert_eq!(txn.description, None);
        assert_eq!(txn.date.to_string(), "2024-11-01");
    }

    #[test]
    fn test_blank_date_means_today() {
        let (_temp_dir, service) = create_test_service();

        let txn = service
            .record(
                NewTransaction::new(TransactionKind::Income, "Gift", Money::from_units(20)).on(""),
            )
            .unwrap();

        assert_eq!(txn.date, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_record_rejects_empty_category() {
        let (_temp_dir, service) = create_test_service();

        let err = service
            .record(NewTransaction::new(
                TransactionKind::Expense,
                "   ",
                Money::from_units(10),
            ))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(service.list().unwrap().len(), 0);
    }

    #[test]
    fn test_record_rejects_negative_amount() {
        let (_temp_dir, service) = create_test_service();

        let err = service
            .record(
                NewTransaction::new(TransactionKind::Expense, "Refund", Money::from_units(-5))
                    .on("2024-11-01"),
            )
            .unwrap_err();

        assert!(err.is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_largest_amounts_still_summarize() {
        let (_temp_dir, service) = create_test_service();

        let huge = Money::parse("79228162514264337593543950335").unwrap();
        for _ in 0..2 {
            let err = service
                .record(
                    NewTransaction::new(TransactionKind::Income, "Salary", huge).on("2024-11-01"),
                )
                .unwrap_err();
            assert!(err.is_validation());
        }

        for _ in 0..2 {
            service
                .record(
                    NewTransaction::new(TransactionKind::Income, "Salary", Money::LIMIT)
                        .on("2024-11-01"),
                )
                .unwrap();
        }

        let transactions = service.list().unwrap();
        let summary = summarize(&transactions);
        assert_eq!(summary.total_income, Money::LIMIT + Money::LIMIT);
        assert_eq!(summary.net_balance, Money::LIMIT + Money::LIMIT);

        let breakdown = category_breakdown(&transactions, TransactionKind::Income);
        assert_eq!(breakdown.rows[0].total, Money::LIMIT + Money::LIMIT);
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        let (_temp_dir, service) = create_test_service();
        let txn = service
            .record(NewTransaction::new(
                TransactionKind::Expense,
                "Free sample",
                Money::zero(),
            ))
            .unwrap();
        assert!(txn.amount.is_zero());
    }

    #[test]
    fn test_full_precision_is_kept() {
        let (_temp_dir, service) = create_test_service();
        let amount = Money::parse("10.005").unwrap();

        let txn = service
            .record(NewTransaction::new(TransactionKind::Expense, "Tea", amount).on("2024-11-01"))
            .unwrap();

        assert_eq!(txn.amount, amount);
    }

    #[test]
    fn test_list_period() {
        let (_temp_dir, service) = create_test_service();
        service.seed_sample_data().unwrap();
        service
            .record(
                NewTransaction::new(TransactionKind::Expense, "Rent", Money::from_units(1500))
                    .on("2024-12-01"),
            )
            .unwrap();

        let november = MonthPeriod::new(2024, 11).unwrap();
        assert_eq!(service.list_period(Some(&november)).unwrap().len(), 8);
        assert_eq!(service.list_period(None).unwrap().len(), 9);
        assert_eq!(service.list_month(2024, 12).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_writes_audit() {
        let (_temp_dir, service) = create_test_service();

        let txn = service
            .record(
                NewTransaction::new(TransactionKind::Expense, "Rent", Money::from_units(1500))
                    .on("2024-11-01"),
            )
            .unwrap();

        assert!(service.delete(txn.id).unwrap());
        assert!(!service.delete(txn.id).unwrap());

        let entries = service.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].operation, Operation::Delete);
        assert_eq!(entries[1].transaction_id, txn.id);
    }

    #[test]
    fn test_delete_leaves_others_untouched() {
        let (_temp_dir, service) = create_test_service();
        service.seed_sample_data().unwrap();
        let before = service.list().unwrap();

        let victim = before[3].id;
        assert!(service.delete(victim).unwrap());

        let after = service.list().unwrap();
        assert_eq!(after.len(), before.len() - 1);
        assert!(after.iter().all(|t| t.id != victim));
        assert!(before
            .iter()
            .filter(|t| t.id != victim)
            .all(|t| after.contains(t)));
    }

    #[test]
    fn test_november_scenario() {
        let (_temp_dir, service) = create_test_service();

        for input in [
            NewTransaction::new(TransactionKind::Income, "Salary", Money::from_units(5000)),
            NewTransaction::new(TransactionKind::Expense, "Rent", Money::from_units(1500)),
        ] {
            service.record(input.on("2024-11-01")).unwrap();
        }
        service
            .record(
                NewTransaction::new(TransactionKind::Expense, "Groceries", Money::from_units(350))
                    .on("2024-11-05"),
            )
            .unwrap();

        let november = service.list_month(2024, 11).unwrap();
        let summary = summarize(&november);
        assert_eq!(summary.total_income, Money::from_units(5000));
        assert_eq!(summary.total_expense, Money::from_units(1850));
        assert_eq!(summary.net_balance, Money::from_units(3150));

        let breakdown = category_breakdown(&november, TransactionKind::Expense);
        let rows: Vec<(&str, Money, usize)> = breakdown
            .rows
            .iter()
            .map(|r| (r.category.as_str(), r.total, r.count))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Rent", Money::from_units(1500), 1),
                ("Groceries", Money::from_units(350), 1)
            ]
        );

        assert!(service.list_month(2024, 10).unwrap().is_empty());
        assert!(service.list_month(2024, 12).unwrap().is_empty());
    }

    #[test]
    fn test_close_then_use_fails() {
        let (_temp_dir, service) = create_test_service();
        service.close();
        service.close();
        assert!(service.list().unwrap_err().is_storage());
    }
}
