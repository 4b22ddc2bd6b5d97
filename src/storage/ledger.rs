//! Ledger store backed by a JSON file
//!
//! Holds every transaction in memory and rewrites `ledger.json` atomically
//! after each insert or delete. The next id is persisted alongside the
//! records so ids are never reused, even after the newest record is deleted.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TallyError, TallyResult};
use crate::models::{
    parse_date, Money, MonthPeriod, NewTransaction, Transaction, TransactionId,
};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of the ledger file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerData {
    #[serde(default = "first_id")]
    next_id: TransactionId,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

fn first_id() -> TransactionId {
    TransactionId::new(1)
}

impl Default for LedgerData {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            transactions: Vec::new(),
        }
    }
}

fn corrupt(path: &Path, problem: impl std::fmt::Display) -> TallyError {
    TallyError::Storage(format!("Corrupt ledger {}: {}", path.display(), problem))
}

fn id_space_exhausted() -> TallyError {
    TallyError::Storage("Transaction id space exhausted".into())
}

fn amount_too_large(amount: Money) -> TallyError {
    TallyError::Validation(format!(
        "Amount {} is larger than the ledger limit of {}",
        amount,
        Money::LIMIT
    ))
}

impl LedgerData {
    /// Reject duplicate ids and out-of-range amounts, and repair a counter
    /// that lags behind the records
    fn check(mut self, path: &Path) -> TallyResult<Self> {
        let mut seen = HashSet::with_capacity(self.transactions.len());
        for txn in &self.transactions {
            if !seen.insert(txn.id) {
                return Err(corrupt(path, format_args!("duplicate transaction id {}", txn.id)));
            }
            if txn.amount.exceeds_limit() {
                return Err(corrupt(
                    path,
                    format_args!("transaction {} amount {} is out of range", txn.id, txn.amount),
                ));
            }
        }

        if let Some(max) = self.transactions.iter().map(|t| t.id).max() {
            if self.next_id <= max {
                tracing::warn!(next_id = %self.next_id, max_id = %max, "ledger id counter behind records, advancing");
                self.next_id = max.next().ok_or_else(|| {
                    corrupt(path, format_args!("transaction id {} leaves no room for new ids", max))
                })?;
            }
        }

        Ok(self)
    }
}

/// Sort transactions into the ledger's natural order: newest date first,
/// ties broken by most recently inserted
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
}

fn closed_error() -> TallyError {
    TallyError::Storage("Ledger is closed".into())
}

/// Durable, queryable collection of transactions
pub struct LedgerStore {
    path: PathBuf,
    /// `None` once the store has been closed
    data: RwLock<Option<LedgerData>>,
}

impl LedgerStore {
    /// Open the ledger at `path`, creating an empty one if the file doesn't exist
    pub fn open(path: impl Into<PathBuf>) -> TallyResult<Self> {
        let path = path.into();
        let data: LedgerData = read_json(&path)?;
        let data = data.check(&path)?;

        tracing::debug!(
            path = %path.display(),
            transactions = data.transactions.len(),
            "opened ledger"
        );

        Ok(Self {
            path,
            data: RwLock::new(Some(data)),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `close` has not been called yet
    pub fn is_open(&self) -> bool {
        self.data.read().map(|d| d.is_some()).unwrap_or(false)
    }

    fn read<R>(&self, f: impl FnOnce(&LedgerData) -> R) -> TallyResult<R> {
        let guard = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let data = guard.as_ref().ok_or_else(closed_error)?;
        Ok(f(data))
    }

    fn write<R>(&self, f: impl FnOnce(&mut LedgerData) -> TallyResult<R>) -> TallyResult<R> {
        let mut guard = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let data = guard.as_mut().ok_or_else(closed_error)?;
        f(data)
    }

    /// Record a new transaction and return its assigned id
    ///
    /// A provided date must be `YYYY-MM-DD`; an omitted one means today.
    /// Amounts are stored as given, negative values included, as long as
    /// their magnitude stays within [`Money::LIMIT`].
    pub fn insert(&self, input: NewTransaction) -> TallyResult<TransactionId> {
        let date = match input.date.as_deref() {
            Some(s) => parse_date(s)?,
            None => chrono::Local::now().date_naive(),
        };
        if input.amount.exceeds_limit() {
            return Err(amount_too_large(input.amount));
        }

        self.write(|data| {
            let id = data.next_id;
            let next_id = id.next().ok_or_else(id_space_exhausted)?;
            data.transactions.push(Transaction {
                id,
                date,
                kind: input.kind,
                category: input.category,
                amount: input.amount,
                description: input.description,
            });
            data.next_id = next_id;

            if let Err(e) = write_json_atomic(&self.path, data) {
                data.transactions.pop();
                data.next_id = id;
                return Err(e);
            }

            tracing::debug!(%id, %date, "inserted transaction");
            Ok(id)
        })
    }

    /// All transactions, newest first
    pub fn query_all(&self) -> TallyResult<Vec<Transaction>> {
        let mut transactions = self.read(|data| data.transactions.clone())?;
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Transactions dated within the given calendar month, newest first
    pub fn query_by_month(&self, year: i32, month: u32) -> TallyResult<Vec<Transaction>> {
        let period = MonthPeriod::new(year, month)?;
        self.query_range(period.start_date(), period.end_date())
    }

    /// Transactions dated within `start..=end`, newest first
    pub fn query_range(&self, start: NaiveDate, end: NaiveDate) -> TallyResult<Vec<Transaction>> {
        let mut transactions = self.read(|data| {
            data.transactions
                .iter()
                .filter(|t| t.date >= start && t.date <= end)
                .cloned()
                .collect::<Vec<_>>()
        })?;
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Get a transaction by id
    pub fn get(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        self.read(|data| data.transactions.iter().find(|t| t.id == id).cloned())
    }

    /// Permanently remove a transaction
    ///
    /// Returns `false` when no transaction has this id.
    pub fn delete_by_id(&self, id: TransactionId) -> TallyResult<bool> {
        self.write(|data| {
            let Some(index) = data.transactions.iter().position(|t| t.id == id) else {
                return Ok(false);
            };

            let removed = data.transactions.remove(index);
            if let Err(e) = write_json_atomic(&self.path, data) {
                data.transactions.insert(index, removed);
                return Err(e);
            }

            tracing::debug!(%id, "deleted transaction");
            Ok(true)
        })
    }

    /// Number of stored transactions
    pub fn count(&self) -> TallyResult<usize> {
        self.read(|data| data.transactions.len())
    }

    /// Release the store; later operations fail with a storage error
    ///
    /// Every mutation is already on disk, so closing only drops the in-memory
    /// state. Calling it again does nothing.
    pub fn close(&self) {
        let taken = match self.data.write() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        if taken.is_some() {
            tracing::debug!(path = %self.path.display(), "closed ledger");
        }
    }
}

impl Drop for LedgerStore {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, LedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::open(temp_dir.path().join("ledger.json")).unwrap();
        (temp_dir, store)
    }

    fn expense(category: &str, units: i64, date: &str) -> NewTransaction {
        NewTransaction::new(TransactionKind::Expense, category, Money::from_units(units)).on(date)
    }

    fn income(category: &str, units: i64, date: &str) -> NewTransaction {
        NewTransaction::new(TransactionKind::Income, category, Money::from_units(units)).on(date)
    }

    #[test]
    fn test_empty_open() {
        let (temp_dir, store) = create_test_store();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.query_all().unwrap().is_empty());
        // Nothing written until the first mutation
        assert!(!temp_dir.path().join("ledger.json").exists());
    }

    #[test]
    fn test_insert_is_immediately_visible() {
        let (_temp_dir, store) = create_test_store();

        let id = store.insert(income("Salary", 5000, "2024-11-01")).unwrap();

        let txn = store.get(id).unwrap().unwrap();
        assert_eq!(txn.category, "Salary");
        assert_eq!(txn.amount, Money::from_units(5000));
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
        assert_eq!(store.query_all().unwrap().len(), 1);
    }

    #[test]
    fn test_insert_defaults_date_to_today() {
        let (_temp_dir, store) = create_test_store();

        let id = store
            .insert(NewTransaction::new(
                TransactionKind::Expense,
                "Coffee",
                Money::from_units(4),
            ))
            .unwrap();

        let txn = store.get(id).unwrap().unwrap();
        assert_eq!(txn.date, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_insert_rejects_malformed_date() {
        let (_temp_dir, store) = create_test_store();

        let err = store.insert(expense("Rent", 1500, "01/11/2024")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.count().unwrap(), 0);

        // A rejected insert doesn't consume an id
        let id = store.insert(expense("Rent", 1500, "2024-11-01")).unwrap();
        assert_eq!(id, TransactionId::new(1));
    }

    #[test]
    fn test_negative_amount_is_tolerated() {
        let (_temp_dir, store) = create_test_store();

        let id = store.insert(expense("Refund", -20, "2024-11-02")).unwrap();
        assert!(store.get(id).unwrap().unwrap().amount.is_negative());
    }

    #[test]
    fn test_query_by_month() {
        let (_temp_dir, store) = create_test_store();

        let id = store.insert(expense("Groceries", 350, "2024-11-05")).unwrap();

        let november = store.query_by_month(2024, 11).unwrap();
        assert_eq!(november.len(), 1);
        assert_eq!(november[0].id, id);

        assert!(store.query_by_month(2024, 10).unwrap().is_empty());
        assert!(store.query_by_month(2024, 12).unwrap().is_empty());
    }

    #[test]
    fn test_query_by_month_rejects_invalid_month() {
        let (_temp_dir, store) = create_test_store();
        assert!(store.query_by_month(2024, 13).unwrap_err().is_validation());
        assert!(store.query_by_month(2024, 0).unwrap_err().is_validation());
    }

    #[test]
    fn test_ordering_newest_date_then_newest_id() {
        let (_temp_dir, store) = create_test_store();

        let salary = store.insert(income("Salary", 5000, "2024-11-01")).unwrap();
        let groceries = store.insert(expense("Groceries", 350, "2024-11-05")).unwrap();
        let rent = store.insert(expense("Rent", 1500, "2024-11-01")).unwrap();

        let ids: Vec<_> = store.query_all().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![groceries, rent, salary]);

        let ids: Vec<_> = store
            .query_by_month(2024, 11)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![groceries, rent, salary]);
    }

    #[test]
    fn test_date_range_query() {
        let (_temp_dir, store) = create_test_store();

        store.insert(expense("A", 1, "2025-01-10")).unwrap();
        store.insert(expense("B", 2, "2025-01-15")).unwrap();
        store.insert(expense("C", 3, "2025-01-20")).unwrap();

        let range = store
            .query_range(
                NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 18).unwrap(),
            )
            .unwrap();

        assert_eq!(range.len(), 1);
        assert_eq!(range[0].category, "B");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, store) = create_test_store();

        let keep = store.insert(expense("Rent", 1500, "2024-11-01")).unwrap();
        let gone = store.insert(expense("Groceries", 350, "2024-11-05")).unwrap();

        assert!(store.delete_by_id(gone).unwrap());
        let remaining = store.query_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep);

        // Already deleted and never existing ids are soft misses
        assert!(!store.delete_by_id(gone).unwrap());
        assert!(!store.delete_by_id(TransactionId::new(99)).unwrap());
        assert_eq!(store.query_all().unwrap().len(), 1);
    }

    #[test]
    fn test_ids_strictly_increase_across_deletions() {
        let (_temp_dir, store) = create_test_store();

        let first = store.insert(expense("A", 1, "2024-11-01")).unwrap();
        let second = store.insert(expense("B", 2, "2024-11-01")).unwrap();
        assert!(store.delete_by_id(second).unwrap());

        let third = store.insert(expense("C", 3, "2024-11-01")).unwrap();
        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn test_ids_not_reused_after_reopen() {
        let (temp_dir, store) = create_test_store();

        store.insert(expense("A", 1, "2024-11-01")).unwrap();
        let newest = store.insert(expense("B", 2, "2024-11-01")).unwrap();
        assert!(store.delete_by_id(newest).unwrap());
        store.close();

        let reopened = LedgerStore::open(temp_dir.path().join("ledger.json")).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);

        let next = reopened.insert(expense("C", 3, "2024-11-01")).unwrap();
        assert!(next > newest);
    }

    #[test]
    fn test_persisted_format() {
        let (temp_dir, store) = create_test_store();
        store
            .insert(income("Salary", 5000, "2024-11-01").described("Monthly salary"))
            .unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("ledger.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["next_id"], 2);
        assert_eq!(json["transactions"][0]["date"], "2024-11-01");
        assert_eq!(json["transactions"][0]["kind"], "income");
        assert_eq!(json["transactions"][0]["description"], "Monthly salary");
    }

    #[test]
    fn test_duplicate_ids_are_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"{"next_id": 3, "transactions": [
                {"id": 1, "date": "2024-11-01", "kind": "income", "category": "A", "amount": "1"},
                {"id": 1, "date": "2024-11-02", "kind": "expense", "category": "B", "amount": "2"}
            ]}"#,
        )
        .unwrap();

        assert!(LedgerStore::open(&path).err().unwrap().is_storage());
    }

    #[test]
    fn test_lagging_counter_is_repaired() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"{"next_id": 1, "transactions": [
                {"id": 5, "date": "2024-11-01", "kind": "income", "category": "A", "amount": "1"}
            ]}"#,
        )
        .unwrap();

        let store = LedgerStore::open(&path).unwrap();
        let id = store.insert(expense("B", 2, "2024-11-02")).unwrap();
        assert_eq!(id, TransactionId::new(6));
    }

    #[test]
    fn test_last_possible_id_is_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"{"next_id": 1, "transactions": [
                {"id": 18446744073709551615, "date": "2024-11-01", "kind": "income", "category": "A", "amount": "1"}
            ]}"#,
        )
        .unwrap();

        assert!(LedgerStore::open(&path).err().unwrap().is_storage());
    }

    #[test]
    fn test_insert_fails_when_ids_run_out() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        let original = r#"{"next_id": 18446744073709551615, "transactions": []}"#;
        std::fs::write(&path, original).unwrap();

        let store = LedgerStore::open(&path).unwrap();
        let err = store.insert(expense("B", 2, "2024-11-02")).unwrap_err();
        assert!(err.is_storage());
        assert_eq!(store.count().unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_oversized_amount_is_rejected() {
        let (_temp_dir, store) = create_test_store();

        let huge = Money::parse("79228162514264337593543950335").unwrap();
        let err = store
            .insert(NewTransaction::new(TransactionKind::Income, "Salary", huge).on("2024-11-01"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.count().unwrap(), 0);

        store
            .insert(NewTransaction::new(TransactionKind::Income, "Salary", Money::LIMIT).on("2024-11-01"))
            .unwrap();
    }

    #[test]
    fn test_out_of_range_amount_in_file_is_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"{"next_id": 2, "transactions": [
                {"id": 1, "date": "2024-11-01", "kind": "income", "category": "A", "amount": "79228162514264337593543950335"}
            ]}"#,
        )
        .unwrap();

        assert!(LedgerStore::open(&path).err().unwrap().is_storage());
    }

    #[test]
    fn test_close_is_idempotent_and_final() {
        let (_temp_dir, store) = create_test_store();
        store.insert(expense("A", 1, "2024-11-01")).unwrap();

        assert!(store.is_open());
        store.close();
        store.close();
        assert!(!store.is_open());

        assert!(store.query_all().unwrap_err().is_storage());
        assert!(store
            .insert(expense("B", 2, "2024-11-01"))
            .unwrap_err()
            .is_storage());
        assert!(store.delete_by_id(TransactionId::new(1)).unwrap_err().is_storage());
    }
}
