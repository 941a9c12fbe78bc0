//! In-memory ledger
//!
//! Holds month snapshots in a map and applies writes to them, so a second
//! run sees what the first one wrote. Every mutating call is recorded, and
//! failures can be injected to exercise partial-write runs.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::LedgerService;
use crate::error::{FafoError, FafoResult};
use crate::models::{BudgetMonth, CategoryId, Money, MonthKey};

/// A `set_budget_amount` call that reached the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub month: MonthKey,
    pub category_id: CategoryId,
    pub amount: Money,
}

#[derive(Debug, Default)]
struct MemoryState {
    months: BTreeMap<MonthKey, BudgetMonth>,
    writes: Vec<RecordedWrite>,
    sync_count: usize,
    bank_sync_count: usize,
    disconnected: bool,
    /// Zero-based index of the write attempt that should fail
    fail_write_at: Option<usize>,
    write_attempts: usize,
    fail_reads: bool,
    fail_bank_sync: bool,
}

/// Ledger backed by process memory
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: Mutex<MemoryState>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a month snapshot
    pub fn with_month(self, month: BudgetMonth) -> Self {
        self.insert_month(month);
        self
    }

    /// Add or replace a month snapshot
    pub fn insert_month(&self, month: BudgetMonth) {
        self.state().months.insert(month.month, month);
    }

    /// Current contents of a month
    pub fn month(&self, key: MonthKey) -> Option<BudgetMonth> {
        self.state().months.get(&key).cloned()
    }

    /// Writes applied so far, in call order
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.state().writes.clone()
    }

    /// Forget recorded writes and call counts, keeping month contents
    pub fn clear_history(&self) {
        let mut state = self.state();
        state.writes.clear();
        state.sync_count = 0;
        state.bank_sync_count = 0;
        state.write_attempts = 0;
    }

    pub fn sync_count(&self) -> usize {
        self.state().sync_count
    }

    pub fn bank_sync_count(&self) -> usize {
        self.state().bank_sync_count
    }

    pub fn is_disconnected(&self) -> bool {
        self.state().disconnected
    }

    /// Make the `n`-th write attempt (zero-based) fail
    pub fn fail_write_at(&self, n: usize) {
        self.state().fail_write_at = Some(n);
    }

    /// Make every month read fail
    pub fn fail_reads(&self, fail: bool) {
        self.state().fail_reads = fail;
    }

    /// Make bank sync fail
    pub fn fail_bank_sync(&self, fail: bool) {
        self.state().fail_bank_sync = fail;
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn unavailable(what: &str) -> FafoError {
    FafoError::Ledger {
        status: 503,
        message: format!("{} unavailable", what),
    }
}

#[async_trait]
impl LedgerService for MemoryLedger {
    async fn sync(&self) -> FafoResult<()> {
        self.state().sync_count += 1;
        Ok(())
    }

    async fn budget_month(&self, month: MonthKey) -> FafoResult<BudgetMonth> {
        let state = self.state();
        if state.fail_reads {
            return Err(unavailable("Budget month"));
        }
        state
            .months
            .get(&month)
            .cloned()
            .ok_or_else(|| FafoError::Validation(format!("No budget data for month {}", month)))
    }

    async fn set_budget_amount(
        &self,
        month: MonthKey,
        category_id: &CategoryId,
        amount: Money,
    ) -> FafoResult<()> {
        let mut state = self.state();
        let attempt = state.write_attempts;
        state.write_attempts += 1;
        if state.fail_write_at == Some(attempt) {
            return Err(unavailable("Budget write"));
        }

        let snapshot = state
            .months
            .get_mut(&month)
            .ok_or_else(|| FafoError::Validation(format!("No budget data for month {}", month)))?;
        if !snapshot.set_budgeted(category_id, amount) {
            return Err(FafoError::Validation(format!(
                "Unknown category id {} in month {}",
                category_id, month
            )));
        }

        state.writes.push(RecordedWrite {
            month,
            category_id: category_id.clone(),
            amount,
        });
        Ok(())
    }

    async fn run_bank_sync(&self) -> FafoResult<()> {
        let mut state = self.state();
        if state.fail_bank_sync {
            return Err(unavailable("Bank sync"));
        }
        state.bank_sync_count += 1;
        Ok(())
    }

    async fn disconnect(&self) {
        self.state().disconnected = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryGroup};

    fn january() -> MonthKey {
        MonthKey::new(2025, 1).unwrap()
    }

    fn ledger() -> MemoryLedger {
        MemoryLedger::new().with_month(BudgetMonth::new(
            january(),
            vec![CategoryGroup::new("g1", "Fixed").with_category(Category::new(
                "rent",
                "Rent",
                Money::from_cents(100000),
                Money::from_cents(-100000),
            ))],
        ))
    }

    #[tokio::test]
    async fn test_write_updates_snapshot() {
        let ledger = ledger();
        let rent = CategoryId::from("rent");
        ledger
            .set_budget_amount(january(), &rent, Money::from_cents(120000))
            .await
            .unwrap();

        let month = ledger.budget_month(january()).await.unwrap();
        assert_eq!(month.category_groups[0].budgeted, Money::from_cents(120000));
        assert_eq!(ledger.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_month_and_category() {
        let ledger = ledger();
        let feb = january().next();
        assert!(ledger.budget_month(feb).await.is_err());
        assert!(ledger
            .set_budget_amount(january(), &CategoryId::from("nope"), Money::zero())
            .await
            .is_err());
        assert!(ledger.writes().is_empty());
    }

    #[tokio::test]
    async fn test_injected_write_failure() {
        let ledger = ledger();
        let rent = CategoryId::from("rent");
        ledger.fail_write_at(1);
        assert!(ledger.set_budget_amount(january(), &rent, Money::from_cents(1)).await.is_ok());
        assert!(matches!(
            ledger.set_budget_amount(january(), &rent, Money::from_cents(2)).await,
            Err(FafoError::Ledger { status: 503, .. })
        ));
        assert_eq!(ledger.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_counts_and_disconnect() {
        let ledger = ledger();
        ledger.sync().await.unwrap();
        ledger.run_bank_sync().await.unwrap();
        ledger.disconnect().await;
        assert_eq!(ledger.sync_count(), 1);
        assert_eq!(ledger.bank_sync_count(), 1);
        assert!(ledger.is_disconnected());
    }
}
