//! Ledger service boundary
//!
//! The remote budgeting ledger owns all state. The reconciler reaches it only
//! through [`LedgerService`], so a run can be pointed at the HTTP ledger in
//! production or at [`MemoryLedger`] in tests and rehearsals.
//!
//! Connecting is the job of each implementation's constructor; the handle's
//! lifecycle ends with [`LedgerService::disconnect`].

pub mod http;
pub mod memory;
pub mod wire;

use async_trait::async_trait;

use crate::error::FafoResult;
use crate::models::{BudgetMonth, CategoryId, Money, MonthKey};

pub use http::HttpLedger;
pub use memory::{MemoryLedger, RecordedWrite};

/// Operations the reconciler needs from a budgeting ledger
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Pull remote changes and push pending local ones
    async fn sync(&self) -> FafoResult<()>;

    /// Read one month's category groups
    async fn budget_month(&self, month: MonthKey) -> FafoResult<BudgetMonth>;

    /// Set the budgeted amount of a category in a month
    async fn set_budget_amount(
        &self,
        month: MonthKey,
        category_id: &CategoryId,
        amount: Money,
    ) -> FafoResult<()>;

    /// Ask the ledger to import new transactions from linked bank accounts
    async fn run_bank_sync(&self) -> FafoResult<()>;

    /// Release the session. Never fails outward; problems are only logged.
    async fn disconnect(&self);
}
