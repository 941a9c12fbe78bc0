//! Service layer for the reconciler
//!
//! The service layer holds the reconciliation logic on top of the ledger
//! boundary: window selection, the reconciliation passes, and the job that
//! wraps a run with connect/disconnect.

pub mod job;
pub mod reconcile;
pub mod window;

pub use job::{run_job, run_with_ledger};
pub use reconcile::{
    resolve_other_category, BudgetWrite, ReconcileOutcome, ReconciliationSummary, Reconciler,
};
pub use window::{select_window, ReconciliationWindow};
