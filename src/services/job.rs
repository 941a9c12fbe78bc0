//! One scheduled reconciliation job
//!
//! Connects to the ledger, optionally pulls bank transactions, reconciles,
//! and always releases the ledger session afterwards.

use chrono::NaiveDate;
use tracing::error;

use super::reconcile::{ReconcileOutcome, Reconciler};
use crate::config::{ReconcileOptions, Settings};
use crate::error::FafoResult;
use crate::ledger::{HttpLedger, LedgerService};

/// Connect to the configured ledger and run one job for `today`
///
/// Failures are logged here and returned so the caller can decide whether
/// to keep going (the daemon) or exit non-zero (a one-off run).
pub async fn run_job(settings: &Settings, today: NaiveDate) -> FafoResult<ReconcileOutcome> {
    let ledger = match HttpLedger::connect(&settings.ledger).await {
        Ok(ledger) => ledger,
        Err(e) => {
            error!(error = %e, "Scheduled job failed");
            return Err(e);
        }
    };

    run_with_ledger(&ledger, settings.bank_sync, &settings.reconcile_options(), today).await
}

/// Run one job against an already connected ledger, then disconnect it
pub async fn run_with_ledger<L: LedgerService + ?Sized>(
    ledger: &L,
    bank_sync: bool,
    options: &ReconcileOptions,
    today: NaiveDate,
) -> FafoResult<ReconcileOutcome> {
    let result = async {
        if bank_sync {
            ledger.run_bank_sync().await?;
        }
        Reconciler::new(ledger, options).reconcile(today).await
    }
    .await;

    if let Err(e) = &result {
        error!(error = %e, "Scheduled job failed");
    }

    ledger.disconnect().await;
    result
}
