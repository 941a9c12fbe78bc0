//! Monthly budget reconciliation
//!
//! One run reads the source and target months of the current window and
//! brings the target month's budgets in line with the monthly target:
//!
//! 1. Fixed and Allowances budgets are copied from source to target as-is.
//! 2. Flex budgets in the source month are corrected to what was actually
//!    spent (unless the category carries unspent money forward), then copied
//!    to the target month.
//! 3. Whatever the monthly target leaves after Fixed, Flex and Allowances is
//!    assigned to a single category in the Other group.
//!
//! Writes are issued one at a time and only when a value changes, so running
//! twice with the same inputs makes no further changes. Nothing is rolled
//! back if a later step fails: earlier writes stay in the ledger.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use super::window::{select_window, ReconciliationWindow};
use crate::config::ReconcileOptions;
use crate::error::{FafoError, FafoResult, MonthSide};
use crate::ledger::LedgerService;
use crate::models::{BudgetMonth, Category, CategoryGroup, CategoryId, GroupKind, Money, MonthKey};

/// A budget change made (or, in dry-run, planned) during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetWrite {
    pub month: MonthKey,
    pub category_id: CategoryId,
    pub category_name: String,
    pub group: &'static str,
    pub from: Money,
    pub to: Money,
}

/// Totals and changes from a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationSummary {
    pub window: ReconciliationWindow,
    /// Monthly target in cents
    pub target: Money,
    pub fixed: Money,
    pub flex: Money,
    pub allowances: Money,
    /// Residual assigned to the Other category; may be negative
    pub other: Money,
    /// Name of the category that received the residual
    pub other_category: String,
    pub dry_run: bool,
    /// Changes in the order they were issued
    pub writes: Vec<BudgetWrite>,
}

/// Result of a reconciliation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Today is between the end day and the start day
    OutsideWindow { day: u32 },
    Completed(ReconciliationSummary),
}

/// Reconciles budgets against a ledger
pub struct Reconciler<'a, L: LedgerService + ?Sized> {
    ledger: &'a L,
    options: &'a ReconcileOptions,
}

impl<'a, L: LedgerService + ?Sized> Reconciler<'a, L> {
    /// Create a new reconciler
    pub fn new(ledger: &'a L, options: &'a ReconcileOptions) -> Self {
        Self { ledger, options }
    }

    /// Run one reconciliation for the given local date
    pub async fn reconcile(&self, today: NaiveDate) -> FafoResult<ReconcileOutcome> {
        let options = self.options;
        let Some(window) = select_window(today, options.recon_start_day, options.recon_end_day)
        else {
            info!(
                day = today.day(),
                start_day = options.recon_start_day,
                end_day = options.recon_end_day,
                "Not in reconciliation window, skipping"
            );
            return Ok(ReconcileOutcome::OutsideWindow { day: today.day() });
        };

        info!(
            source_month = %window.source_month,
            target_month = %window.target_month,
            dry_run = options.dry_run,
            "Starting reconciliation"
        );

        self.ledger.sync().await?;

        let source = self.ledger.budget_month(window.source_month).await?;
        let target = self.ledger.budget_month(window.target_month).await?;

        for kind in GroupKind::all() {
            source.require_group(*kind, MonthSide::Source)?;
            target.require_group(*kind, MonthSide::Target)?;
        }

        let target_amount = options.monthly_target;

        let mut writes = Vec::new();

        let fixed = self
            .copy_group(GroupKind::Fixed, &source, &target, &mut writes)
            .await?;
        let allowances = self
            .copy_group(GroupKind::Allowances, &source, &target, &mut writes)
            .await?;
        let flex = self.reconcile_flex(&source, &target, &mut writes).await?;

        let other = target_amount
            .checked_sub(fixed)
            .and_then(|m| m.checked_sub(flex))
            .and_then(|m| m.checked_sub(allowances))
            .ok_or_else(|| out_of_range(GroupKind::Other))?;
        if other.is_negative() {
            warn!(
                target = %target_amount,
                fixed = %fixed,
                flex = %flex,
                allowances = %allowances,
                other = %other,
                "Calculated Other budget is negative, spending exceeds target"
            );
        }

        let other_group = target.require_group(GroupKind::Other, MonthSide::Target)?;
        let other_category =
            resolve_other_category(other_group, options.other_category.as_deref())?;
        self.apply(
            target.month,
            GroupKind::Other,
            other_category,
            other_category.budgeted,
            other,
            &mut writes,
        )
        .await?;

        if !options.dry_run {
            self.ledger.sync().await?;
        }

        info!(
            target_month = %window.target_month,
            target = %target_amount,
            fixed = %fixed,
            flex = %flex,
            allowances = %allowances,
            other = %other,
            dry_run = options.dry_run,
            "Reconciliation complete"
        );

        Ok(ReconcileOutcome::Completed(ReconciliationSummary {
            window,
            target: target_amount,
            fixed,
            flex,
            allowances,
            other,
            other_category: other_category.name.clone(),
            dry_run: options.dry_run,
            writes,
        }))
    }

    /// Copy budgeted amounts verbatim for categories present in both months
    async fn copy_group(
        &self,
        kind: GroupKind,
        source: &BudgetMonth,
        target: &BudgetMonth,
        writes: &mut Vec<BudgetWrite>,
    ) -> FafoResult<Money> {
        let source_group = source.require_group(kind, MonthSide::Source)?;
        let target_group = target.require_group(kind, MonthSide::Target)?;
        let mut total = Money::zero();

        for source_cat in &source_group.categories {
            let Some(target_cat) = target_group.find_category(&source_cat.id) else {
                continue;
            };

            total = total
                .checked_add(source_cat.budgeted)
                .ok_or_else(|| out_of_range(kind))?;
            self.apply(
                target.month,
                kind,
                target_cat,
                target_cat.budgeted,
                source_cat.budgeted,
                writes,
            )
            .await?;
        }

        Ok(total)
    }

    /// Correct source Flex budgets to actual spend, then copy them forward
    async fn reconcile_flex(
        &self,
        source: &BudgetMonth,
        target: &BudgetMonth,
        writes: &mut Vec<BudgetWrite>,
    ) -> FafoResult<Money> {
        let source_group = source.require_group(GroupKind::Flex, MonthSide::Source)?;
        let target_group = target.require_group(GroupKind::Flex, MonthSide::Target)?;
        let mut total = Money::zero();

        for source_cat in &source_group.categories {
            let new_budget = if source_cat.carryover {
                info!(
                    "Flex: \"{}\" has carryover, keeping budget at {}",
                    source_cat.name, source_cat.budgeted
                );
                source_cat.budgeted
            } else {
                let actual = source_cat.spent_magnitude().ok_or_else(|| {
                    FafoError::Validation(format!(
                        "Spent amount for \"{}\" is out of range",
                        source_cat.name
                    ))
                })?;
                if source_cat.budgeted != actual {
                    info!(
                        from = %source_cat.budgeted,
                        to = %actual,
                        spent = %source_cat.spent,
                        "Flex ({}): \"{}\"",
                        source.month,
                        source_cat.name
                    );
                    self.write(
                        source.month,
                        GroupKind::Flex,
                        source_cat,
                        source_cat.budgeted,
                        actual,
                        writes,
                    )
                    .await?;
                }
                actual
            };

            total = total
                .checked_add(new_budget)
                .ok_or_else(|| out_of_range(GroupKind::Flex))?;

            let Some(target_cat) = target_group.find_category(&source_cat.id) else {
                warn!(
                    "Flex category \"{}\" not found in target month, skipping",
                    source_cat.name
                );
                continue;
            };

            self.apply(
                target.month,
                GroupKind::Flex,
                target_cat,
                target_cat.budgeted,
                new_budget,
                writes,
            )
            .await?;
        }

        Ok(total)
    }

    /// Log and write a target-month value if it changed
    async fn apply(
        &self,
        month: MonthKey,
        kind: GroupKind,
        category: &Category,
        from: Money,
        to: Money,
        writes: &mut Vec<BudgetWrite>,
    ) -> FafoResult<()> {
        if from == to {
            info!("{}: \"{}\" unchanged at {}", kind, category.name, to);
            return Ok(());
        }

        info!(from = %from, to = %to, "{} ({}): \"{}\"", kind, month, category.name);
        self.write(month, kind, category, from, to, writes).await
    }

    /// Issue a ledger write unless this is a dry run
    async fn write(
        &self,
        month: MonthKey,
        kind: GroupKind,
        category: &Category,
        from: Money,
        to: Money,
        writes: &mut Vec<BudgetWrite>,
    ) -> FafoResult<()> {
        if !self.options.dry_run {
            self.ledger
                .set_budget_amount(month, &category.id, to)
                .await?;
        }

        writes.push(BudgetWrite {
            month,
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            group: kind.name(),
            from,
            to,
        });
        Ok(())
    }
}

fn out_of_range(kind: GroupKind) -> FafoError {
    FafoError::Validation(format!("{} total is out of range", kind))
}

/// Pick the category in the Other group that receives the residual
///
/// A configured name wins when it matches (ignoring case); otherwise the
/// first category in ledger order is used.
pub fn resolve_other_category<'g>(
    group: &'g CategoryGroup,
    preferred: Option<&str>,
) -> FafoResult<&'g Category> {
    if let Some(name) = preferred {
        if let Some(category) = group.find_category_by_name(name) {
            return Ok(category);
        }
        warn!(
            "Configured FAFO_OTHER_CATEGORY \"{}\" not found in Other group, falling back to first category",
            name
        );
    }

    group.categories.first().ok_or(FafoError::EmptyOtherGroup)
}
