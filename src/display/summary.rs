//! Reconciliation output formatting

use super::{left_align, right_align, separator, truncate};
use crate::services::{ReconcileOutcome, ReconciliationSummary, ReconciliationWindow};

const NAME_WIDTH: usize = 24;

/// Describe the window selected for a date
pub fn format_window(window: Option<&ReconciliationWindow>) -> String {
    match window {
        Some(w) => format!(
            "Source month: {}\nTarget month: {}\n",
            w.source_month, w.target_month
        ),
        None => "Not in reconciliation window\n".to_string(),
    }
}

/// Describe the outcome of a run
pub fn format_outcome(outcome: &ReconcileOutcome) -> String {
    match outcome {
        ReconcileOutcome::OutsideWindow { day } => {
            format!("Day {} is not in the reconciliation window; nothing to do.\n", day)
        }
        ReconcileOutcome::Completed(summary) => format_summary(summary),
    }
}

/// Format the totals and changes of a completed run
pub fn format_summary(summary: &ReconciliationSummary) -> String {
    let mut output = String::new();

    let title = if summary.dry_run {
        "Reconciliation (dry run)"
    } else {
        "Reconciliation"
    };
    output.push_str(&format!(
        "{}: {} -> {}\n",
        title, summary.window.source_month, summary.window.target_month
    ));
    output.push_str(&separator(48));
    output.push('\n');

    let totals = [
        ("Target", summary.target),
        ("Fixed", summary.fixed),
        ("Flex", summary.flex),
        ("Allowances", summary.allowances),
    ];
    for (label, amount) in totals {
        output.push_str(&format!(
            "{} {}\n",
            left_align(label, NAME_WIDTH),
            right_align(&amount.to_string(), 14)
        ));
    }
    let other_label = format!("Other ({})", summary.other_category);
    output.push_str(&format!(
        "{} {}\n",
        left_align(&truncate(&other_label, NAME_WIDTH), NAME_WIDTH),
        right_align(&summary.other.to_string(), 14)
    ));
    if summary.other.is_negative() {
        output.push_str("  warning: spending plan exceeds the monthly target\n");
    }

    output.push('\n');
    if summary.writes.is_empty() {
        output.push_str("No changes needed.\n");
        return output;
    }

    let verb = if summary.dry_run { "Would change" } else { "Changed" };
    output.push_str(&format!("{} {} budget(s):\n", verb, summary.writes.len()));
    for write in &summary.writes {
        output.push_str(&format!(
            "  {} {} {} {} -> {}\n",
            write.month,
            left_align(write.group, 10),
            left_align(&truncate(&write.category_name, NAME_WIDTH), NAME_WIDTH),
            right_align(&write.from.to_string(), 12),
            write.to
        ));
    }

    output
}
