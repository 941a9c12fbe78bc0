//! Budget month snapshot
//!
//! A `BudgetMonth` is what the ledger reported for one month at the moment it
//! was read. Snapshots are read fresh for every reconciliation run.

use serde::{Deserialize, Serialize};

use super::category::{CategoryGroup, GroupKind};
use super::ids::CategoryId;
use super::money::Money;
use super::month::MonthKey;
use crate::error::{FafoError, FafoResult, MonthSide};

/// One month of category groups as read from the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetMonth {
    pub month: MonthKey,
    pub category_groups: Vec<CategoryGroup>,
}

impl BudgetMonth {
    /// Create a month snapshot
    pub fn new(month: MonthKey, category_groups: Vec<CategoryGroup>) -> Self {
        Self {
            month,
            category_groups,
        }
    }

    /// Find a group by name, ignoring case
    pub fn group_named(&self, name: &str) -> Option<&CategoryGroup> {
        self.category_groups.iter().find(|g| g.is_named(name))
    }

    /// Find one of the required groups
    pub fn group(&self, kind: GroupKind) -> Option<&CategoryGroup> {
        self.group_named(kind.name())
    }

    /// Find one of the required groups, failing with the names actually present
    pub fn require_group(&self, kind: GroupKind, side: MonthSide) -> FafoResult<&CategoryGroup> {
        self.group(kind)
            .ok_or_else(|| FafoError::missing_group(kind.name(), side, self.group_names()))
    }

    /// Group names in ledger order
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.category_groups.iter().map(|g| g.name.as_str())
    }

    /// Set a category's budgeted amount wherever it lives in this month
    ///
    /// Returns false when no group holds the category.
    pub fn set_budgeted(&mut self, category_id: &CategoryId, amount: Money) -> bool {
        for group in &mut self.category_groups {
            if let Some(category) = group.find_category_mut(category_id) {
                category.set_budgeted(amount);
                group.recompute_totals();
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn month() -> BudgetMonth {
        BudgetMonth::new(
            MonthKey::new(2025, 1).unwrap(),
            vec![
                CategoryGroup::new("g1", "fixed").with_category(Category::new(
                    "rent",
                    "Rent",
                    Money::from_cents(150000),
                    Money::from_cents(-150000),
                )),
                CategoryGroup::new("g2", "Other"),
            ],
        )
    }

    #[test]
    fn test_group_lookup_ignores_case() {
        let month = month();
        assert_eq!(month.group(GroupKind::Fixed).map(|g| g.id.as_str()), Some("g1"));
        assert!(month.group(GroupKind::Flex).is_none());
    }

    #[test]
    fn test_require_group_names_present_groups() {
        let month = month();
        let err = month
            .require_group(GroupKind::Flex, MonthSide::Source)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Category group \"Flex\" not found in source month. Found: fixed, Other"
        );
    }

    #[test]
    fn test_set_budgeted_updates_group_totals() {
        let mut month = month();
        assert!(month.set_budgeted(&CategoryId::from("rent"), Money::from_cents(155000)));
        let fixed = month.group(GroupKind::Fixed).unwrap();
        assert_eq!(fixed.budgeted, Money::from_cents(155000));
        assert_eq!(fixed.balance, Money::from_cents(5000));

        assert!(!month.set_budgeted(&CategoryId::from("missing"), Money::zero()));
    }
}
