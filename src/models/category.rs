//! Category and CategoryGroup models
//!
//! Categories are organized into groups. Each category carries the ledger's
//! view of one month: what was budgeted, what was spent, and what is left.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryGroupId, CategoryId};
use super::money::Money;

/// A budget category as reported for a single month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Ledger identifier, stable across months
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Amount budgeted this month
    pub budgeted: Money,

    /// Activity this month (negative means money spent)
    pub spent: Money,

    /// Remaining balance including anything carried in
    pub balance: Money,

    /// Whether unspent budget rolls forward into the next month
    #[serde(default)]
    pub carryover: bool,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub is_income: bool,
}

impl Category {
    /// Create a category with the given budget and activity
    ///
    /// The balance starts as `budgeted + spent`, i.e. nothing carried in.
    pub fn new(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        budgeted: Money,
        spent: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            budgeted,
            spent,
            balance: budgeted.saturating_add(spent),
            carryover: false,
            hidden: false,
            is_income: false,
        }
    }

    /// Mark the category as rolling unspent budget forward
    pub fn with_carryover(mut self, carryover: bool) -> Self {
        self.carryover = carryover;
        self
    }

    /// Actual spend as a positive amount
    ///
    /// `None` when the spend is too large to negate.
    pub fn spent_magnitude(&self) -> Option<Money> {
        self.spent.checked_abs()
    }

    /// Set the budgeted amount, moving the balance by the same delta
    pub fn set_budgeted(&mut self, amount: Money) {
        self.balance = self.balance.saturating_add(amount.saturating_sub(self.budgeted));
        self.budgeted = amount;
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// A group of related categories with its aggregate amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Unique identifier
    pub id: CategoryGroupId,

    /// Group name
    pub name: String,

    pub budgeted: Money,
    pub spent: Money,
    pub balance: Money,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub is_income: bool,

    /// Categories in the ledger's display order
    pub categories: Vec<Category>,
}

impl CategoryGroup {
    /// Create an empty group
    pub fn new(id: impl Into<CategoryGroupId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            budgeted: Money::zero(),
            spent: Money::zero(),
            balance: Money::zero(),
            hidden: false,
            is_income: false,
            categories: Vec::new(),
        }
    }

    /// Append a category and refresh the aggregates
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self.recompute_totals();
        self
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Find a category by ledger id
    pub fn find_category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Find a category by ledger id for modification
    pub fn find_category_mut(&mut self, id: &CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| &c.id == id)
    }

    /// Find a category by name, ignoring case; the first match wins
    pub fn find_category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.is_named(name))
    }

    /// Recompute budgeted/spent/balance from the categories
    pub fn recompute_totals(&mut self) {
        let total = |amount: fn(&Category) -> Money| {
            self.categories
                .iter()
                .fold(Money::zero(), |sum, c| sum.saturating_add(amount(c)))
        };
        self.budgeted = total(|c| c.budgeted);
        self.spent = total(|c| c.spent);
        self.balance = total(|c| c.balance);
    }
}

/// The four category groups the reconciler requires in every month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Fixed costs, copied forward verbatim
    Fixed,
    /// Flexible spending, corrected to actual spend then copied forward
    Flex,
    /// Per-person allowances, copied forward verbatim
    Allowances,
    /// Catch-all that absorbs the remainder of the monthly target
    Other,
}

impl GroupKind {
    /// Get all required groups in validation order
    pub fn all() -> &'static [Self] {
        &[Self::Fixed, Self::Flex, Self::Allowances, Self::Other]
    }

    /// Get the group name as it appears in the ledger
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::Flex => "Flex",
            Self::Allowances => "Allowances",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groceries() -> Category {
        Category::new("cat-1", "Groceries", Money::from_cents(40000), Money::from_cents(-35000))
    }

    #[test]
    fn test_new_category_balance() {
        let category = groceries();
        assert_eq!(category.balance, Money::from_cents(5000));
        assert_eq!(category.spent_magnitude(), Some(Money::from_cents(35000)));
        assert!(!category.carryover);
    }

    #[test]
    fn test_set_budgeted_moves_balance() {
        let mut category = groceries();
        category.balance = Money::from_cents(8000); // 30.00 carried in
        category.set_budgeted(Money::from_cents(35000));
        assert_eq!(category.budgeted, Money::from_cents(35000));
        assert_eq!(category.balance, Money::from_cents(3000));
    }

    #[test]
    fn test_names_match_case_insensitively() {
        let group = CategoryGroup::new("grp-1", "FLEX").with_category(groceries());
        assert!(group.is_named("flex"));
        assert!(group.find_category_by_name("GROCERIES").is_some());
        assert!(group.find_category_by_name("Dining").is_none());
    }

    #[test]
    fn test_group_totals() {
        let group = CategoryGroup::new("grp-1", "Flex")
            .with_category(groceries())
            .with_category(Category::new(
                "cat-2",
                "Fuel",
                Money::from_cents(10000),
                Money::from_cents(-12000),
            ));
        assert_eq!(group.budgeted, Money::from_cents(50000));
        assert_eq!(group.spent, Money::from_cents(-47000));
        assert_eq!(group.balance, Money::from_cents(3000));
        assert_eq!(
            group.find_category(&CategoryId::from("cat-2")).map(|c| c.name.as_str()),
            Some("Fuel")
        );
    }

    #[test]
    fn test_group_kinds() {
        let names: Vec<&str> = GroupKind::all().iter().map(|k| k.name()).collect();
        assert_eq!(names, ["Fixed", "Flex", "Allowances", "Other"]);
    }
}
