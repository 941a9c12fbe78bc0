//! Wire format for budget months
//!
//! The ledger reports months as loosely-shaped JSON: camelCase at the top,
//! snake_case inside groups, optional amounts, and extra fields we do not use.
//! The raw structs here accept that shape; [`parse_budget_month`] turns it
//! into a validated [`BudgetMonth`] so nothing past this module sees loose data.

use serde::Deserialize;

use crate::error::{FafoError, FafoResult};
use crate::models::{BudgetMonth, Category, CategoryGroup, Money, MonthKey};

/// Response wrapper used by the ledger's HTTP bridge
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBudgetMonth {
    pub month: String,
    #[serde(default)]
    pub category_groups: Vec<RawCategoryGroup>,
}

#[derive(Debug, Deserialize)]
pub struct RawCategoryGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub budgeted: Option<i64>,
    #[serde(default)]
    pub spent: Option<i64>,
    #[serde(default)]
    pub balance: Option<i64>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, alias = "isIncome")]
    pub is_income: bool,
    #[serde(default)]
    pub categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
pub struct RawCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub budgeted: Option<i64>,
    #[serde(default)]
    pub spent: Option<i64>,
    #[serde(default)]
    pub balance: Option<i64>,
    #[serde(default)]
    pub carryover: Option<bool>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, alias = "isIncome")]
    pub is_income: bool,
}

fn cents(value: Option<i64>) -> Money {
    Money::from_cents(value.unwrap_or(0))
}

/// Validate a raw month against the month that was requested
pub fn parse_budget_month(raw: RawBudgetMonth, expected: MonthKey) -> FafoResult<BudgetMonth> {
    let month = MonthKey::parse(&raw.month)
        .map_err(|e| FafoError::Validation(format!("Ledger returned {}", e)))?;
    if month != expected {
        return Err(FafoError::Validation(format!(
            "Ledger returned month {} when {} was requested",
            month, expected
        )));
    }

    let mut groups = Vec::with_capacity(raw.category_groups.len());
    for raw_group in raw.category_groups {
        if raw_group.id.trim().is_empty() {
            return Err(FafoError::Validation(format!(
                "Category group \"{}\" has an empty id",
                raw_group.name
            )));
        }

        let mut categories = Vec::with_capacity(raw_group.categories.len());
        for raw_cat in raw_group.categories {
            if raw_cat.id.trim().is_empty() {
                return Err(FafoError::Validation(format!(
                    "Category \"{}\" in group \"{}\" has an empty id",
                    raw_cat.name, raw_group.name
                )));
            }
            categories.push(Category {
                id: raw_cat.id.into(),
                name: raw_cat.name,
                budgeted: cents(raw_cat.budgeted),
                spent: cents(raw_cat.spent),
                balance: cents(raw_cat.balance),
                carryover: raw_cat.carryover.unwrap_or(false),
                hidden: raw_cat.hidden,
                is_income: raw_cat.is_income,
            });
        }

        groups.push(CategoryGroup {
            id: raw_group.id.into(),
            name: raw_group.name,
            budgeted: cents(raw_group.budgeted),
            spent: cents(raw_group.spent),
            balance: cents(raw_group.balance),
            hidden: raw_group.hidden,
            is_income: raw_group.is_income,
            categories,
        });
    }

    Ok(BudgetMonth::new(month, groups))
}

/// Parse a JSON month body as returned by the HTTP bridge
pub fn parse_month_response(body: &str, expected: MonthKey) -> FafoResult<BudgetMonth> {
    let envelope: DataEnvelope<RawBudgetMonth> = serde_json::from_str(body)?;
    parse_budget_month(envelope.data, expected)
}
