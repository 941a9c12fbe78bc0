//! Core data models for the reconciler
//!
//! This module contains the data structures that represent the ledger's
//! budgeting domain: months, category groups, categories and amounts.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod month;

pub use budget::BudgetMonth;
pub use category::{Category, CategoryGroup, GroupKind};
pub use ids::{CategoryGroupId, CategoryId};
pub use money::Money;
pub use month::{MonthKey, MonthParseError};
