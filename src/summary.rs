//! Aggregate views computed from an account's full expense list.
//!
//! These are pure functions over the result of
//! [crate::get_expenses]: the shell re-reads the ledger and
//! recomputes them on every view refresh instead of caching. The budget
//! itself is ephemeral caller state and is never persisted.

use std::collections::HashMap;

use serde::Serialize;
use time::Date;

use crate::{Category, Expense};

/// The summed amount for one spending category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category the expenses were grouped by.
    pub category: Category,
    /// Sum of the amounts of every expense in the category.
    pub total: f64,
}

/// The summed amount for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    /// The date the expenses were grouped by.
    pub date: Date,
    /// Sum of the amounts of every expense on that date.
    pub total: f64,
}

/// Sum of the amounts of all `expenses`.
pub fn total_spent(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// How much of `budget` is left after subtracting the total spent.
///
/// Negative when the expenses exceed the budget.
pub fn remaining_budget(budget: f64, expenses: &[Expense]) -> f64 {
    budget - total_spent(expenses)
}

/// Group `expenses` by category and sum the amounts in each group, for
/// bar or pie rendering.
///
/// Only categories that appear in `expenses` are included, in the order
/// of [Category::ALL]. The totals always reconcile: their sum equals
/// [total_spent] over the same input.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<Category, f64> = HashMap::new();

    for expense in expenses {
        *totals.entry(expense.category).or_default() += expense.amount;
    }

    Category::ALL
        .into_iter()
        .filter_map(|category| {
            totals
                .get(&category)
                .map(|&total| CategoryTotal { category, total })
        })
        .collect()
}

/// Group `expenses` by date and sum the amounts for each date, sorted
/// chronologically for line rendering.
pub fn daily_totals(expenses: &[Expense]) -> Vec<DailyTotal> {
    let mut totals: HashMap<Date, f64> = HashMap::new();

    for expense in expenses {
        *totals.entry(expense.date).or_default() += expense.amount;
    }

    let mut series: Vec<DailyTotal> = totals
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect();
    series.sort_by_key(|day| day.date);

    series
}

/// The subset of `expenses` in `category`, order preserved.
pub fn filter_by_category(expenses: &[Expense], category: Category) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| expense.category == category)
        .cloned()
        .collect()
}
