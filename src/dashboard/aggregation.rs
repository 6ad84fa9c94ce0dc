//! Expense aggregation for summary cards, charts, and tables.
//!
//! These are pure functions of the expense list returned by the storage
//! layer; they perform no I/O.

use std::collections::HashMap;

use time::{Date, Month};

use crate::expense::{Category, Expense};

/// Sums the amounts of all expenses. Returns 0 for an empty set.
pub(super) fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Sums expense amounts per category.
///
/// # Returns
/// Vector of (category, total) pairs sorted by total descending. Ties are
/// broken by category name ascending so the output is deterministic.
/// Categories with no expenses do not appear.
pub(super) fn totals_by_category(expenses: &[Expense]) -> Vec<(Category, f64)> {
    let mut totals: HashMap<Category, f64> = HashMap::new();

    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    let mut sorted: Vec<_> = totals.into_iter().collect();
    sorted.sort_by(|(category_a, total_a), (category_b, total_b)| {
        total_b
            .total_cmp(total_a)
            .then(category_a.as_str().cmp(category_b.as_str()))
    });

    sorted
}

/// Sums expense amounts per calendar month.
///
/// # Returns
/// Vector of (month, total) pairs in chronological order, where each month is
/// represented by its first day. Months with no expenses are absent, not
/// zero.
pub(super) fn totals_by_month(expenses: &[Expense]) -> Vec<(Date, f64)> {
    let mut totals: HashMap<Date, f64> = HashMap::new();

    for expense in expenses {
        let month = expense.tx_date.replace_day(1).unwrap();
        *totals.entry(month).or_insert(0.0) += expense.amount;
    }

    let mut sorted: Vec<_> = totals.into_iter().collect();
    sorted.sort_by_key(|(month, _)| *month);

    sorted
}

/// Formats a month-start date as a chart label, e.g. "Jan 2024".
pub(super) fn month_label(month: Date) -> String {
    let name = match month.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };

    format!("{} {}", name, month.year())
}
