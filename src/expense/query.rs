//! The filtered listing query that backs the dashboard.

use rusqlite::{Connection, params_from_iter};
use time::Date;

use crate::{Error, expense::domain::Category};

use super::core::{Expense, map_expense_row};

/// The conjunction of optional constraints applied when listing expenses.
///
/// Each field that is `None` is omitted from the SQL predicate entirely,
/// rather than being rewritten as an always-true comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Earliest transaction date to include (inclusive).
    pub start_date: Option<Date>,
    /// Latest transaction date to include (inclusive).
    pub end_date: Option<Date>,
    /// Only include expenses in this category. `None` means all categories.
    pub category: Option<Category>,
}

/// List the expenses matching every constraint in `filter`.
///
/// Results are ordered by transaction date descending, then ID descending, so
/// the most recent spending (and within a day, the most recently entered)
/// comes first. An empty result is `Ok(vec![])`, never an error.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Expense row mapping fails
pub fn list_expenses(filter: &ExpenseFilter, connection: &Connection) -> Result<Vec<Expense>, Error> {
    let mut clauses = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(start_date) = filter.start_date {
        clauses.push("tx_date >= ?");
        params.push(start_date.to_string());
    }

    if let Some(end_date) = filter.end_date {
        clauses.push("tx_date <= ?");
        params.push(end_date.to_string());
    }

    if let Some(category) = filter.category {
        clauses.push("category = ?");
        params.push(category.as_str().to_owned());
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let query = format!(
        "SELECT id, tx_date, category, description, amount, payment_method \
         FROM expenses{where_clause} \
         ORDER BY tx_date DESC, id DESC"
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(params), map_expense_row)?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{Category, Expense, create_expense},
    };

    use super::{ExpenseFilter, list_expenses};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn unfiltered_list_returns_everything_most_recent_first() {
        let conn = get_test_connection();
        create_expense(Expense::build(1.0, date!(2024 - 01 - 01), Category::Food), &conn).unwrap();
        create_expense(Expense::build(2.0, date!(2024 - 03 - 01), Category::Rent), &conn).unwrap();
        create_expense(Expense::build(3.0, date!(2024 - 02 - 01), Category::Food), &conn).unwrap();

        let got = list_expenses(&ExpenseFilter::default(), &conn).unwrap();

        let dates: Vec<_> = got.iter().map(|expense| expense.tx_date).collect();
        assert_eq!(
            dates,
            vec![date!(2024 - 03 - 01), date!(2024 - 02 - 01), date!(2024 - 01 - 01)]
        );
    }

    #[test]
    fn same_day_expenses_order_by_id_descending() {
        let conn = get_test_connection();
        let day = date!(2024 - 01 - 15);
        for i in 1..=3 {
            create_expense(Expense::build(i as f64, day, Category::Food), &conn).unwrap();
        }

        let got = list_expenses(&ExpenseFilter::default(), &conn).unwrap();

        let ids: Vec<_> = got.iter().map(|expense| expense.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let conn = get_test_connection();
        let start = date!(2024 - 01 - 01);
        let end = date!(2024 - 01 - 31);
        create_expense(Expense::build(1.0, start, Category::Food), &conn).unwrap();
        create_expense(Expense::build(2.0, end, Category::Food), &conn).unwrap();
        create_expense(Expense::build(3.0, date!(2023 - 12 - 31), Category::Food), &conn).unwrap();
        create_expense(Expense::build(4.0, date!(2024 - 02 - 01), Category::Food), &conn).unwrap();

        let filter = ExpenseFilter {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        };
        let got = list_expenses(&filter, &conn).unwrap();

        assert_eq!(got.len(), 2, "got expenses: {got:#?}");
        let total: f64 = got.iter().map(|expense| expense.amount).sum();
        assert_eq!(total, 3.0); // 1 + 2
    }

    #[test]
    fn omitting_a_bound_removes_it_entirely() {
        let conn = get_test_connection();
        create_expense(Expense::build(1.0, date!(2020 - 01 - 01), Category::Food), &conn).unwrap();
        create_expense(Expense::build(2.0, date!(2024 - 06 - 15), Category::Food), &conn).unwrap();

        let only_end = ExpenseFilter {
            end_date: Some(date!(2024 - 01 - 01)),
            ..Default::default()
        };
        let got = list_expenses(&only_end, &conn).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].tx_date, date!(2020 - 01 - 01));

        let only_start = ExpenseFilter {
            start_date: Some(date!(2024 - 01 - 01)),
            ..Default::default()
        };
        let got = list_expenses(&only_start, &conn).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].tx_date, date!(2024 - 06 - 15));
    }

    #[test]
    fn category_filter_matches_exactly() {
        let conn = get_test_connection();
        let day = date!(2024 - 01 - 15);
        create_expense(Expense::build(1.0, day, Category::Food), &conn).unwrap();
        create_expense(Expense::build(2.0, day, Category::Transport), &conn).unwrap();
        create_expense(Expense::build(3.0, day, Category::Food), &conn).unwrap();

        let filter = ExpenseFilter {
            category: Some(Category::Food),
            ..Default::default()
        };
        let got = list_expenses(&filter, &conn).unwrap();

        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|expense| expense.category == Category::Food));
    }

    #[test]
    fn combined_filters_are_a_conjunction() {
        let conn = get_test_connection();
        create_expense(Expense::build(100.0, date!(2024 - 01 - 05), Category::Food), &conn)
            .unwrap();
        create_expense(Expense::build(50.0, date!(2024 - 01 - 20), Category::Transport), &conn)
            .unwrap();
        create_expense(Expense::build(25.0, date!(2024 - 02 - 01), Category::Food), &conn)
            .unwrap();

        let filter = ExpenseFilter {
            start_date: Some(date!(2024 - 01 - 01)),
            end_date: Some(date!(2024 - 01 - 31)),
            category: Some(Category::Food),
        };
        let got = list_expenses(&filter, &conn).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].amount, 100.0);
    }

    #[test]
    fn january_range_returns_two_records_totaling_150() {
        let conn = get_test_connection();
        create_expense(Expense::build(100.0, date!(2024 - 01 - 05), Category::Food), &conn)
            .unwrap();
        create_expense(Expense::build(50.0, date!(2024 - 01 - 20), Category::Transport), &conn)
            .unwrap();
        create_expense(Expense::build(25.0, date!(2024 - 02 - 01), Category::Food), &conn)
            .unwrap();

        let filter = ExpenseFilter {
            start_date: Some(date!(2024 - 01 - 01)),
            end_date: Some(date!(2024 - 01 - 31)),
            ..Default::default()
        };
        let got = list_expenses(&filter, &conn).unwrap();

        assert_eq!(got.len(), 2);
        let total: f64 = got.iter().map(|expense| expense.amount).sum();
        assert_eq!(total, 150.0);
    }

    #[test]
    fn no_matches_returns_empty_vec() {
        let conn = get_test_connection();
        create_expense(Expense::build(1.0, date!(2024 - 01 - 01), Category::Food), &conn).unwrap();

        let filter = ExpenseFilter {
            category: Some(Category::Entertainment),
            ..Default::default()
        };
        let got = list_expenses(&filter, &conn).unwrap();

        assert!(got.is_empty());
    }
}
