//! Defines the core data model and database queries for expenses.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    expense::domain::{Category, ExpenseId, PaymentMethod},
};

// ============================================================================
// MODELS
// ============================================================================

/// A single expense, i.e. an event where money was spent.
///
/// To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// When the money was spent.
    pub tx_date: Date,
    /// The spending category the expense belongs to.
    pub category: Category,
    /// A text description of what the expense was for. May be empty.
    pub description: String,
    /// The amount of money spent. Always greater than zero at entry time.
    pub amount: f64,
    /// How the expense was paid.
    pub payment_method: PaymentMethod,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(amount: f64, tx_date: Date, category: Category) -> ExpenseBuilder {
        ExpenseBuilder {
            amount,
            tx_date,
            category,
            description: String::new(),
            payment_method: PaymentMethod::Cash,
        }
    }
}

/// A builder holding the mutable fields of an [Expense].
///
/// Used both to create new expenses and as the replacement value for
/// [update_expense], which overwrites every field except the ID.
#[derive(Debug, PartialEq, Clone)]
pub struct ExpenseBuilder {
    /// The amount of money spent.
    pub amount: f64,
    /// The date the money was spent, not the date of entry.
    pub tx_date: Date,
    /// The spending category.
    pub category: Category,
    /// Free-text description. Defaults to the empty string.
    pub description: String,
    /// How the expense was paid. Defaults to cash.
    pub payment_method: PaymentMethod,
}

impl ExpenseBuilder {
    /// Set the description for the expense.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the payment method for the expense.
    pub fn payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = payment_method;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database from a builder.
///
/// The insert commits immediately. The returned expense carries the freshly
/// assigned ID.
///
/// # Errors
/// This function will return an [Error::SqlError] if the write fails.
pub fn create_expense(builder: ExpenseBuilder, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expenses (tx_date, category, description, amount, payment_method)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, tx_date, category, description, amount, payment_method",
        )?
        .query_row(
            (
                builder.tx_date,
                builder.category.as_str(),
                builder.description,
                builder.amount,
                builder.payment_method.as_str(),
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "SELECT id, tx_date, category, description, amount, payment_method
             FROM expenses WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Replace every mutable field of the expense with the given `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    replacement: ExpenseBuilder,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE expenses
         SET tx_date = ?1, category = ?2, description = ?3, amount = ?4, payment_method = ?5
         WHERE id = ?6",
        params![
            replacement.tx_date,
            replacement.category.as_str(),
            replacement.description,
            replacement.amount,
            replacement.payment_method.as_str(),
            id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingExpense);
    }

    Ok(())
}

/// Delete the expense with the given `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expenses WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expenses;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expenses table in the database.
///
/// The category and payment method columns carry CHECK constraints so that
/// writes outside the app cannot introduce values the UI does not know.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tx_date TEXT NOT NULL,
                category TEXT NOT NULL CHECK (category IN (
                    'Food', 'Transport', 'Rent', 'Utilities', 'Shopping',
                    'Health', 'Education', 'Entertainment', 'Other')),
                description TEXT,
                amount REAL NOT NULL,
                payment_method TEXT NOT NULL CHECK (payment_method IN (
                    'Cash', 'UPI', 'Card', 'NetBanking', 'Other'))
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expenses', 0)",
        (),
    )?;

    // Composite index used by the dashboard's filtered listing.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_tx_date_category
         ON expenses(tx_date, category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
///
/// Enum columns are read leniently: values outside the allowed sets fall back
/// to the first variant instead of failing the read, and a NULL description
/// is read as the empty string.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let tx_date = row.get(1)?;
    let category: String = row.get(2)?;
    let description: Option<String> = row.get(3)?;
    let amount = row.get(4)?;
    let payment_method: String = row.get(5)?;

    Ok(Expense {
        id,
        tx_date,
        category: Category::from_stored(&category),
        description: description.unwrap_or_default(),
        amount,
        payment_method: PaymentMethod::from_stored(&payment_method),
    })
}

// ============================================================================
// TESTS
// ============================================================================
