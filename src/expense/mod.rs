//! Expense management for the tracker.
//!
//! This module contains everything related to expense records:
//! - The `Expense` model and `ExpenseBuilder` for creating expenses
//! - Database functions for storing, querying, updating, and deleting expenses
//! - View handlers for the expense entry and edit pages

mod core;
mod create_endpoint;
mod delete_endpoint;
mod domain;
mod edit_endpoint;
mod edit_page;
mod form;
mod new_expense_page;
mod query;

pub use core::{
    Expense, ExpenseBuilder, create_expense, create_expense_table, delete_expense, get_expense,
    map_expense_row, update_expense,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use domain::{Category, ExpenseId, PaymentMethod};
pub use edit_endpoint::update_expense_endpoint;
pub use edit_page::get_edit_expense_page;
pub use new_expense_page::get_new_expense_page;
pub use query::{ExpenseFilter, list_expenses};

#[cfg(test)]
pub use core::count_expenses;
