//! Defines the endpoint for recording a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    expense::{
        core::{Expense, create_expense},
        domain::{Category, PaymentMethod},
    },
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating or updating an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// The date when the money was spent.
    pub tx_date: Date,
    /// The spending category.
    pub category: Category,
    /// Text detailing the expense. May be empty.
    #[serde(default)]
    pub description: String,
    /// The value of the expense in rupees.
    pub amount: f64,
    /// How the expense was paid.
    pub payment_method: PaymentMethod,
}

/// A route handler for recording a new expense, redirects to the dashboard on
/// success so the page re-queries with fresh data.
///
/// An amount of zero or less is rejected with an alert before the storage
/// layer is called.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    if form.amount <= 0.0 {
        tracing::warn!("Rejected expense with non-positive amount {}", form.amount);

        return Error::NonPositiveAmount(form.amount).into_alert_response();
    }

    let expense = Expense::build(form.amount, form.tx_date, form.category)
        .description(form.description.trim())
        .payment_method(form.payment_method);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_expense(expense, &connection) {
        tracing::error!("could not create expense: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response, http::StatusCode};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{Category, PaymentMethod, count_expenses, get_expense},
    };

    use super::{CreateExpenseState, ExpenseForm, create_expense_endpoint};

    fn get_test_state() -> CreateExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn test_form(amount: f64) -> ExpenseForm {
        ExpenseForm {
            tx_date: date!(2024 - 01 - 05),
            category: Category::Food,
            description: "test expense".to_string(),
            amount,
            payment_method: PaymentMethod::Upi,
        }
    }

    #[tokio::test]
    async fn can_create_expense() {
        let state = get_test_state();

        let response = create_expense_endpoint(State(state.clone()), Form(test_form(12.3))).await;

        assert_redirects_to_dashboard(response);

        // The first expense will have ID 1
        let connection = state.db_connection.lock().unwrap();
        let expense = get_expense(1, &connection).unwrap();
        assert_eq!(expense.amount, 12.3);
        assert_eq!(expense.description, "test expense");
        assert_eq!(expense.category, Category::Food);
        assert_eq!(expense.payment_method, PaymentMethod::Upi);
    }

    #[tokio::test]
    async fn trims_description() {
        let state = get_test_state();
        let mut form = test_form(5.0);
        form.description = "  chai  ".to_string();

        create_expense_endpoint(State(state.clone()), Form(form)).await;

        let connection = state.db_connection.lock().unwrap();
        let expense = get_expense(1, &connection).unwrap();
        assert_eq!(expense.description, "chai");
    }

    #[tokio::test]
    async fn rejects_zero_amount_before_storage() {
        let state = get_test_state();

        let response = create_expense_endpoint(State(state.clone()), Form(test_form(0.0))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_negative_amount_before_storage() {
        let state = get_test_state();

        let response = create_expense_endpoint(State(state.clone()), Form(test_form(-10.0))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 0);
    }

    #[track_caller]
    fn assert_redirects_to_dashboard(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/dashboard",
            "got redirect to {location:?}, want redirect to /dashboard"
        );
    }
}
