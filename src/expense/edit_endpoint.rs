//! Defines the endpoint for updating an existing expense.

use std::sync::{Arc, Mutex};

use axum::{
    debug_handler,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    expense::{
        core::{Expense, update_expense},
        create_endpoint::ExpenseForm,
        domain::ExpenseId,
    },
};

/// The state needed to update an expense.
#[derive(Debug, Clone)]
pub struct UpdateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    redirect_url: Option<String>,
}

/// A route handler that replaces every mutable field of an expense.
///
/// Responds with a 404 alert when the expense does not exist, and rejects a
/// non-positive amount the same way the create endpoint does. On success the
/// client is redirected to `redirect_url` (the filtered dashboard) so it
/// re-queries with fresh data.
#[debug_handler]
pub async fn update_expense_endpoint(
    State(state): State<UpdateExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query_params): Query<QueryParams>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    if form.amount <= 0.0 {
        tracing::warn!(
            "Rejected update of expense {expense_id} with non-positive amount {}",
            form.amount
        );

        return Error::NonPositiveAmount(form.amount).into_alert_response();
    }

    let replacement = Expense::build(form.amount, form.tx_date, form.category)
        .description(form.description.trim())
        .payment_method(form.payment_method);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = update_expense(expense_id, replacement, &connection) {
        tracing::error!("could not update expense {expense_id}: {error}");

        return error.into_alert_response();
    }

    let redirect_url = query_params
        .redirect_url
        .unwrap_or(endpoints::DASHBOARD_VIEW.to_owned());

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::{HeaderValue, StatusCode},
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{Category, Expense, PaymentMethod, create_expense, get_expense},
    };

    use super::{ExpenseForm, QueryParams, UpdateExpenseState, update_expense_endpoint};

    fn get_test_state() -> UpdateExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        UpdateExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn create_test_expense(state: &UpdateExpenseState) {
        let connection = state.db_connection.lock().unwrap();
        create_expense(
            Expense::build(1.23, date!(2024 - 01 - 05), Category::Food).description("before"),
            &connection,
        )
        .expect("could not create test expense");
    }

    #[tokio::test]
    async fn can_update_expense() {
        let state = get_test_state();
        create_test_expense(&state);
        let want = Expense {
            id: 1,
            tx_date: date!(2024 - 02 - 10),
            category: Category::Entertainment,
            description: "cinema".to_owned(),
            amount: 3.21,
            payment_method: PaymentMethod::Card,
        };
        let form = ExpenseForm {
            tx_date: want.tx_date,
            category: want.category,
            description: want.description.clone(),
            amount: want.amount,
            payment_method: want.payment_method,
        };
        let redirect_url = "/dashboard?category=Food".to_owned();

        let response = update_expense_endpoint(
            State(state.clone()),
            Path(want.id),
            Query(QueryParams {
                redirect_url: Some(redirect_url.clone()),
            }),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT),
            Some(&HeaderValue::from_str(&redirect_url).unwrap())
        );
        let connection = state.db_connection.lock().unwrap();
        let got = get_expense(want.id, &connection).expect("could not get updated expense");
        assert_eq!(want, got);
    }

    #[tokio::test]
    async fn missing_expense_responds_not_found() {
        let state = get_test_state();

        let response = update_expense_endpoint(
            State(state),
            Path(42),
            Query(QueryParams { redirect_url: None }),
            Form(ExpenseForm {
                tx_date: date!(2024 - 01 - 01),
                category: Category::Food,
                description: String::new(),
                amount: 1.0,
                payment_method: PaymentMethod::Cash,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_non_positive_amount_and_leaves_record_unchanged() {
        let state = get_test_state();
        create_test_expense(&state);

        let response = update_expense_endpoint(
            State(state.clone()),
            Path(1),
            Query(QueryParams { redirect_url: None }),
            Form(ExpenseForm {
                tx_date: date!(2024 - 06 - 06),
                category: Category::Rent,
                description: "after".to_owned(),
                amount: 0.0,
                payment_method: PaymentMethod::Cash,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let connection = state.db_connection.lock().unwrap();
        let got = get_expense(1, &connection).unwrap();
        assert_eq!(got.description, "before");
        assert_eq!(got.amount, 1.23);
    }
}
