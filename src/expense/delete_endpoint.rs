//! Defines the endpoint for deleting an expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    expense::{core::delete_expense, domain::ExpenseId},
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
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

/// A route handler for deleting an expense.
///
/// Responds with a 404 alert when the expense does not exist. On success the
/// client is redirected back to `redirect_url` (the filtered dashboard) so
/// the summaries and charts re-query without the deleted record.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query_params): Query<QueryParams>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = delete_expense(expense_id, &connection) {
        tracing::error!("could not delete expense {expense_id}: {error}");

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
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        expense::{Category, Expense, count_expenses, create_expense, get_expense},
    };

    use super::{DeleteExpenseState, QueryParams, delete_expense_endpoint};

    fn get_test_state() -> DeleteExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        DeleteExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn deletes_expense_and_redirects() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                Expense::build(1.23, date!(2024 - 01 - 05), Category::Food),
                &connection,
            )
            .unwrap();
        }
        let redirect_url = "/dashboard?start_date=2024-01-01".to_owned();

        let response = delete_expense_endpoint(
            State(state.clone()),
            Path(1),
            Query(QueryParams {
                redirect_url: Some(redirect_url.clone()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT),
            Some(&HeaderValue::from_str(&redirect_url).unwrap())
        );
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_expense(1, &connection), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn missing_expense_responds_not_found_and_leaves_table_unchanged() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                Expense::build(1.23, date!(2024 - 01 - 05), Category::Food),
                &connection,
            )
            .unwrap();
        }

        let response = delete_expense_endpoint(
            State(state.clone()),
            Path(42),
            Query(QueryParams { redirect_url: None }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 1);
    }
}
