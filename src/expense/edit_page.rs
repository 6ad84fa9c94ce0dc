//! The page for editing an existing expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    expense::{
        core::{Expense, get_expense},
        domain::ExpenseId,
        form::{ExpenseFormDefaults, expense_form_fields},
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    not_found::get_404_not_found_response,
};

/// The state needed for the edit expense page.
#[derive(Debug, Clone)]
pub struct EditExpensePageState {
    /// The database connection for looking up the expense.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EditPageQuery {
    /// Where to send the user after a successful update, typically the
    /// dashboard URL including the active filters.
    redirect_url: Option<String>,
}

/// Renders the page for editing an expense, pre-populated with the stored
/// values. Responds with the 404 page if the expense does not exist.
pub async fn get_edit_expense_page(
    State(state): State<EditExpensePageState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query_params): Query<EditPageQuery>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let expense = match get_expense(expense_id, &connection) {
        Ok(expense) => expense,
        Err(Error::NotFound) => {
            return get_404_not_found_response();
        }
        Err(error) => {
            tracing::error!("Failed to retrieve expense {expense_id}: {error}");
            return error.into_response();
        }
    };

    let update_url = build_update_url(expense_id, query_params.redirect_url.as_deref());

    edit_expense_view(NavBar::new(endpoints::DASHBOARD_VIEW), &expense, &update_url)
        .into_response()
}

/// Build the PUT URL for the edit form, carrying the redirect URL through as
/// a query parameter when one was supplied.
fn build_update_url(expense_id: ExpenseId, redirect_url: Option<&str>) -> String {
    let endpoint = format_endpoint(endpoints::EXPENSE, expense_id);

    match redirect_url {
        Some(redirect_url) => {
            let query = serde_urlencoded::to_string([("redirect_url", redirect_url)])
                .unwrap_or_default();
            format!("{endpoint}?{query}")
        }
        None => endpoint,
    }
}

fn edit_expense_view(nav_bar: NavBar<'_>, expense: &Expense, update_url: &str) -> Markup {
    let nav_bar = nav_bar.into_html();
    let fields = expense_form_fields(&ExpenseFormDefaults {
        tx_date: expense.tx_date,
        category: expense.category,
        description: Some(&expense.description),
        amount: Some(expense.amount),
        payment_method: expense.payment_method,
        autofocus_amount: false,
    });

    let content = html!(
        (nav_bar)

        main class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Expense #" (expense.id) }

            form
                hx-put=(update_url)
                hx-target-error="#alert-container"
                class="w-full space-y-4"
            {
                (fields)

                button
                    type="submit"
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    "Update"
                }
            }
        }
    );

    base("Edit Expense", &[], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::{Path, Query, State},
        http::StatusCode,
        response::Response,
    };
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{Category, Expense, PaymentMethod, create_expense},
    };

    use super::{EditExpensePageState, EditPageQuery, build_update_url, get_edit_expense_page};

    fn get_test_state() -> EditExpensePageState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        EditExpensePageState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn prepopulates_form_with_stored_values() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                Expense::build(250.0, date!(2024 - 04 - 02), Category::Utilities)
                    .description("electricity bill")
                    .payment_method(PaymentMethod::NetBanking),
                &connection,
            )
            .unwrap();
        }

        let response = get_edit_expense_page(
            State(state),
            Path(1),
            Query(EditPageQuery { redirect_url: None }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;

        assert_input_value(&html, "amount", "250.00");
        assert_input_value(&html, "tx_date", "2024-04-02");
        assert_input_value(&html, "description", "electricity bill");
        assert_selected_option(&html, "category", "Utilities");
        assert_selected_option(&html, "payment_method", "NetBanking");
    }

    #[tokio::test]
    async fn missing_expense_renders_404() {
        let state = get_test_state();

        let response = get_edit_expense_page(
            State(state),
            Path(42),
            Query(EditPageQuery { redirect_url: None }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn update_url_includes_encoded_redirect() {
        let url = build_update_url(3, Some("/dashboard?category=Food&start_date=2024-01-01"));

        assert_eq!(
            url,
            "/api/expenses/3?redirect_url=%2Fdashboard%3Fcategory%3DFood%26start_date%3D2024-01-01"
        );
    }

    #[test]
    fn update_url_omits_missing_redirect() {
        assert_eq!(build_update_url(3, None), "/api/expenses/3");
    }

    #[track_caller]
    fn assert_input_value(html: &Html, name: &str, expected: &str) {
        let selector = Selector::parse(&format!("input[name={name}]")).unwrap();
        let value = html
            .select(&selector)
            .next()
            .unwrap_or_else(|| panic!("no input named {name}"))
            .value()
            .attr("value");
        assert_eq!(value, Some(expected), "input {name} should hold {expected}");
    }

    #[track_caller]
    fn assert_selected_option(html: &Html, name: &str, expected: &str) {
        let selector = Selector::parse(&format!("select[name={name}] option[selected]")).unwrap();
        let value = html
            .select(&selector)
            .next()
            .unwrap_or_else(|| panic!("no selected option in {name}"))
            .value()
            .attr("value");
        assert_eq!(value, Some(expected), "select {name} should pre-select {expected}");
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }
}
