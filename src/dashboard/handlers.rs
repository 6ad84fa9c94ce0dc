//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - Query parameter normalization for the filter controls
//! - HTML view functions for rendering the dashboard UI

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{total, totals_by_category, totals_by_month},
        cards::summary_cards,
        charts::{DashboardChart, category_chart, charts_script, monthly_chart},
        table::expenses_table,
    },
    endpoints,
    expense::{Category, Expense, ExpenseFilter, list_expenses},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, base, link,
    },
    navigation::NavBar,
};

/// The category filter value meaning "no category filter".
const ALL_CATEGORIES: &str = "All";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The raw filter query parameters submitted by the dashboard's filter form.
///
/// All fields are optional; empty inputs arrive as `None`.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Earliest transaction date to include.
    pub start_date: Option<Date>,
    /// Latest transaction date to include.
    pub end_date: Option<Date>,
    /// Category name, or the "All" sentinel for no filter.
    pub category: Option<String>,
}

impl DashboardQuery {
    /// Normalize the raw query into a storage-layer filter.
    ///
    /// The "All" sentinel, an empty string, and unknown category names all
    /// mean "no category filter".
    fn to_filter(&self) -> ExpenseFilter {
        let category = self
            .category
            .as_deref()
            .filter(|name| !name.is_empty() && *name != ALL_CATEGORIES)
            .and_then(|name| {
                Category::ALL
                    .into_iter()
                    .find(|category| category.as_str() == name)
            });

        ExpenseFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            category,
        }
    }
}

/// The dashboard URL that reproduces `filter`, used so edit and delete round
/// trips land back on the same view.
fn dashboard_url(filter: &ExpenseFilter) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    if let Some(start_date) = filter.start_date {
        pairs.push(("start_date", start_date.to_string()));
    }

    if let Some(end_date) = filter.end_date {
        pairs.push(("end_date", end_date.to_string()));
    }

    if let Some(category) = filter.category {
        pairs.push(("category", category.as_str().to_owned()));
    }

    if pairs.is_empty() {
        return endpoints::DASHBOARD_VIEW.to_owned();
    }

    let query = serde_urlencoded::to_string(pairs).unwrap_or_default();
    format!("{}?{}", endpoints::DASHBOARD_VIEW, query)
}

/// Display the dashboard: filter controls, summary cards, charts, and the
/// expense table for the current filter.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let filter = query.to_filter();

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = list_expenses(&filter, &connection)
        .inspect_err(|error| tracing::error!("could not list expenses: {error}"))?;

    drop(connection);

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if expenses.is_empty() {
        let store_is_empty = filter == ExpenseFilter::default();
        return Ok(dashboard_empty_view(nav_bar, &filter, store_is_empty).into_response());
    }

    Ok(dashboard_view(nav_bar, &filter, &expenses).into_response())
}

/// Renders the dashboard when the current filter matches no expenses.
///
/// Distinguishes an empty store (prompt to add the first expense) from
/// filters that exclude everything.
fn dashboard_empty_view(nav_bar: NavBar<'_>, filter: &ExpenseFilter, store_is_empty: bool) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_expense_link = link(endpoints::NEW_EXPENSE_VIEW, "add your first expense");

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-4"
            {
                (filter_controls(filter))

                div class="flex flex-col items-center px-6 py-8 mx-auto"
                {
                    @if store_is_empty {
                        h2 class="text-xl font-bold" { "Nothing here yet..." }

                        p
                        {
                            "Summaries and charts will show up here once you "
                            (new_expense_link) "."
                        }
                    } @else {
                        p { "No expenses match the current filters." }
                    }
                }
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with cards, charts, and the expense table.
fn dashboard_view(nav_bar: NavBar<'_>, filter: &ExpenseFilter, expenses: &[Expense]) -> Markup {
    let nav_bar = nav_bar.into_html();
    let redirect_url = dashboard_url(filter);

    let category_totals = totals_by_category(expenses);
    let monthly_totals = totals_by_month(expenses);
    let top_category = category_totals.first().map(|(category, _)| *category);

    let charts = [
        DashboardChart {
            id: "category-chart",
            options: category_chart(&category_totals).to_string(),
        },
        DashboardChart {
            id: "monthly-chart",
            options: monthly_chart(&monthly_totals).to_string(),
        },
    ];

    let cards = summary_cards(total(expenses), expenses.len(), top_category);
    let table = expenses_table(expenses, &redirect_url);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-4"
            {
                (filter_controls(filter))

                (cards)

                section
                    id="charts"
                    class="w-full mx-auto mb-4"
                {
                    div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                    {
                        @for chart in &charts {
                            div
                                id=(chart.id)
                                class="min-h-[380px] rounded dark:bg-gray-100"
                            {}
                        }
                    }
                }

                (table)
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}

/// Renders the date range and category filter controls as a GET form, so
/// applying filters is a plain page load with the query in the URL.
fn filter_controls(filter: &ExpenseFilter) -> Markup {
    let start_date = filter.start_date.map(|date| date.to_string());
    let end_date = filter.end_date.map(|date| date.to_string());

    html!(
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="w-full bg-gray-50 dark:bg-gray-800 p-4 rounded-lg
                grid grid-cols-1 sm:grid-cols-4 gap-4 items-end"
        {
            div
            {
                label for="start_date" class=(FORM_LABEL_STYLE) { "Start date" }

                input
                    name="start_date"
                    id="start_date"
                    type="date"
                    value=[start_date.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="end_date" class=(FORM_LABEL_STYLE) { "End date" }

                input
                    name="end_date"
                    id="end_date"
                    type="date"
                    value=[end_date.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    name="category"
                    id="category"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @if filter.category.is_none() {
                        option value=(ALL_CATEGORIES) selected { (ALL_CATEGORIES) }
                    } @else {
                        option value=(ALL_CATEGORIES) { (ALL_CATEGORIES) }
                    }

                    @for category in Category::ALL {
                        @if Some(category) == filter.category {
                            option value=(category.as_str()) selected { (category.as_str()) }
                        } @else {
                            option value=(category.as_str()) { (category.as_str()) }
                        }
                    }
                }
            }

            button
                type="submit"
                class=(BUTTON_PRIMARY_STYLE)
            {
                "Apply"
            }
        }
    )
}
