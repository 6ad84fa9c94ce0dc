//! The page for recording a new expense.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    expense::{
        domain::{Category, PaymentMethod},
        form::{ExpenseFormDefaults, expense_form_fields},
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::get_local_offset,
};

/// The state needed for the new expense page.
#[derive(Debug, Clone)]
pub struct NewExpensePageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for recording an expense.
pub async fn get_new_expense_page(State(state): State<NewExpensePageState>) -> Response {
    let local_timezone = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => return Error::InvalidTimezone(state.local_timezone).into_response(),
    };

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();
    let defaults = ExpenseFormDefaults {
        tx_date: today,
        category: Category::ALL[0],
        description: None,
        amount: None,
        payment_method: PaymentMethod::Upi,
        autofocus_amount: true,
    };

    new_expense_view(NavBar::new(endpoints::NEW_EXPENSE_VIEW), &defaults).into_response()
}

fn new_expense_view(nav_bar: NavBar<'_>, defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let nav_bar = nav_bar.into_html();
    let fields = expense_form_fields(defaults);

    let content = html!(
        (nav_bar)

        main class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Add Expense" }

            form
                hx-post=(endpoints::EXPENSES_API)
                hx-target-error="#alert-container"
                class="w-full space-y-4"
            {
                (fields)

                button
                    type="submit"
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    "Add"
                }
            }
        }
    );

    base("Add Expense", &[], &content)
}
