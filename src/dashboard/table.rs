//! The expense table shown on the dashboard, with edit and delete actions.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints::{self, format_endpoint},
    expense::Expense,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
    },
};

/// The max number of graphemes to display in the expense table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// Renders the table of matching expenses, most recent first.
///
/// `redirect_url` is the dashboard URL including the active filters; the edit
/// and delete actions carry it so the user lands back on the same view.
pub(super) fn expenses_table(expenses: &[Expense], redirect_url: &str) -> Markup {
    html! {
        section class="w-full rounded bg-gray-50 dark:bg-gray-800 overflow-x-auto" {
            table class="w-full my-2 text-sm text-left rtl:text-right
                text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class="px-6 py-3 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Payment" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        (expense_row(expense, redirect_url))
                    }
                }
            }
        }
    }
}

fn expense_row(expense: &Expense, redirect_url: &str) -> Markup {
    let edit_url = format!(
        "{}?{}",
        format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id),
        redirect_query(redirect_url)
    );
    let delete_url = format!(
        "{}?{}",
        format_endpoint(endpoints::EXPENSE, expense.id),
        redirect_query(redirect_url)
    );

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (expense.tx_date) }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
            }

            td class=(TABLE_CELL_STYLE) title=(expense.description)
            {
                (truncate_description(&expense.description))
            }

            td class="px-6 py-4 text-right whitespace-nowrap"
            {
                (format_currency(expense.amount))
            }

            td class=(TABLE_CELL_STYLE) { (expense.payment_method) }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        hx-delete=(delete_url)
                        hx-confirm="Delete this expense?"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

fn redirect_query(redirect_url: &str) -> String {
    serde_urlencoded::to_string([("redirect_url", redirect_url)]).unwrap_or_default()
}

/// Truncate long descriptions so wide text does not stretch the table. The
/// full description stays available in the cell's title attribute.
fn truncate_description(description: &str) -> String {
    let graphemes: Vec<&str> = description.graphemes(true).collect();

    if graphemes.len() <= MAX_DESCRIPTION_GRAPHEMES {
        description.to_owned()
    } else {
        format!("{}…", graphemes[..MAX_DESCRIPTION_GRAPHEMES].concat())
    }
}
