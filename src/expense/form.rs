use maud::{Markup, html};
use time::Date;

use crate::{
    expense::domain::{Category, PaymentMethod},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The values an expense form is pre-populated with.
///
/// The new-expense page fills these with defaults (today's date, UPI); the
/// edit page fills them from the stored record.
pub(super) struct ExpenseFormDefaults<'a> {
    pub tx_date: Date,
    pub category: Category,
    pub description: Option<&'a str>,
    pub amount: Option<f64>,
    pub payment_method: PaymentMethod,
    pub autofocus_amount: bool,
}

pub(super) fn expense_form_fields(defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));
    let amount_placeholder = amount_str.as_deref().unwrap_or("0.01");

    html! {
        div
        {
            label
                for="tx_date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="tx_date"
                id="tx_date"
                type="date"
                value=(defaults.tx_date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in Category::ALL {
                    @if category == defaults.category {
                        option value=(category.as_str()) selected { (category.as_str()) }
                    } @else {
                        option value=(category.as_str()) { (category.as_str()) }
                    }
                }
            }
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description (optional)"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                placeholder=(amount_placeholder)
                min="0.01"
                required
                value=[amount_str.as_deref()]
                autofocus[defaults.autofocus_amount]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="payment_method"
                class=(FORM_LABEL_STYLE)
            {
                "Payment Method"
            }

            select
                name="payment_method"
                id="payment_method"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for method in PaymentMethod::ALL {
                    @if method == defaults.payment_method {
                        option value=(method.as_str()) selected { (method.as_str()) }
                    } @else {
                        option value=(method.as_str()) { (method.as_str()) }
                    }
                }
            }
        }
    }
}
