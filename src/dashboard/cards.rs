//! Summary cards for the dashboard: total spend, transaction count, and the
//! top category by spend.

use maud::{Markup, html};

use crate::{expense::Category, html::format_currency};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

const CARD_LABEL_STYLE: &str = "text-sm text-gray-600 dark:text-gray-400 mb-1";

const CARD_VALUE_STYLE: &str = "text-3xl font-bold";

/// Renders the row of summary cards for the filtered expense set.
pub(super) fn summary_cards(
    total_spend: f64,
    transaction_count: usize,
    top_category: Option<Category>,
) -> Markup {
    let top_category_label = match top_category {
        Some(category) => category.as_str(),
        None => "—",
    };

    html! {
        section class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                (summary_card("Total Spend", &format_currency(total_spend)))
                (summary_card("Transactions", &transaction_count.to_string()))
                (summary_card("Top Category", top_category_label))
            }
        }
    }
}

fn summary_card(label: &str, value: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) {
            div class=(CARD_LABEL_STYLE) { (label) }
            div class=(CARD_VALUE_STYLE) { (value) }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::expense::Category;

    use super::summary_cards;

    #[test]
    fn renders_total_count_and_top_category() {
        let html = summary_cards(175.0, 3, Some(Category::Food)).into_string();

        assert!(html.contains("₹175.00"));
        assert!(html.contains(">3<"));
        assert!(html.contains("Food"));
    }

    #[test]
    fn renders_dash_when_no_top_category() {
        let html = summary_cards(0.0, 0, None).into_string();

        assert!(html.contains("—"));
        assert!(html.contains("₹0.00"));
    }
}
