//! Alert partials for displaying error messages to users.
//!
//! Alerts are rendered into the page's alert container by htmx via the
//! `hx-target-error` attribute on forms and buttons.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An error alert with a message and supporting details.
pub struct Alert<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert.
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    /// Render the alert as HTML.
    pub fn into_html(self) -> Markup {
        html!(
            div
                class="flex items-start p-4 mb-4 text-red-800 rounded-lg
                    bg-red-50 border border-red-300 shadow
                    dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
                role="alert"
            {
                div class="text-sm"
                {
                    span class="font-semibold" { (self.message) }

                    @if !self.details.is_empty() {
                        p { (self.details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto -mx-1.5 -my-1.5 text-red-500 rounded-lg
                        p-1.5 hover:bg-red-200 inline-flex items-center
                        justify-center h-8 w-8 dark:text-red-400
                        dark:hover:bg-gray-700"
                    aria-label="Close"
                    onclick="this.parentElement.remove()"
                {
                    "✕"
                }
            }
        )
    }

    /// Convert the alert into an HTML response with the given status code.
    pub fn into_response(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}
