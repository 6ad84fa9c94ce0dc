//! Core expense domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// The closed set of spending categories an expense can belong to.
///
/// Categories are stored as text in the database, but the schema restricts
/// the column to these nine values. Use [Category::from_stored] when reading
/// values that may predate the constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Rent,
    Utilities,
    Shopping,
    Health,
    Education,
    Entertainment,
    Other,
}

impl Category {
    /// Every category, in the order the entry form lists them.
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Transport,
        Category::Rent,
        Category::Utilities,
        Category::Shopping,
        Category::Health,
        Category::Education,
        Category::Entertainment,
        Category::Other,
    ];

    /// The category name as stored in the database and shown in the UI.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }

    /// Parse a category from its stored text representation.
    ///
    /// Rows written before the schema constraint existed (or edited outside
    /// the app) may hold a name that is no longer in the allowed set. Those
    /// fall back to the first category rather than failing the whole read,
    /// mirroring how the entry form treats an unknown selection.
    pub fn from_stored(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
            .unwrap_or(Self::ALL[0])
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The closed set of payment methods an expense can be paid with.
///
/// Stored and read the same way as [Category].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "UPI")]
    Upi,
    Card,
    NetBanking,
    Other,
}

impl PaymentMethod {
    /// Every payment method, in the order the entry form lists them.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Upi,
        PaymentMethod::Card,
        PaymentMethod::NetBanking,
        PaymentMethod::Other,
    ];

    /// The payment method as stored in the database and shown in the UI.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
            PaymentMethod::NetBanking => "NetBanking",
            PaymentMethod::Other => "Other",
        }
    }

    /// Parse a payment method from its stored text representation, falling
    /// back to the first method for values outside the allowed set.
    pub fn from_stored(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == name)
            .unwrap_or(Self::ALL[0])
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
