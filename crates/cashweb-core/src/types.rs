//! Basic types for the core module

use serde::{Deserialize, Serialize};

use crate::labels;

/// Transaction type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// Transaction category
///
/// Unrecognized keys are kept verbatim so that two different unknown keys
/// still form two groups in the category report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Salary,
    Investment,
    Gift,
    Food,
    Transport,
    Bills,
    Shopping,
    OtherIncome,
    OtherExpense,
    Other(String),
}

impl Category {
    pub fn from_key(key: &str) -> Self {
        match key {
            "salary" => Category::Salary,
            "investment" => Category::Investment,
            "gift" => Category::Gift,
            "food" => Category::Food,
            "transport" => Category::Transport,
            "bills" => Category::Bills,
            "shopping" => Category::Shopping,
            "other-income" => Category::OtherIncome,
            "other-expense" => Category::OtherExpense,
            other => Category::Other(other.to_string()),
        }
    }

    /// Stored key
    pub fn key(&self) -> &str {
        match self {
            Category::Salary => "salary",
            Category::Investment => "investment",
            Category::Gift => "gift",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Bills => "bills",
            Category::Shopping => "shopping",
            Category::OtherIncome => "other-income",
            Category::OtherExpense => "other-expense",
            Category::Other(key) => key,
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        labels::category_label(self.key())
    }
}

impl From<String> for Category {
    fn from(key: String) -> Self {
        Category::from_key(&key)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.key().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Which category of the summary a balance belongs to, for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceTone {
    Income,
    Expense,
}

impl BalanceTone {
    pub fn of(balance: f64) -> Self {
        if balance >= 0.0 {
            BalanceTone::Income
        } else {
            BalanceTone::Expense
        }
    }
}
