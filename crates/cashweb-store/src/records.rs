//! Raw record shapes as written by the budget app

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One stored transaction, before any interpretation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    /// Effective date, normally "YYYY-MM-DD"
    pub date: String,
    /// "income" or "expense"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransactionRecord {
    pub fn new(date: &str, kind: &str, amount: f64, category: &str) -> Self {
        Self {
            id: None,
            date: date.to_string(),
            kind: kind.to_string(),
            amount,
            category: category.to_string(),
            description: None,
        }
    }
}

/// One stored debt. Only the amount is typed; everything else is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub amount: f64,
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}
