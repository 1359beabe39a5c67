//! Core data models

use cashweb_store::{DebtRecord, TransactionRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{Category, TransactionType};

/// Transaction information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier assigned by the budget app, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Effective date
    pub date: NaiveDate,
    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Non-negative amount
    pub amount: f64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(date: NaiveDate, kind: TransactionType, amount: f64, category: Category) -> Self {
        Self {
            id: None,
            date,
            kind,
            amount,
            category,
            description: None,
        }
    }

    /// Interpret a stored record
    pub fn from_record(record: &TransactionRecord) -> CoreResult<Self> {
        let date = parse_record_date(&record.date).ok_or_else(|| CoreError::InvalidRecord {
            message: format!("unparseable date '{}'", record.date),
        })?;
        let kind: TransactionType = record
            .kind
            .parse()
            .map_err(|message| CoreError::InvalidRecord { message })?;

        Ok(Self {
            id: record.id.as_ref().map(id_to_string),
            date,
            kind,
            amount: record.amount,
            category: Category::from_key(&record.category),
            description: record.description.clone(),
        })
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

/// Debt record. Loaded alongside the transactions, never aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub amount: f64,
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl From<DebtRecord> for Debt {
    fn from(record: DebtRecord) -> Self {
        Self {
            id: record.id.as_ref().map(id_to_string),
            amount: record.amount,
            fields: record.fields,
        }
    }
}

fn id_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a stored date.
///
/// Accepts a plain `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive
/// `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}
