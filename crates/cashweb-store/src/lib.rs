//! Access to the stored collections
//!
//! The budget app persists two flat JSON arrays, one of transactions and one
//! of debts. This crate reads them; it never writes.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod records;

pub use error::StoreError;
pub use records::{DebtRecord, TransactionRecord};

/// Records read from one collection, plus how many stored entries were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Collection<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records, skipped: 0 }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Parse a stored collection.
///
/// Blank content and a literal `null` both mean "nothing stored yet". Only a
/// document that is not a JSON array fails; entries that do not fit the
/// record shape are skipped one by one with a warning.
pub fn parse_collection<T: DeserializeOwned>(content: &str, location: &str) -> Result<Collection<T>, StoreError> {
    if content.trim().is_empty() {
        return Ok(Collection::default());
    }

    let entries: Option<Vec<serde_json::Value>> =
        serde_json::from_str(content).map_err(|e| StoreError::MalformedCollection {
            location: location.to_string(),
            message: e.to_string(),
        })?;

    let mut collection = Collection::default();
    for (position, entry) in entries.unwrap_or_default().into_iter().enumerate() {
        match serde_json::from_value(entry) {
            Ok(record) => collection.records.push(record),
            Err(e) => {
                collection.skipped += 1;
                log::warn!("Skipping entry #{} of {}: {}", position, location, e);
            }
        }
    }

    Ok(collection)
}

// ==================== Store Trait ====================

/// Store reference type
pub type StoreRef = Arc<dyn RecordStoreTrait>;

/// Trait for record stores
#[async_trait]
pub trait RecordStoreTrait: Send + Sync {
    /// Load every stored transaction
    async fn load_transactions(&self) -> Result<Collection<TransactionRecord>, StoreError>;

    /// Load every stored debt
    async fn load_debts(&self) -> Result<Collection<DebtRecord>, StoreError>;

    /// Human-readable location, used in log lines
    fn describe(&self) -> String;
}

/// Store backed by two JSON files
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    transactions_path: PathBuf,
    debts_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(transactions_path: PathBuf, debts_path: PathBuf) -> Self {
        Self {
            transactions_path,
            debts_path,
        }
    }

    async fn read_collection<T: DeserializeOwned>(path: &PathBuf) -> Result<Collection<T>, StoreError> {
        if !tokio::fs::try_exists(path).await? {
            log::warn!("Collection file {} not found, treating it as empty", path.to_string_lossy());
            return Ok(Collection::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        parse_collection(&content, &path.to_string_lossy())
    }
}

#[async_trait]
impl RecordStoreTrait for JsonFileStore {
    async fn load_transactions(&self) -> Result<Collection<TransactionRecord>, StoreError> {
        Self::read_collection(&self.transactions_path).await
    }

    async fn load_debts(&self) -> Result<Collection<DebtRecord>, StoreError> {
        Self::read_collection(&self.debts_path).await
    }

    fn describe(&self) -> String {
        format!(
            "{} + {}",
            self.transactions_path.to_string_lossy(),
            self.debts_path.to_string_lossy()
        )
    }
}

/// Store holding its collections in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub transactions: Vec<TransactionRecord>,
    pub debts: Vec<DebtRecord>,
}

impl MemoryStore {
    pub fn new(transactions: Vec<TransactionRecord>, debts: Vec<DebtRecord>) -> Self {
        Self { transactions, debts }
    }
}

#[async_trait]
impl RecordStoreTrait for MemoryStore {
    async fn load_transactions(&self) -> Result<Collection<TransactionRecord>, StoreError> {
        Ok(Collection::new(self.transactions.clone()))
    }

    async fn load_debts(&self) -> Result<Collection<DebtRecord>, StoreError> {
        Ok(Collection::new(self.debts.clone()))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// ==================== Tests ====================
