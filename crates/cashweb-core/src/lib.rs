//! Core report processing and business logic

pub mod aggregator;
pub mod error;
pub mod format;
pub mod labels;
pub mod models;
pub mod period;
pub mod reports;
pub mod types;

use cashweb_store::StoreRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use aggregator::ReportAggregator;
pub use cashweb_config::ReportKind;
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::{Debt, Transaction};
pub use period::YearMonth;
pub use reports::{AxisLabel, ChartSeries, ReportParams, ReportResult, ReportRow, ReportSummary};
pub use types::{BalanceTone, Category, TransactionType};

/// The two loaded collections plus the store they came from
pub struct Book {
    store: StoreRef,
    data: BookData,
    loaded: bool,
}

/// In-memory collections
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BookData {
    pub transactions: Vec<Transaction>,
    pub debts: Vec<Debt>,
    /// Stored transactions that could not be interpreted
    pub skipped_records: usize,
    /// Stored debts that could not be read
    pub skipped_debts: usize,
}

impl Book {
    /// Create an empty book over a store
    pub fn new(store: StoreRef) -> Self {
        Self {
            store,
            data: BookData::default(),
            loaded: false,
        }
    }

    /// Read both collections from the store.
    ///
    /// Stored transactions that cannot be interpreted are skipped with a
    /// warning; the rest of the collection still loads. Debts are never
    /// aggregated, so an unreadable debt collection only costs the debts.
    pub async fn load(&mut self) -> CoreResult<()> {
        let collection = self.store.load_transactions().await?;
        let debt_collection = match self.store.load_debts().await {
            Ok(collection) => collection,
            Err(e) => {
                log::warn!("Debts unavailable, continuing without them: {}", e);
                Default::default()
            }
        };

        let mut transactions = Vec::with_capacity(collection.records.len());
        let mut skipped_records = collection.skipped;
        for (position, record) in collection.records.iter().enumerate() {
            match Transaction::from_record(record) {
                Ok(tx) => transactions.push(tx),
                Err(e) => {
                    skipped_records += 1;
                    log::warn!("Skipping stored transaction #{}: {}", position, e);
                }
            }
        }

        let debts: Vec<Debt> = debt_collection.records.into_iter().map(Debt::from).collect();

        log::info!(
            "Loaded {} transactions ({} skipped) and {} debts ({} skipped) from {}",
            transactions.len(),
            skipped_records,
            debts.len(),
            debt_collection.skipped,
            self.store.describe()
        );

        self.data = BookData {
            transactions,
            debts,
            skipped_records,
            skipped_debts: debt_collection.skipped,
        };
        self.loaded = true;

        Ok(())
    }

    /// Reload the collections
    pub async fn reload(&mut self) -> CoreResult<()> {
        self.load().await
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.data.transactions
    }

    pub fn debts(&self) -> &[Debt] {
        &self.data.debts
    }

    /// Aggregator over the current collections
    pub fn aggregator(&self) -> ReportAggregator<'_> {
        ReportAggregator::new(&self.data.transactions)
    }

    /// Compute a report from the raw kind and period selectors
    pub fn compute_report(&self, kind: &str, period: &str) -> CoreResult<ReportResult> {
        self.aggregator().compute_report(kind, period)
    }

    /// Months holding at least one transaction, newest first
    pub fn available_months(&self) -> Vec<YearMonth> {
        let months: BTreeSet<YearMonth> = self.data.transactions.iter().map(|tx| YearMonth::of(&tx.date)).collect();
        months.into_iter().rev().collect()
    }
}

/// Trait for book operations
pub trait BookOperations {
    /// Get collection summary
    fn summary(&self) -> BookSummary;
}

/// Collection summary
#[derive(Debug, Serialize, Deserialize)]
pub struct BookSummary {
    pub loaded: bool,
    pub total_transactions: usize,
    pub total_debts: usize,
    pub skipped_records: usize,
    pub skipped_debts: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

impl BookOperations for Book {
    fn summary(&self) -> BookSummary {
        let dates = self.data.transactions.iter().map(|tx| tx.date);
        BookSummary {
            loaded: self.loaded,
            total_transactions: self.data.transactions.len(),
            total_debts: self.data.debts.len(),
            skipped_records: self.data.skipped_records,
            skipped_debts: self.data.skipped_debts,
            first_date: dates.clone().min().map(|d| d.to_string()),
            last_date: dates.max().map(|d| d.to_string()),
        }
    }
}

// ==================== Tests ====================
