//! Report aggregation over the loaded collections
//!
//! Every report is a single pass over an in-memory slice. The aggregator
//! holds a borrowed collection and never mutates it, so computing the same
//! request twice yields identical results.

use cashweb_config::ReportKind;
use chrono::Datelike;
use std::collections::HashMap;

use crate::error::CoreResult;
use crate::labels;
use crate::models::Transaction;
use crate::period::YearMonth;
use crate::reports::{AxisLabel, ChartSeries, ReportParams, ReportResult, ReportRow, ReportSummary};
use crate::types::{Category, TransactionType};

/// Percentage shown on the fixed summary rows of monthly and yearly reports
const FIXED_ROW_PERCENTAGE: f64 = 100.0;

/// Computes reports over the transaction collection. Debts never enter a report.
#[derive(Debug, Clone, Copy)]
pub struct ReportAggregator<'a> {
    transactions: &'a [Transaction],
}

/// Per-bucket income and expense
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Bucket {
    income: f64,
    expense: f64,
}

impl Bucket {
    fn add(&mut self, tx: &Transaction) {
        match tx.kind {
            TransactionType::Income => self.income += tx.amount,
            TransactionType::Expense => self.expense += tx.amount,
        }
    }

    fn combined(&self) -> f64 {
        self.income + self.expense
    }
}

impl<'a> ReportAggregator<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    /// Parse the raw kind and period selectors and compute the request
    pub fn compute_report(&self, kind: &str, period: &str) -> CoreResult<ReportResult> {
        let params = ReportParams::from_query(kind, period)?;
        Ok(self.compute(&params))
    }

    /// Compute a validated request
    pub fn compute(&self, params: &ReportParams) -> ReportResult {
        log::debug!(
            "Computing {} report (period: {:?}) over {} transactions",
            params.kind(),
            params.period().map(|p| p.to_string()),
            self.transactions.len()
        );

        match params {
            ReportParams::Monthly(period) => self.monthly(*period),
            ReportParams::Category(period) => self.by_category(*period),
            ReportParams::Yearly => self.yearly(),
        }
    }

    // ==================== Report Kinds ====================

    fn monthly(&self, period: YearMonth) -> ReportResult {
        let filtered: Vec<&Transaction> = self.transactions.iter().filter(|tx| period.contains(&tx.date)).collect();
        let summary = summarize(filtered.iter().copied());

        let days = period.days_in_month() as usize;
        let mut buckets = vec![Bucket::default(); days];
        for tx in &filtered {
            if let Some(bucket) = buckets.get_mut(tx.date.day0() as usize) {
                bucket.add(tx);
            }
        }

        let series = series_from_buckets((1..=days).map(|day| day.to_string()).collect(), &buckets, AxisLabel::Day);
        let rows = fixed_rows(&summary, labels::INCOME_ROW, labels::EXPENSE_ROW);

        ReportResult {
            kind: ReportKind::Monthly,
            period: Some(period),
            summary,
            series,
            rows,
        }
    }

    fn by_category(&self, period: Option<YearMonth>) -> ReportResult {
        let filtered: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|tx| period.map_or(true, |p| p.contains(&tx.date)))
            .collect();
        let summary = summarize(filtered.iter().copied());

        // Groups keep the order in which each category first appears
        let mut groups: Vec<(&Category, Bucket)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for tx in &filtered {
            let slot = *index.entry(tx.category.key()).or_insert_with(|| {
                groups.push((&tx.category, Bucket::default()));
                groups.len() - 1
            });
            groups[slot].1.add(tx);
        }

        let labels: Vec<String> = groups.iter().map(|(category, _)| category.label().to_string()).collect();
        let buckets: Vec<Bucket> = groups.iter().map(|(_, bucket)| *bucket).collect();
        let series = series_from_buckets(labels.clone(), &buckets, AxisLabel::Category);

        let denominator = summary.income + summary.expense;
        let rows = labels
            .iter()
            .zip(&buckets)
            .map(|(label, bucket)| ReportRow::new(label, bucket.combined(), percentage_of(bucket.combined(), denominator)))
            .collect();

        ReportResult {
            kind: ReportKind::Category,
            period,
            summary,
            series,
            rows,
        }
    }

    /// Month-of-year report over the whole collection.
    ///
    /// No year filter is applied: March 2023 and March 2024 land in the same
    /// bucket.
    fn yearly(&self) -> ReportResult {
        let summary = summarize(self.transactions.iter());

        let mut buckets = [Bucket::default(); 12];
        for tx in self.transactions {
            buckets[tx.date.month0() as usize].add(tx);
        }

        let month_labels = (0..12).map(|month0| labels::month_label(month0).to_string()).collect();
        let series = series_from_buckets(month_labels, &buckets, AxisLabel::Month);
        let rows = fixed_rows(&summary, labels::YEARLY_INCOME_ROW, labels::YEARLY_EXPENSE_ROW);

        ReportResult {
            kind: ReportKind::Yearly,
            period: None,
            summary,
            series,
            rows,
        }
    }
}

// ==================== Helpers ====================

fn summarize<'t>(transactions: impl Iterator<Item = &'t Transaction>) -> ReportSummary {
    let mut totals = Bucket::default();
    for tx in transactions {
        totals.add(tx);
    }
    ReportSummary::new(totals.income, totals.expense)
}

fn series_from_buckets(labels: Vec<String>, buckets: &[Bucket], axis: AxisLabel) -> ChartSeries {
    ChartSeries {
        labels,
        income_values: buckets.iter().map(|b| b.income).collect(),
        expense_values: buckets.iter().map(|b| b.expense).collect(),
        axis,
    }
}

/// Income, expense and balance rows. The percentage column is a constant.
fn fixed_rows(summary: &ReportSummary, income_label: &str, expense_label: &str) -> Vec<ReportRow> {
    vec![
        ReportRow::new(income_label, summary.income, FIXED_ROW_PERCENTAGE),
        ReportRow::new(expense_label, summary.expense, FIXED_ROW_PERCENTAGE),
        ReportRow::new(labels::BALANCE_ROW, summary.balance, FIXED_ROW_PERCENTAGE),
    ]
}

/// `part / whole * 100`, with a zero whole giving 0
fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const EPSILON: f64 = 1e-9;

    fn tx(date: &str, kind: TransactionType, amount: f64, category: &str) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind,
            amount,
            Category::from_key(category),
        )
    }

    fn income(date: &str, amount: f64, category: &str) -> Transaction {
        tx(date, TransactionType::Income, amount, category)
    }

    fn expense(date: &str, amount: f64, category: &str) -> Transaction {
        tx(date, TransactionType::Expense, amount, category)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            income("2024-03-05", 100.0, "salary"),
            expense("2024-03-05", 40.0, "food"),
        ]
    }

    fn mixed() -> Vec<Transaction> {
        vec![
            income("2024-01-31", 2500.0, "salary"),
            expense("2024-02-29", 120.25, "bills"),
            expense("2024-03-01", 35.5, "transport"),
            income("2024-03-10", 300.0, "gift"),
            expense("2024-03-10", 80.0, "food"),
            expense("2024-03-31", 19.99, "shopping"),
            income("2023-03-15", 2400.0, "salary"),
            expense("2023-12-24", 310.0, "pets"),
            expense("2024-03-20", 12.0, "food"),
        ]
    }

    fn sum(values: &[f64]) -> f64 {
        values.iter().sum()
    }

    #[test]
    fn test_monthly_example() {
        let transactions = sample();
        let aggregator = ReportAggregator::new(&transactions);
        let report = aggregator.compute_report("monthly", "2024-03").unwrap();

        assert_eq!(report.summary, ReportSummary { income: 100.0, expense: 40.0, balance: 60.0 });
        assert_eq!(report.series.len(), 31);
        assert_eq!(report.series.labels[0], "1");
        assert_eq!(report.series.labels[30], "31");
        assert_eq!(report.series.income_values[4], 100.0);
        assert_eq!(report.series.expense_values[4], 40.0);
        for day in (0..31).filter(|d| *d != 4) {
            assert_eq!(report.series.income_values[day], 0.0);
            assert_eq!(report.series.expense_values[day], 0.0);
        }
        assert_eq!(report.series.axis, AxisLabel::Day);
    }

    #[test]
    fn test_monthly_rows_are_fixed() {
        let transactions = sample();
        let report = ReportAggregator::new(&transactions)
            .compute(&ReportParams::Monthly("2024-03".parse().unwrap()));

        assert_eq!(
            report.rows,
            vec![
                ReportRow::new("المدخول", 100.0, 100.0),
                ReportRow::new("المصروف", 40.0, 100.0),
                ReportRow::new("صافي الرصيد", 60.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_monthly_leap_february() {
        let transactions = mixed();
        let aggregator = ReportAggregator::new(&transactions);

        let leap = aggregator.compute_report("monthly", "2024-02").unwrap();
        assert_eq!(leap.series.len(), 29);
        assert_eq!(leap.series.expense_values[28], 120.25);

        let plain = aggregator.compute_report("monthly", "2023-02").unwrap();
        assert_eq!(plain.series.len(), 28);
        assert_eq!(plain.summary, ReportSummary::default());
    }

    #[test]
    fn test_monthly_buckets_sum_to_totals() {
        let transactions = mixed();
        let report = ReportAggregator::new(&transactions)
            .compute_report("monthly", "2024-03")
            .unwrap();

        assert!((sum(&report.series.income_values) - report.summary.income).abs() < EPSILON);
        assert!((sum(&report.series.expense_values) - report.summary.expense).abs() < EPSILON);
        assert_eq!(report.summary.income, 300.0);
        assert!((report.summary.expense - (35.5 + 80.0 + 19.99 + 12.0)).abs() < EPSILON);
        assert_eq!(report.series.expense_values[0], 35.5);
        assert_eq!(report.series.expense_values[30], 19.99);
    }

    #[test]
    fn test_monthly_requires_period() {
        let transactions = sample();
        let aggregator = ReportAggregator::new(&transactions);
        assert!(aggregator.compute_report("monthly", "").is_err());
        assert!(aggregator.compute_report("monthly", "2024-13").is_err());
    }

    #[test]
    fn test_category_example() {
        let transactions = sample();
        let report = ReportAggregator::new(&transactions)
            .compute_report("category", "")
            .unwrap();

        assert_eq!(report.period, None);
        assert_eq!(report.series.labels, vec!["راتب", "طعام"]);
        assert_eq!(report.series.income_values, vec![100.0, 0.0]);
        assert_eq!(report.series.expense_values, vec![0.0, 40.0]);
        assert_eq!(report.series.axis, AxisLabel::Category);

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].label, "راتب");
        assert_eq!(report.rows[0].amount, 100.0);
        assert!((report.rows[0].percentage - 100.0 * 100.0 / 140.0).abs() < EPSILON);
        assert_eq!(report.rows[1].label, "طعام");
        assert_eq!(report.rows[1].amount, 40.0);
        assert!((report.rows[1].percentage - 40.0 / 140.0 * 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_category_first_occurrence_order() {
        let transactions = vec![
            expense("2024-03-02", 5.0, "food"),
            income("2024-03-03", 50.0, "salary"),
            expense("2024-03-04", 7.0, "food"),
            income("2024-03-05", 3.0, "food"),
        ];
        let report = ReportAggregator::new(&transactions)
            .compute_report("category", "2024-03")
            .unwrap();

        assert_eq!(report.series.labels, vec!["طعام", "راتب"]);
        assert_eq!(report.series.income_values, vec![3.0, 50.0]);
        assert_eq!(report.series.expense_values, vec![12.0, 0.0]);
        // Income and expense of one category are combined
        assert_eq!(report.rows[0].amount, 15.0);
    }

    #[test]
    fn test_category_unknown_keys_stay_separate() {
        let transactions = vec![
            expense("2024-03-02", 5.0, "pets"),
            expense("2024-03-03", 6.0, "garden"),
            expense("2024-03-04", 1.0, "pets"),
        ];
        let report = ReportAggregator::new(&transactions)
            .compute_report("category", "")
            .unwrap();

        assert_eq!(report.series.labels, vec!["عام", "عام"]);
        assert_eq!(report.series.expense_values, vec![6.0, 6.0]);
    }

    #[test]
    fn test_category_period_filter() {
        let transactions = mixed();
        let aggregator = ReportAggregator::new(&transactions);

        let march = aggregator.compute_report("category", "2024-03").unwrap();
        assert_eq!(march.series.labels, vec!["مواصلات", "هدية", "طعام", "تسوق"]);
        assert_eq!(march.summary.income, 300.0);

        let all_time = aggregator.compute_report("category", "").unwrap();
        assert_eq!(all_time.series.len(), 7);
    }

    #[test]
    fn test_category_amounts_and_percentages_add_up() {
        let transactions = mixed();
        let report = ReportAggregator::new(&transactions)
            .compute_report("category", "")
            .unwrap();

        let combined: f64 = report.rows.iter().map(|r| r.amount).sum();
        assert!((combined - (report.summary.income + report.summary.expense)).abs() < 1e-6);

        let percentages: f64 = report.rows.iter().map(|r| r.percentage).sum();
        assert!((percentages - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_category_zero_denominator() {
        let transactions = vec![expense("2024-03-02", 0.0, "food")];
        let report = ReportAggregator::new(&transactions)
            .compute_report("category", "")
            .unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].percentage, 0.0);
        assert!(report.rows[0].percentage.is_finite());
    }

    #[test]
    fn test_empty_collection() {
        let aggregator = ReportAggregator::new(&[]);

        let category = aggregator.compute_report("category", "").unwrap();
        assert_eq!(category.summary, ReportSummary::default());
        assert!(category.rows.is_empty());
        assert!(category.series.is_empty());

        let monthly = aggregator.compute_report("monthly", "2024-04").unwrap();
        assert_eq!(monthly.series.len(), 30);
        assert!(monthly.rows.iter().all(|r| r.amount == 0.0));

        let yearly = aggregator.compute_report("yearly", "").unwrap();
        assert_eq!(yearly.series.len(), 12);
        assert_eq!(yearly.summary.balance, 0.0);
    }

    #[test]
    fn test_yearly_merges_years() {
        let transactions = mixed();
        let report = ReportAggregator::new(&transactions)
            .compute_report("yearly", "2024-03")
            .unwrap();

        assert_eq!(report.period, None);
        assert_eq!(report.series.labels.len(), 12);
        assert_eq!(report.series.labels[0], "يناير");
        assert_eq!(report.series.axis, AxisLabel::Month);
        // March 2023 salary and March 2024 gift share a bucket
        assert_eq!(report.series.income_values[2], 2400.0 + 300.0);
        assert_eq!(report.series.expense_values[11], 310.0);
    }

    #[test]
    fn test_yearly_totals_and_rows() {
        let transactions = mixed();
        let report = ReportAggregator::new(&transactions)
            .compute_report("yearly", "")
            .unwrap();

        let total_income: f64 = transactions.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
        let total_expense: f64 = transactions.iter().filter(|t| !t.is_income()).map(|t| t.amount).sum();
        assert!((report.summary.income - total_income).abs() < EPSILON);
        assert!((report.summary.expense - total_expense).abs() < EPSILON);
        assert!((sum(&report.series.income_values) - total_income).abs() < 1e-6);
        assert!((sum(&report.series.expense_values) - total_expense).abs() < 1e-6);

        let labels: Vec<&str> = report.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["المدخول السنوي", "المصروف السنوي", "صافي الرصيد"]);
        assert!(report.rows.iter().all(|r| r.percentage == 100.0));
    }

    #[test]
    fn test_balance_identity_for_every_kind() {
        let transactions = mixed();
        let aggregator = ReportAggregator::new(&transactions);
        for (kind, period) in [
            ("monthly", "2024-03"),
            ("category", ""),
            ("category", "2024-02"),
            ("yearly", ""),
        ] {
            let report = aggregator.compute_report(kind, period).unwrap();
            assert_eq!(report.summary.income - report.summary.expense, report.summary.balance);
        }
    }

    #[test]
    fn test_idempotent() {
        let transactions = mixed();
        let aggregator = ReportAggregator::new(&transactions);
        for kind in ["monthly", "category", "yearly"] {
            let first = aggregator.compute_report(kind, "2024-03").unwrap();
            let second = aggregator.compute_report(kind, "2024-03").unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(5.0, 0.0), 0.0);
        assert_eq!(percentage_of(25.0, 50.0), 50.0);
    }
}
