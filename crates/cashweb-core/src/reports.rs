//! Report structures for API responses

use cashweb_config::ReportKind;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::period::YearMonth;
use crate::types::BalanceTone;

/// A validated report request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportParams {
    /// Days of one month
    Monthly(YearMonth),
    /// Categories of one month, or of all time
    Category(Option<YearMonth>),
    /// Month-of-year buckets over the whole collection
    Yearly,
}

impl ReportParams {
    /// Build a request from a kind and the raw period selector.
    ///
    /// The period is required for monthly reports, optional for category
    /// reports and ignored for yearly ones.
    pub fn parse(kind: ReportKind, period: &str) -> CoreResult<Self> {
        let period = period.trim();
        match kind {
            ReportKind::Monthly => {
                if period.is_empty() {
                    return Err(CoreError::invalid_parameter("period", "a monthly report needs a YYYY-MM period"));
                }
                Ok(ReportParams::Monthly(period.parse()?))
            }
            ReportKind::Category => {
                if period.is_empty() {
                    Ok(ReportParams::Category(None))
                } else {
                    Ok(ReportParams::Category(Some(period.parse()?)))
                }
            }
            ReportKind::Yearly => Ok(ReportParams::Yearly),
        }
    }

    /// Parse both the kind and the period from request strings
    pub fn from_query(kind: &str, period: &str) -> CoreResult<Self> {
        let kind: ReportKind = kind
            .parse()
            .map_err(|message: String| CoreError::invalid_parameter("kind", message))?;
        Self::parse(kind, period)
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            ReportParams::Monthly(_) => ReportKind::Monthly,
            ReportParams::Category(_) => ReportKind::Category,
            ReportParams::Yearly => ReportKind::Yearly,
        }
    }

    pub fn period(&self) -> Option<YearMonth> {
        match self {
            ReportParams::Monthly(period) => Some(*period),
            ReportParams::Category(period) => *period,
            ReportParams::Yearly => None,
        }
    }
}

/// Income, expense and their difference
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl ReportSummary {
    pub fn new(income: f64, expense: f64) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    pub fn balance_tone(&self) -> BalanceTone {
        BalanceTone::of(self.balance)
    }
}

/// What the chart's x axis counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisLabel {
    Day,
    Category,
    Month,
}

impl AxisLabel {
    pub fn label(&self) -> &'static str {
        match self {
            AxisLabel::Day => "يوم",
            AxisLabel::Category => "فئة",
            AxisLabel::Month => "شهر",
        }
    }
}

/// Two aligned value series for the bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub income_values: Vec<f64>,
    pub expense_values: Vec<f64>,
    pub axis: AxisLabel,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One line of the report table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub amount: f64,
    pub percentage: f64,
}

impl ReportRow {
    pub fn new(label: &str, amount: f64, percentage: f64) -> Self {
        Self {
            label: label.to_string(),
            amount,
            percentage,
        }
    }
}

/// Everything one report renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    pub kind: ReportKind,
    pub period: Option<YearMonth>,
    pub summary: ReportSummary,
    pub series: ChartSeries,
    pub rows: Vec<ReportRow>,
}
