//! Year-month period selector

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

static YEAR_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid period regex"));

/// A calendar month, written `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month a date falls in
    pub fn of(date: &NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// One-based month
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of calendar days, leap-year aware
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };

        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(31)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::str::FromStr for YearMonth {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = YEAR_MONTH
            .captures(s.trim())
            .ok_or_else(|| CoreError::invalid_parameter("period", format!("expected YYYY-MM, got '{}'", s)))?;

        let year: i32 = caps[1]
            .parse()
            .map_err(|_| CoreError::invalid_parameter("period", format!("bad year in '{}'", s)))?;
        let month: u32 = caps[2]
            .parse()
            .map_err(|_| CoreError::invalid_parameter("period", format!("bad month in '{}'", s)))?;

        YearMonth::new(year, month)
            .ok_or_else(|| CoreError::invalid_parameter("period", format!("month out of range in '{}'", s)))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = CoreError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(period: YearMonth) -> Self {
        period.to_string()
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
