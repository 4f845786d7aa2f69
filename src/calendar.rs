use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("month {0} is out of range (expected 1-12)")]
    InvalidMonth(u32),
    #[error("start month {start} must be on or before end month {end}")]
    InvalidRange { start: MonthKey, end: MonthKey },
    #[error("invalid month '{0}' (expected YYYY-MM)")]
    Parse(String),
}

/// A calendar month. Ordered by (year, month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month; December rolls over into January.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_between(&self, other: &MonthKey) -> i64 {
        other.ordinal() - self.ordinal()
    }

    /// Column label used by the exported sheet, e.g. `2025年3月`.
    pub fn label_zh(&self) -> String {
        format!("{}年{}月", self.year, self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let date = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map_err(|_| CalendarError::Parse(trimmed.to_string()))?;
        Ok(Self::from_date(date))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

/// Contiguous, non-empty run of months from a start month to an end month inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSequence {
    months: Vec<MonthKey>,
}

impl MonthSequence {
    pub fn span(start: MonthKey, end: MonthKey) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }
        let capacity = start.months_between(&end) as usize + 1;
        let mut months = Vec::with_capacity(capacity);
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.succ();
        }
        Ok(Self { months })
    }

    pub fn single(month: MonthKey) -> Self {
        Self {
            months: vec![month],
        }
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn start(&self) -> MonthKey {
        self.months[0]
    }

    pub fn end(&self) -> MonthKey {
        self.months[self.months.len() - 1]
    }

    pub fn as_slice(&self) -> &[MonthKey] {
        &self.months
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonthKey> {
        self.months.iter()
    }

    pub fn contains(&self, month: &MonthKey) -> bool {
        *month >= self.start() && *month <= self.end()
    }

    /// Normalized position of month `index`: 0.0 at the first month, 1.0 at the last.
    /// Single-month sequences report 1.0.
    pub fn progress(&self, index: usize) -> f64 {
        let len = self.months.len();
        if len > 1 {
            index as f64 / (len - 1) as f64
        } else {
            1.0
        }
    }
}

impl<'a> IntoIterator for &'a MonthSequence {
    type Item = &'a MonthKey;
    type IntoIter = std::slice::Iter<'a, MonthKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.months.iter()
    }
}

/// Recurring seasonal shutdown expressed as a month-of-year window.
/// `start_month > end_month` wraps across the new year (e.g. Nov-Apr).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WinterBreakConfig", into = "WinterBreakConfig")]
pub struct WinterBreak {
    start_month: u32,
    end_month: u32,
}

#[derive(Serialize, Deserialize)]
struct WinterBreakConfig {
    start_month: u32,
    end_month: u32,
}

impl Default for WinterBreak {
    fn default() -> Self {
        Self {
            start_month: 11,
            end_month: 4,
        }
    }
}

impl WinterBreak {
    pub fn new(start_month: u32, end_month: u32) -> Result<Self, CalendarError> {
        for month in [start_month, end_month] {
            if !(1..=12).contains(&month) {
                return Err(CalendarError::InvalidMonth(month));
            }
        }
        Ok(Self {
            start_month,
            end_month,
        })
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    pub fn end_month(&self) -> u32 {
        self.end_month
    }

    pub fn contains(&self, month: &MonthKey) -> bool {
        let m = month.month();
        if self.start_month > self.end_month {
            m >= self.start_month || m <= self.end_month
        } else {
            m >= self.start_month && m <= self.end_month
        }
    }
}

impl TryFrom<WinterBreakConfig> for WinterBreak {
    type Error = CalendarError;

    fn try_from(value: WinterBreakConfig) -> Result<Self, Self::Error> {
        Self::new(value.start_month, value.end_month)
    }
}

impl From<WinterBreak> for WinterBreakConfig {
    fn from(value: WinterBreak) -> Self {
        Self {
            start_month: value.start_month,
            end_month: value.end_month,
        }
    }
}
