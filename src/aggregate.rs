use std::collections::HashMap;
use std::fmt::Display;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::record::{Category, ExpenseRecord};

/// Restricts which records feed the category chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFilter {
    All,
    Day(NaiveDate),
    Month { year: i32, month: u32 },
}

impl ChartFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            ChartFilter::All => true,
            ChartFilter::Day(day) => date == day,
            ChartFilter::Month { year, month } => date.year() == year && date.month() == month,
        }
    }
}

impl Display for ChartFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ChartFilter::All => write!(f, "all"),
            ChartFilter::Day(day) => write!(f, "{}", day),
            ChartFilter::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

/// Sums amounts per category over the records the filter admits.
/// Categories with no matching records are absent from the result; map
/// iteration order carries no meaning.
pub fn aggregate(records: &[ExpenseRecord], filter: &ChartFilter) -> HashMap<Category, Decimal> {
    let mut totals = HashMap::new();
    for record in records.iter().filter(|r| filter.matches(r.date)) {
        *totals.entry(record.category).or_insert(Decimal::ZERO) += record.amount;
    }
    totals
}
