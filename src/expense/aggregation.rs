//! Groups expenses into totals per category and per calendar month.

use std::collections::BTreeMap;

use serde::Serialize;
use time::OffsetDateTime;

use crate::expense::Expense;

/// Expense totals keyed by category code and by month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseSummary {
    /// Total spent per category code, e.g. `"01001"`.
    pub categories: BTreeMap<String, f64>,
    /// Total spent per month, keyed as `"{year}-{month}"`, e.g. `"2025-3"`.
    pub months: BTreeMap<String, f64>,
}

/// The month key for `timestamp` in the offset it carries.
///
/// Months are not zero padded: March 2025 is `"2025-3"`.
pub fn month_key(timestamp: OffsetDateTime) -> String {
    format!("{}-{}", timestamp.year(), timestamp.month() as u8)
}

/// Sums `expenses` by category code and, independently, by month.
///
/// Every expense is counted once in each grouping, so both maps add up to the
/// same total. Amounts are summed as given.
pub fn aggregate(expenses: &[Expense]) -> ExpenseSummary {
    let mut summary = ExpenseSummary::default();

    for expense in expenses {
        *summary
            .categories
            .entry(expense.category.clone())
            .or_insert(0.0) += expense.amount;
        *summary
            .months
            .entry(month_key(expense.timestamp))
            .or_insert(0.0) += expense.amount;
    }

    summary
}
