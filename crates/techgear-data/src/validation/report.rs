//! Validation report types.

use std::fmt;

use chrono::NaiveDate;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckStatus {
    /// Check passed.
    Pass,
    /// Data should be reviewed before use.
    Review,
    /// Check failed.
    Fail,
}

impl CheckStatus {
    /// PASS when `ok`, otherwise FAIL.
    pub fn pass_or_fail(ok: bool) -> Self {
        if ok {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }

    /// Returns true for [`CheckStatus::Pass`].
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckStatus::Pass)
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Review => "REVIEW",
            CheckStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A per-table count check (nulls, duplicate keys).
#[derive(Debug, Clone, PartialEq)]
pub struct TableCounts {
    pub customers: usize,
    pub products: usize,
    pub transactions: usize,
    pub status: CheckStatus,
}

impl TableCounts {
    /// Sum over the three tables.
    pub fn total(&self) -> usize {
        self.customers + self.products + self.transactions
    }
}

/// Revenue recomputation check.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueCheck {
    /// Sum of absolute differences between stored and recomputed totals.
    pub total_difference: f64,
    pub status: CheckStatus,
}

/// Order date window check.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRangeCheck {
    /// Earliest observed order date.
    pub min_date: Option<NaiveDate>,
    /// Latest observed order date.
    pub max_date: Option<NaiveDate>,
    pub status: CheckStatus,
}

/// Customer reference check.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerConsistencyCheck {
    /// Distinct customers referenced by transactions.
    pub transaction_customers: usize,
    /// Rows in the customers table.
    pub customer_rows: usize,
    /// Customers with at least one order.
    pub active_customers: usize,
    pub status: CheckStatus,
}

/// Per-category performance figures.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRollup {
    pub category: String,
    pub orders: usize,
    pub revenue: f64,
    pub customers: usize,
}

/// Business label derived from the average order value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessModel {
    Premium,
    Standard,
}

impl fmt::Display for BusinessModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusinessModel::Premium => f.write_str("Premium"),
            BusinessModel::Standard => f.write_str("Standard"),
        }
    }
}

/// Headline metrics of the loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMetrics {
    pub customers: usize,
    pub products: usize,
    pub transactions: usize,
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub business_model: BusinessModel,
}

/// Full validation report.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Null cells per table.
    pub missing_values: TableCounts,
    /// Duplicate primary keys per table.
    pub duplicate_ids: TableCounts,
    pub revenue: RevenueCheck,
    pub date_range: DateRangeCheck,
    pub customer_consistency: CustomerConsistencyCheck,
    /// Rollups sorted by category name.
    pub categories: Vec<CategoryRollup>,
    pub metrics: KeyMetrics,
}

impl ValidationReport {
    /// Data quality checks counted by the quality score.
    pub fn quality_checks(&self) -> [(&'static str, CheckStatus); 2] {
        [
            ("Missing Values", self.missing_values.status),
            ("Duplicate IDs", self.duplicate_ids.status),
        ]
    }

    /// Business logic checks.
    pub fn business_checks(&self) -> [(&'static str, CheckStatus); 3] {
        [
            ("Revenue Calculation", self.revenue.status),
            ("Date Range", self.date_range.status),
            ("Customer Consistency", self.customer_consistency.status),
        ]
    }

    /// Percentage of quality checks that passed.
    ///
    /// Only the completeness and uniqueness checks count; the business logic
    /// checks are reported but do not affect the score.
    pub fn quality_score(&self) -> f64 {
        let checks = self.quality_checks();
        let passed = checks.iter().filter(|(_, s)| s.is_pass()).count();
        passed as f64 / checks.len() as f64 * 100.0
    }

    /// Returns true when every check passed.
    pub fn all_passed(&self) -> bool {
        self.quality_checks()
            .iter()
            .chain(self.business_checks().iter())
            .all(|(_, s)| s.is_pass())
    }
}
