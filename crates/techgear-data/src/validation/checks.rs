//! Individual data quality and business logic checks.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use polars::prelude::DataFrame;

use super::report::{
    BusinessModel, CategoryRollup, CheckStatus, CustomerConsistencyCheck, DateRangeCheck,
    KeyMetrics, RevenueCheck, TableCounts,
};
use crate::error::{DataError, DataResult};
use crate::tables::{float_column, null_cells, string_column, LoadedTables};
use crate::types::DATE_FORMAT;

/// Null cells per table. PASS when there are none, REVIEW otherwise.
pub fn missing_values(tables: &LoadedTables) -> TableCounts {
    let mut counts = TableCounts {
        customers: null_cells(&tables.customers),
        products: null_cells(&tables.products),
        transactions: null_cells(&tables.transactions),
        status: CheckStatus::Pass,
    };
    if counts.total() > 0 {
        counts.status = CheckStatus::Review;
    }
    counts
}

/// Duplicate primary keys per table. PASS when there are none, FAIL otherwise.
pub fn duplicate_ids(tables: &LoadedTables) -> DataResult<TableCounts> {
    let customers = duplicates(&tables.customers, "customer_id")?;
    let products = duplicates(&tables.products, "product_id")?;
    let transactions = duplicates(&tables.transactions, "transaction_id")?;

    Ok(TableCounts {
        customers,
        products,
        transactions,
        status: CheckStatus::pass_or_fail(customers + products + transactions == 0),
    })
}

/// Rows whose key already appeared earlier in the column.
fn duplicates(df: &DataFrame, key: &str) -> DataResult<usize> {
    let mut seen = HashSet::new();
    Ok(string_column(df, key)?
        .into_iter()
        .filter(|id| !seen.insert(id.clone()))
        .count())
}

/// Compare stored totals against `unit_price × quantity − discount + shipping`.
///
/// Rows with a null in any of the involved columns are skipped.
pub fn revenue_calculation(transactions: &DataFrame, tolerance: f64) -> DataResult<RevenueCheck> {
    let unit_price = float_column(transactions, "unit_price")?;
    let quantity = float_column(transactions, "quantity")?;
    let discount = float_column(transactions, "discount_amount")?;
    let shipping = float_column(transactions, "shipping_cost")?;
    let total = float_column(transactions, "total_amount")?;

    let mut total_difference = 0.0;
    for i in 0..total.len() {
        if let (Some(u), Some(q), Some(d), Some(s), Some(t)) =
            (unit_price[i], quantity[i], discount[i], shipping[i], total[i])
        {
            total_difference += (t - (u * q - d + s)).abs();
        }
    }

    Ok(RevenueCheck {
        total_difference,
        status: CheckStatus::pass_or_fail(total_difference < tolerance),
    })
}

/// Check that every order date lies in `[min, max]`.
///
/// An empty or all-null column fails. Unparseable dates are a validation
/// error.
pub fn date_range(transactions: &DataFrame, min: NaiveDate, max: NaiveDate) -> DataResult<DateRangeCheck> {
    let mut observed: Option<(NaiveDate, NaiveDate)> = None;
    for value in string_column(transactions, "order_date")?.into_iter().flatten() {
        let date = NaiveDate::parse_from_str(&value, DATE_FORMAT)
            .map_err(|e| DataError::Validation(format!("order_date '{value}': {e}")))?;
        observed = Some(match observed {
            Some((lo, hi)) => (lo.min(date), hi.max(date)),
            None => (date, date),
        });
    }

    let status = match observed {
        Some((lo, hi)) => CheckStatus::pass_or_fail(lo >= min && hi <= max),
        None => CheckStatus::Fail,
    };

    Ok(DateRangeCheck {
        min_date: observed.map(|(lo, _)| lo),
        max_date: observed.map(|(_, hi)| hi),
        status,
    })
}

/// Distinct transaction customers must not outnumber customer rows.
pub fn customer_consistency(
    customers: &DataFrame,
    transactions: &DataFrame,
) -> DataResult<CustomerConsistencyCheck> {
    let transaction_customers = string_column(transactions, "customer_id")?
        .into_iter()
        .flatten()
        .collect::<HashSet<_>>()
        .len();
    let active_customers = float_column(customers, "total_orders")?
        .into_iter()
        .filter(|n| n.is_some_and(|n| n > 0.0))
        .count();
    let customer_rows = customers.height();

    Ok(CustomerConsistencyCheck {
        transaction_customers,
        customer_rows,
        active_customers,
        status: CheckStatus::pass_or_fail(transaction_customers <= customer_rows),
    })
}

/// Orders, revenue and distinct customers per category, sorted by name.
pub fn category_rollups(transactions: &DataFrame) -> DataResult<Vec<CategoryRollup>> {
    let categories = string_column(transactions, "product_category")?;
    let totals = float_column(transactions, "total_amount")?;
    let customers = string_column(transactions, "customer_id")?;

    let mut groups: BTreeMap<String, (usize, f64, HashSet<String>)> = BTreeMap::new();
    for ((category, total), customer) in categories.into_iter().zip(totals).zip(customers) {
        let Some(category) = category else { continue };
        let entry = groups.entry(category).or_default();
        if let Some(total) = total {
            entry.0 += 1;
            entry.1 += total;
        }
        if let Some(customer) = customer {
            entry.2.insert(customer);
        }
    }

    Ok(groups
        .into_iter()
        .map(|(category, (orders, revenue, customers))| CategoryRollup {
            category,
            orders,
            revenue,
            customers: customers.len(),
        })
        .collect())
}

/// Dataset sizes, revenue and the business model label.
pub fn key_metrics(tables: &LoadedTables, premium_threshold: f64) -> DataResult<KeyMetrics> {
    let totals: Vec<f64> = float_column(&tables.transactions, "total_amount")?
        .into_iter()
        .flatten()
        .collect();
    let total_revenue: f64 = totals.iter().sum();
    let average_order_value = if totals.is_empty() {
        0.0
    } else {
        total_revenue / totals.len() as f64
    };

    Ok(KeyMetrics {
        customers: tables.customers.height(),
        products: tables.products.height(),
        transactions: tables.transactions.height(),
        total_revenue,
        average_order_value,
        business_model: if average_order_value > premium_threshold {
            BusinessModel::Premium
        } else {
            BusinessModel::Standard
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use super::date_range;

    fn transactions(rows: &[(&str, &str, &str, f64, f64, f64, f64, f64)]) -> DataFrame {
        df!(
            "transaction_id" => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
            "customer_id" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
            "order_date" => rows.iter().map(|r| r.2).collect::<Vec<_>>(),
            "product_category" => rows.iter().map(|_| "Smart Home").collect::<Vec<_>>(),
            "quantity" => rows.iter().map(|r| r.3).collect::<Vec<_>>(),
            "unit_price" => rows.iter().map(|r| r.4).collect::<Vec<_>>(),
            "discount_amount" => rows.iter().map(|r| r.5).collect::<Vec<_>>(),
            "shipping_cost" => rows.iter().map(|r| r.6).collect::<Vec<_>>(),
            "total_amount" => rows.iter().map(|r| r.7).collect::<Vec<_>>()
        )
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_revenue_calculation_tolerance() {
        let ok = transactions(&[
            ("T1", "C1", "2023-01-01", 2.0, 30.0, 6.0, 7.99, 61.99),
            ("T2", "C2", "2023-01-02", 1.0, 100.0, 0.0, 0.0, 100.0),
        ]);
        let check = revenue_calculation(&ok, 1.0).unwrap();
        assert!(check.total_difference < 1e-9);
        assert_eq!(check.status, CheckStatus::Pass);

        let off = transactions(&[("T1", "C1", "2023-01-01", 1.0, 100.0, 0.0, 0.0, 101.5)]);
        let check = revenue_calculation(&off, 1.0).unwrap();
        assert_eq!(check.status, CheckStatus::Fail);
        assert!((check.total_difference - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_date_range() {
        let df = transactions(&[
            ("T1", "C1", "2022-01-01", 1.0, 1.0, 0.0, 0.0, 1.0),
            ("T2", "C1", "2025-09-28", 1.0, 1.0, 0.0, 0.0, 1.0),
        ]);
        let check = date_range(&df, date(2022, 1, 1), date(2025, 12, 31)).unwrap();
        assert_eq!(check.status, CheckStatus::Pass);
        assert_eq!(check.min_date, Some(date(2022, 1, 1)));
        assert_eq!(check.max_date, Some(date(2025, 9, 28)));

        let check = date_range(&df, date(2022, 6, 1), date(2025, 12, 31)).unwrap();
        assert_eq!(check.status, CheckStatus::Fail);

        let bad = transactions(&[("T1", "C1", "28/09/2025", 1.0, 1.0, 0.0, 0.0, 1.0)]);
        assert!(matches!(
            date_range(&bad, date(2022, 1, 1), date(2025, 12, 31)),
            Err(DataError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicates_counted_after_first() {
        let df = transactions(&[
            ("T1", "C1", "2023-01-01", 1.0, 1.0, 0.0, 0.0, 1.0),
            ("T1", "C1", "2023-01-01", 1.0, 1.0, 0.0, 0.0, 1.0),
            ("T1", "C1", "2023-01-01", 1.0, 1.0, 0.0, 0.0, 1.0),
            ("T2", "C1", "2023-01-01", 1.0, 1.0, 0.0, 0.0, 1.0),
        ]);
        assert_eq!(duplicates(&df, "transaction_id").unwrap(), 2);
        assert_eq!(duplicates(&df, "customer_id").unwrap(), 3);
    }

    #[test]
    fn test_customer_consistency() {
        let customers = df!(
            "customer_id" => ["C1", "C2", "C3"],
            "total_orders" => [2u32, 0, 1]
        )
        .unwrap();
        let tx = transactions(&[
            ("T1", "C1", "2023-01-01", 1.0, 1.0, 0.0, 0.0, 1.0),
            ("T2", "C1", "2023-01-02", 1.0, 1.0, 0.0, 0.0, 1.0),
            ("T3", "C3", "2023-01-03", 1.0, 1.0, 0.0, 0.0, 1.0),
        ]);

        let check = customer_consistency(&customers, &tx).unwrap();
        assert_eq!(check.transaction_customers, 2);
        assert_eq!(check.customer_rows, 3);
        assert_eq!(check.active_customers, 2);
        assert_eq!(check.status, CheckStatus::Pass);

        let check = customer_consistency(&customers.head(Some(1)), &tx).unwrap();
        assert_eq!(check.status, CheckStatus::Fail);
    }

    #[test]
    fn test_category_rollups() {
        let df = df!(
            "product_category" => ["Smart Home", "Audio & Entertainment", "Smart Home"],
            "total_amount" => [10.0, 20.0, 5.5],
            "customer_id" => ["C1", "C2", "C1"]
        )
        .unwrap();

        let rollups = category_rollups(&df).unwrap();
        assert_eq!(rollups.len(), 2);
        assert_eq!(rollups[0].category, "Audio & Entertainment");
        assert_eq!(rollups[1].orders, 2);
        assert_eq!(rollups[1].revenue, 15.5);
        assert_eq!(rollups[1].customers, 1);
    }
}
