//! Dataset validation.
//!
//! Loads the persisted tables and runs completeness, uniqueness and business
//! logic checks over them. Validation only reads; nothing is written back.

mod checks;
mod report;

pub use checks::{
    category_rollups, customer_consistency, date_range, duplicate_ids, key_metrics,
    missing_values, revenue_calculation,
};
pub use report::{
    BusinessModel, CategoryRollup, CheckStatus, CustomerConsistencyCheck, DateRangeCheck,
    KeyMetrics, RevenueCheck, TableCounts, ValidationReport,
};

use tracing::{debug, info};

use crate::config::ValidatorSettings;
use crate::error::DataResult;
use crate::tables::{load_tables, DatasetPaths, LoadedTables};

/// Load the tables from `settings.data_dir` and validate them.
pub fn validate_dataset(settings: &ValidatorSettings) -> DataResult<ValidationReport> {
    let paths = DatasetPaths::in_dir(&settings.data_dir);
    let tables = load_tables(&paths)?;
    info!(
        customers = tables.customers.height(),
        products = tables.products.height(),
        transactions = tables.transactions.height(),
        "loaded dataset"
    );
    validate_tables(&tables, settings)
}

/// Validate already loaded tables.
pub fn validate_tables(tables: &LoadedTables, settings: &ValidatorSettings) -> DataResult<ValidationReport> {
    let missing_values = missing_values(tables);
    let duplicate_ids = duplicate_ids(tables)?;
    let revenue = revenue_calculation(&tables.transactions, settings.revenue_tolerance)?;
    let date_range = date_range(
        &tables.transactions,
        settings.min_order_date,
        settings.max_order_date,
    )?;
    let customer_consistency = customer_consistency(&tables.customers, &tables.transactions)?;
    let categories = category_rollups(&tables.transactions)?;
    let metrics = key_metrics(tables, settings.premium_aov_threshold)?;

    debug!(
        revenue_difference = revenue.total_difference,
        categories = categories.len(),
        "validation checks complete"
    );

    Ok(ValidationReport {
        missing_values,
        duplicate_ids,
        revenue,
        date_range,
        customer_consistency,
        categories,
        metrics,
    })
}
