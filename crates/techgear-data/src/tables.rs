//! CSV persistence of the dataset tables.
//!
//! Tables are converted to polars [`DataFrame`]s and written with
//! [`CsvWriter`]; loading goes through [`CsvReadOptions`]. Dates are stored
//! as ISO `YYYY-MM-DD` strings and an unset `last_order_date` is an empty
//! cell.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{DataError, DataResult};
use crate::factory::Dataset;
use crate::types::{Customer, Product, Transaction, DATE_FORMAT};

/// Products file name.
pub const PRODUCTS_FILE: &str = "techgear_products.csv";
/// Customers file name.
pub const CUSTOMERS_FILE: &str = "techgear_customers.csv";
/// Transactions file name.
pub const TRANSACTIONS_FILE: &str = "techgear_transactions.csv";

/// Locations of the three tables under a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub products: PathBuf,
    pub customers: PathBuf,
    pub transactions: PathBuf,
}

impl DatasetPaths {
    /// Resolve the table paths under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            products: dir.join(PRODUCTS_FILE),
            customers: dir.join(CUSTOMERS_FILE),
            transactions: dir.join(TRANSACTIONS_FILE),
        }
    }

    /// All paths, in load order.
    pub fn all(&self) -> [&Path; 3] {
        [&self.products, &self.customers, &self.transactions]
    }

    /// Paths that do not exist.
    pub fn missing(&self) -> Vec<PathBuf> {
        self.all()
            .into_iter()
            .filter(|p| !p.exists())
            .map(Path::to_path_buf)
            .collect()
    }
}

/// The three tables as loaded from disk.
#[derive(Debug, Clone)]
pub struct LoadedTables {
    pub products: DataFrame,
    pub customers: DataFrame,
    pub transactions: DataFrame,
}

/// Build the products frame.
pub fn products_frame(products: &[Product]) -> PolarsResult<DataFrame> {
    df!(
        "product_id" => products.iter().map(|p| p.product_id.clone()).collect::<Vec<_>>(),
        "product_name" => products.iter().map(|p| p.product_name.clone()).collect::<Vec<_>>(),
        "category" => products.iter().map(|p| p.category.clone()).collect::<Vec<_>>(),
        "retail_price" => products.iter().map(|p| p.retail_price).collect::<Vec<_>>(),
        "cost_price" => products.iter().map(|p| p.cost_price).collect::<Vec<_>>(),
        "launch_date" => products.iter().map(|p| format_date(p.launch_date)).collect::<Vec<_>>(),
        "supplier" => products.iter().map(|p| p.supplier.clone()).collect::<Vec<_>>()
    )
}

/// Build the customers frame.
pub fn customers_frame(customers: &[Customer]) -> PolarsResult<DataFrame> {
    df!(
        "customer_id" => customers.iter().map(|c| c.customer_id.clone()).collect::<Vec<_>>(),
        "registration_date" => customers.iter().map(|c| format_date(c.registration_date)).collect::<Vec<_>>(),
        "customer_segment" => customers.iter().map(|c| c.customer_segment.name()).collect::<Vec<_>>(),
        "acquisition_channel" => customers.iter().map(|c| c.acquisition_channel.clone()).collect::<Vec<_>>(),
        "total_orders" => customers.iter().map(|c| c.total_orders).collect::<Vec<_>>(),
        "total_spent" => customers.iter().map(|c| c.total_spent).collect::<Vec<_>>(),
        "last_order_date" => customers.iter().map(|c| c.last_order_date.map(format_date)).collect::<Vec<Option<String>>>()
    )
}

/// Build the transactions frame.
pub fn transactions_frame(transactions: &[Transaction]) -> PolarsResult<DataFrame> {
    df!(
        "transaction_id" => transactions.iter().map(|t| t.transaction_id.clone()).collect::<Vec<_>>(),
        "customer_id" => transactions.iter().map(|t| t.customer_id.clone()).collect::<Vec<_>>(),
        "order_date" => transactions.iter().map(|t| format_date(t.order_date)).collect::<Vec<_>>(),
        "product_category" => transactions.iter().map(|t| t.product_category.clone()).collect::<Vec<_>>(),
        "product_name" => transactions.iter().map(|t| t.product_name.clone()).collect::<Vec<_>>(),
        "product_id" => transactions.iter().map(|t| t.product_id.clone()).collect::<Vec<_>>(),
        "quantity" => transactions.iter().map(|t| t.quantity).collect::<Vec<_>>(),
        "unit_price" => transactions.iter().map(|t| t.unit_price).collect::<Vec<_>>(),
        "total_amount" => transactions.iter().map(|t| t.total_amount).collect::<Vec<_>>(),
        "discount_amount" => transactions.iter().map(|t| t.discount_amount).collect::<Vec<_>>(),
        "shipping_cost" => transactions.iter().map(|t| t.shipping_cost).collect::<Vec<_>>(),
        "sales_channel" => transactions.iter().map(|t| t.sales_channel.clone()).collect::<Vec<_>>(),
        "region" => transactions.iter().map(|t| t.region.clone()).collect::<Vec<_>>(),
        "customer_type" => transactions.iter().map(|t| t.customer_type.name()).collect::<Vec<_>>()
    )
}

fn format_date(date: chrono::NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Write the three tables under `dir`, creating it if needed.
pub fn write_dataset(dataset: &Dataset, dir: impl AsRef<Path>) -> DataResult<DatasetPaths> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let paths = DatasetPaths::in_dir(dir);

    write_frame(&mut products_frame(&dataset.products)?, &paths.products)?;
    write_frame(&mut customers_frame(&dataset.customers)?, &paths.customers)?;
    write_frame(&mut transactions_frame(&dataset.transactions)?, &paths.transactions)?;

    info!(dir = %dir.display(), "wrote dataset tables");
    Ok(paths)
}

fn write_frame(df: &mut DataFrame, path: &Path) -> DataResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    CsvWriter::new(&mut writer).include_header(true).finish(df)?;
    debug!(path = %path.display(), rows = df.height(), "wrote table");
    Ok(())
}

/// Load the three tables.
///
/// Fails with [`DataError::MissingInput`] naming every absent file before
/// any table is read.
pub fn load_tables(paths: &DatasetPaths) -> DataResult<LoadedTables> {
    let missing = paths.missing();
    if !missing.is_empty() {
        return Err(DataError::MissingInput { paths: missing });
    }

    Ok(LoadedTables {
        products: read_frame(&paths.products)?,
        customers: read_frame(&paths.customers)?,
        transactions: read_frame(&paths.transactions)?,
    })
}

fn read_frame(path: &Path) -> DataResult<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    debug!(path = %path.display(), rows = df.height(), "loaded table");
    Ok(df)
}

/// Values of a column as strings, nulls preserved.
pub fn string_column(df: &DataFrame, name: &str) -> DataResult<Vec<Option<String>>> {
    let column = df
        .column(name)
        .and_then(|c| c.cast(&DataType::String))
        .map_err(|e| DataError::Validation(format!("column '{name}': {e}")))?;
    let values = column
        .str()
        .map_err(|e| DataError::Validation(format!("column '{name}': {e}")))?;
    Ok(values.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Values of a numeric column as `f64`, nulls preserved.
///
/// A cell that is present but does not parse as a number is a
/// [`DataError::Validation`] rather than a null.
pub fn float_column(df: &DataFrame, name: &str) -> DataResult<Vec<Option<f64>>> {
    let source = df
        .column(name)
        .map_err(|e| DataError::Validation(format!("column '{name}': {e}")))?;
    let column = source
        .cast(&DataType::Float64)
        .map_err(|e| DataError::Validation(format!("column '{name}': {e}")))?;
    let unparsed = column.null_count().saturating_sub(source.null_count());
    if unparsed > 0 {
        return Err(DataError::Validation(format!(
            "column '{name}': {unparsed} non-numeric value(s)"
        )));
    }
    let values = column
        .f64()
        .map_err(|e| DataError::Validation(format!("column '{name}': {e}")))?;
    Ok(values.into_iter().collect())
}

/// Number of null cells in a frame.
pub fn null_cells(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|c| c.null_count()).sum()
}
