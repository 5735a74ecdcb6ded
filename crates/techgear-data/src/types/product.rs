//! Product catalog types.

use chrono::NaiveDate;

/// A catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique product identifier (`P00001`).
    pub product_id: String,
    /// Display name, `"{brand} {model}"`.
    pub product_name: String,
    /// Category name from the business rules.
    pub category: String,
    /// Retail price, within the category's price bounds.
    pub retail_price: f64,
    /// Cost price derived from the category margin.
    pub cost_price: f64,
    /// Date the product was launched.
    pub launch_date: NaiveDate,
    /// Supplier label (`Supplier_7`).
    pub supplier: String,
}

impl Product {
    /// Format a sequential product identifier.
    pub fn format_id(seq: u32) -> String {
        format!("P{:05}", seq)
    }
}
