//! Sales transaction types.

use chrono::NaiveDate;

use super::{round_cents, CustomerSegment};

/// Largest per-row gap between a stored total and its recomputation.
const TOTAL_TOLERANCE: f64 = 0.006;

/// A single sales transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Unique transaction identifier (`T0000001`).
    pub transaction_id: String,
    /// Purchasing customer.
    pub customer_id: String,
    /// Order date.
    pub order_date: NaiveDate,
    /// Category of the purchased product.
    pub product_category: String,
    /// Name of the purchased product.
    pub product_name: String,
    /// Purchased product.
    pub product_id: String,
    /// Units ordered (at least 1).
    pub quantity: u32,
    /// Realised price per unit.
    pub unit_price: f64,
    /// `unit_price × quantity − discount_amount + shipping_cost`.
    pub total_amount: f64,
    /// Discount applied to the subtotal.
    pub discount_amount: f64,
    /// Shipping charged.
    pub shipping_cost: f64,
    /// Channel the order was placed through.
    pub sales_channel: String,
    /// Shipping region.
    pub region: String,
    /// Customer segment at order time.
    pub customer_type: CustomerSegment,
}

impl Transaction {
    /// Format a sequential transaction identifier.
    pub fn format_id(seq: u32) -> String {
        format!("T{:07}", seq)
    }

    /// Subtotal before discount and shipping.
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }

    /// Recompute the total from the stored components.
    pub fn calculated_total(&self) -> f64 {
        self.subtotal() - self.discount_amount + self.shipping_cost
    }

    /// Returns true if the stored total matches its components to the cent.
    pub fn is_total_consistent(&self) -> bool {
        (round_cents(self.calculated_total()) - self.total_amount).abs() < TOTAL_TOLERANCE
    }

    /// Returns true if a discount was applied.
    pub fn is_discounted(&self) -> bool {
        self.discount_amount > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            transaction_id: Transaction::format_id(7),
            customer_id: "C000001".into(),
            order_date: NaiveDate::from_ymd_opt(2023, 11, 24).unwrap(),
            product_category: "Gaming Equipment".into(),
            product_name: "GameMaster Gaming Mouse".into(),
            product_id: "P00042".into(),
            quantity: 2,
            unit_price: 30.0,
            total_amount: 61.99,
            discount_amount: 6.0,
            shipping_cost: 7.99,
            sales_channel: "Website".into(),
            region: "Midwest".into(),
            customer_type: CustomerSegment::New,
        }
    }

    #[test]
    fn test_format_id() {
        assert_eq!(Transaction::format_id(7), "T0000007");
    }

    #[test]
    fn test_calculated_total() {
        let tx = sample();
        assert_eq!(tx.subtotal(), 60.0);
        assert!((tx.calculated_total() - 61.99).abs() < 1e-9);
        assert!(tx.is_total_consistent());
        assert!(tx.is_discounted());
    }

    #[test]
    fn test_inconsistent_total_detected() {
        let mut tx = sample();
        tx.total_amount = 70.0;
        assert!(!tx.is_total_consistent());
    }
}
