//! Core record types for the TechGear dataset.

mod customer;
mod product;
mod transaction;

pub use customer::{Customer, CustomerSegment};
pub use product::Product;
pub use transaction::Transaction;

/// ISO date format used for every persisted date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Round a monetary amount to cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(12.344), 12.34);
        assert_eq!(round_cents(12.346), 12.35);
        assert_eq!(round_cents(0.0), 0.0);
        assert_eq!(round_cents(899.0), 899.0);
    }
}
