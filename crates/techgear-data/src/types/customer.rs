//! Customer types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Customer segment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum CustomerSegment {
    /// First-time buyers.
    #[default]
    New,
    /// Customers with repeat purchases.
    Returning,
    /// High-value customers.
    #[serde(rename = "VIP")]
    Vip,
}

impl CustomerSegment {
    /// All segments in reporting order.
    pub const ALL: [CustomerSegment; 3] = [
        CustomerSegment::New,
        CustomerSegment::Returning,
        CustomerSegment::Vip,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            CustomerSegment::New => "New",
            CustomerSegment::Returning => "Returning",
            CustomerSegment::Vip => "VIP",
        }
    }
}

impl std::fmt::Display for CustomerSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A customer record.
///
/// `total_orders`, `total_spent` and `last_order_date` are derived from the
/// transaction log by [`crate::factory::backfill_customer_metrics`] and are
/// zero/unset until that pass runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Unique customer identifier (`C000001`).
    pub customer_id: String,
    /// Registration date.
    pub registration_date: NaiveDate,
    /// Segment at generation time.
    pub customer_segment: CustomerSegment,
    /// Marketing channel the customer was acquired through.
    pub acquisition_channel: String,
    /// Number of transactions referencing this customer.
    pub total_orders: u32,
    /// Sum of `total_amount` over this customer's transactions.
    pub total_spent: f64,
    /// Latest order date, unset without transactions.
    pub last_order_date: Option<NaiveDate>,
}

impl Customer {
    /// Create a customer with empty aggregates.
    pub fn new(
        customer_id: String,
        registration_date: NaiveDate,
        customer_segment: CustomerSegment,
        acquisition_channel: String,
    ) -> Self {
        Self {
            customer_id,
            registration_date,
            customer_segment,
            acquisition_channel,
            total_orders: 0,
            total_spent: 0.0,
            last_order_date: None,
        }
    }

    /// Format a sequential customer identifier.
    pub fn format_id(seq: u32) -> String {
        format!("C{:06}", seq)
    }

    /// Returns true once the customer has at least one order.
    pub fn is_active(&self) -> bool {
        self.total_orders > 0
    }

    /// Clear the derived aggregate fields.
    pub fn reset_metrics(&mut self) {
        self.total_orders = 0;
        self.total_spent = 0.0;
        self.last_order_date = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_is_inactive() {
        let customer = Customer::new(
            Customer::format_id(42),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            CustomerSegment::Vip,
            "Referral".into(),
        );

        assert_eq!(customer.customer_id, "C000042");
        assert!(!customer.is_active());
        assert_eq!(customer.last_order_date, None);
    }
}
