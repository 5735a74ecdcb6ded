//! Customer metrics back-fill.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::types::{round_cents, Customer, Transaction};

#[derive(Default)]
struct Aggregate {
    orders: u32,
    spent: f64,
    last_order: Option<NaiveDate>,
}

/// Recompute `total_orders`, `total_spent` and `last_order_date` of every
/// customer from the transaction log.
///
/// Existing aggregates are discarded, so running the pass twice gives the
/// same result. Customers without transactions end up with zero orders,
/// zero spend and no last order date. Transactions referencing unknown
/// customers are ignored.
pub fn backfill_customer_metrics(customers: &mut [Customer], transactions: &[Transaction]) {
    let mut aggregates: HashMap<&str, Aggregate> = HashMap::with_capacity(customers.len());
    for tx in transactions {
        let entry = aggregates.entry(tx.customer_id.as_str()).or_default();
        entry.orders += 1;
        entry.spent += tx.total_amount;
        entry.last_order = entry.last_order.max(Some(tx.order_date));
    }

    let mut active = 0usize;
    for customer in customers.iter_mut() {
        customer.reset_metrics();
        if let Some(agg) = aggregates.get(customer.customer_id.as_str()) {
            customer.total_orders = agg.orders;
            customer.total_spent = round_cents(agg.spent);
            customer.last_order_date = agg.last_order;
            active += 1;
        }
    }

    debug!(customers = customers.len(), active, "back-filled customer metrics");
}
