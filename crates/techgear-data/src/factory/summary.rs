//! Post-generation dataset summary.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::{CustomerSegment, Transaction};

/// Revenue attributed to one label (category or sales channel).
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueShare {
    /// Category or channel name.
    pub name: String,
    /// Sum of `total_amount`.
    pub revenue: f64,
    /// Share of total revenue in percent.
    pub percent: f64,
}

/// Order statistics of one customer segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentStats {
    pub segment: CustomerSegment,
    pub orders: usize,
    pub average_order_value: f64,
}

/// Headline figures of a generated transaction log.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    /// Number of transactions.
    pub transactions: usize,
    /// Sum of `total_amount`.
    pub total_revenue: f64,
    /// Revenue per transaction.
    pub average_order_value: f64,
    /// Earliest and latest order date.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Revenue per category, descending.
    pub by_category: Vec<RevenueShare>,
    /// Revenue per sales channel, descending.
    pub by_channel: Vec<RevenueShare>,
    /// Orders per segment in reporting order; segments without orders are omitted.
    pub by_segment: Vec<SegmentStats>,
}

impl DatasetSummary {
    /// Summarize a transaction log.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total_revenue: f64 = transactions.iter().map(|t| t.total_amount).sum();
        let average_order_value = if transactions.is_empty() {
            0.0
        } else {
            total_revenue / transactions.len() as f64
        };

        let date_range = transactions
            .iter()
            .map(|t| t.order_date)
            .min()
            .zip(transactions.iter().map(|t| t.order_date).max());

        let by_category = revenue_shares(
            transactions.iter().map(|t| (t.product_category.as_str(), t.total_amount)),
            total_revenue,
        );
        let by_channel = revenue_shares(
            transactions.iter().map(|t| (t.sales_channel.as_str(), t.total_amount)),
            total_revenue,
        );

        let by_segment = CustomerSegment::ALL
            .iter()
            .filter_map(|&segment| {
                let (orders, revenue) = transactions
                    .iter()
                    .filter(|t| t.customer_type == segment)
                    .fold((0usize, 0.0f64), |(n, sum), t| (n + 1, sum + t.total_amount));
                (orders > 0).then(|| SegmentStats {
                    segment,
                    orders,
                    average_order_value: revenue / orders as f64,
                })
            })
            .collect();

        Self {
            transactions: transactions.len(),
            total_revenue,
            average_order_value,
            date_range,
            by_category,
            by_channel,
            by_segment,
        }
    }
}

fn revenue_shares<'a>(rows: impl Iterator<Item = (&'a str, f64)>, total: f64) -> Vec<RevenueShare> {
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for (name, amount) in rows {
        *sums.entry(name).or_insert(0.0) += amount;
    }

    let mut shares: Vec<RevenueShare> = sums
        .into_iter()
        .map(|(name, revenue)| RevenueShare {
            name: name.to_string(),
            revenue,
            percent: if total > 0.0 { revenue / total * 100.0 } else { 0.0 },
        })
        .collect();
    shares.sort_by(|a, b| b.revenue.total_cmp(&a.revenue).then_with(|| a.name.cmp(&b.name)));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(category: &str, channel: &str, segment: CustomerSegment, day: u32, total: f64) -> Transaction {
        Transaction {
            transaction_id: Transaction::format_id(day),
            customer_id: "C000001".into(),
            order_date: NaiveDate::from_ymd_opt(2023, 3, day).unwrap(),
            product_category: category.into(),
            product_name: "Item".into(),
            product_id: "P00001".into(),
            quantity: 1,
            unit_price: total,
            total_amount: total,
            discount_amount: 0.0,
            shipping_cost: 0.0,
            sales_channel: channel.into(),
            region: "West Coast".into(),
            customer_type: segment,
        }
    }

    #[test]
    fn test_summary_figures() {
        let transactions = vec![
            tx("Laptops & Computers", "Online Direct", CustomerSegment::Vip, 3, 600.0),
            tx("Smart Home", "Amazon", CustomerSegment::New, 1, 100.0),
            tx("Smart Home", "Online Direct", CustomerSegment::New, 9, 300.0),
        ];
        let summary = DatasetSummary::from_transactions(&transactions);

        assert_eq!(summary.transactions, 3);
        assert_eq!(summary.total_revenue, 1000.0);
        assert!((summary.average_order_value - 333.333).abs() < 0.001);
        assert_eq!(
            summary.date_range,
            Some((
                NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 3, 9).unwrap()
            ))
        );

        assert_eq!(summary.by_category[0].name, "Laptops & Computers");
        assert_eq!(summary.by_category[0].percent, 60.0);
        assert_eq!(summary.by_category[1].revenue, 400.0);

        assert_eq!(summary.by_channel[0].name, "Online Direct");
        assert_eq!(summary.by_channel[0].revenue, 900.0);

        assert_eq!(summary.by_segment.len(), 2);
        assert_eq!(summary.by_segment[0].segment, CustomerSegment::New);
        assert_eq!(summary.by_segment[0].average_order_value, 200.0);
        assert_eq!(summary.by_segment[1].segment, CustomerSegment::Vip);
    }

    #[test]
    fn test_empty_summary() {
        let summary = DatasetSummary::from_transactions(&[]);
        assert_eq!(summary.average_order_value, 0.0);
        assert!(summary.date_range.is_none());
        assert!(summary.by_category.is_empty());
        assert!(summary.by_segment.is_empty());
    }
}
