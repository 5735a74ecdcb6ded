//! Customer base generation.

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand_distr::Exp;

use super::WeightedChoice;
use crate::rules::BusinessRules;
use crate::types::{Customer, CustomerSegment};

/// Generate `count` customers registered up to `end_date`.
///
/// Tenure is drawn from an exponential distribution (mean
/// `mean_tenure_days`) and capped at `max_tenure_days`, which skews the
/// base towards recent registrations.
pub fn generate_customer_base(
    rules: &BusinessRules,
    count: u32,
    end_date: NaiveDate,
    rng: &mut impl Rng,
) -> Vec<Customer> {
    let policy = &rules.customers;
    let tenure = Exp::new(1.0 / policy.mean_tenure_days).ok();
    let segments: Vec<CustomerSegment> = rules.segments.iter().map(|s| s.segment).collect();
    let segment_choice = WeightedChoice::or_uniform(
        &rules.segments.iter().map(|s| s.share).collect::<Vec<_>>(),
    );

    let mut customers = Vec::with_capacity(count as usize);
    for seq in 1..=count {
        let days_ago = match &tenure {
            Some(dist) => dist.sample(rng) as i64,
            None => 0,
        };
        let registration_date = end_date - Duration::days(days_ago.min(policy.max_tenure_days));

        let customer_segment = match &segment_choice {
            Some(choice) => *choice.choose(&segments, rng),
            None => CustomerSegment::default(),
        };

        let acquisition_channel = rules
            .acquisition_channels
            .choose(rng)
            .cloned()
            .unwrap_or_default();

        customers.push(Customer::new(
            Customer::format_id(seq),
            registration_date,
            customer_segment,
            acquisition_channel,
        ));
    }

    customers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 28).unwrap()
    }

    #[test]
    fn test_generate_customers() {
        let rules = BusinessRules::default();
        let mut rng = StdRng::seed_from_u64(42);
        let customers = generate_customer_base(&rules, 100, end(), &mut rng);

        assert_eq!(customers.len(), 100);
        for (i, c) in customers.iter().enumerate() {
            assert_eq!(c.customer_id, Customer::format_id(i as u32 + 1));
            assert_eq!(c.total_orders, 0);
            assert_eq!(c.total_spent, 0.0);
            assert!(c.last_order_date.is_none());
            assert!(rules.acquisition_channels.contains(&c.acquisition_channel));
        }
    }

    #[test]
    fn test_registration_window() {
        let rules = BusinessRules::default();
        let mut rng = StdRng::seed_from_u64(5);
        let customers = generate_customer_base(&rules, 5000, end(), &mut rng);
        let earliest = end() - Duration::days(1000);

        for c in &customers {
            assert!(c.registration_date <= end());
            assert!(c.registration_date >= earliest);
        }

        // Exponential tenure: most customers registered within the last year
        let recent = customers
            .iter()
            .filter(|c| (end() - c.registration_date).num_days() < 365)
            .count();
        assert!(recent > 2500, "recent = {recent}");

        // The cap is hit by the tail of the distribution
        assert!(customers.iter().any(|c| c.registration_date == earliest));
    }

    #[test]
    fn test_segment_distribution() {
        let rules = BusinessRules::default();
        let mut rng = StdRng::seed_from_u64(11);
        let customers = generate_customer_base(&rules, 10_000, end(), &mut rng);

        let share = |segment| {
            customers.iter().filter(|c| c.customer_segment == segment).count() as f64 / 10_000.0
        };

        assert!((share(CustomerSegment::New) - 0.40).abs() < 0.03);
        assert!((share(CustomerSegment::Returning) - 0.45).abs() < 0.03);
        assert!((share(CustomerSegment::Vip) - 0.15).abs() < 0.03);
    }
}
