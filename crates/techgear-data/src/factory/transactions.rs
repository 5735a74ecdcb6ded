//! Sales transaction generation.
//!
//! Transactions are produced category by category. Per-category volume is
//! proportional to the category's revenue share, and every transaction
//! references an existing customer and a product from its category.

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand_distr::Normal;
use tracing::{debug, warn};

use super::WeightedChoice;
use crate::rules::{BusinessRules, CategoryRule};
use crate::types::{round_cents, Customer, Product, Transaction};

/// Average days per year used by the growth factor.
const DAYS_PER_YEAR: f64 = 365.25;

/// Order window and pricing switches for the transaction generator.
#[derive(Debug, Clone)]
pub struct TransactionSettings {
    /// First possible order date.
    pub start_date: NaiveDate,
    /// Last possible order date.
    pub end_date: NaiveDate,
    /// Exact number of transactions to produce.
    pub total_transactions: u32,
    /// Scale sampled unit prices by the demand adjustment.
    pub apply_demand_adjustment: bool,
}

/// Split `total` transactions across categories by revenue share.
///
/// Each category gets `floor(total × share)`; the truncation remainder goes
/// to the category with the largest allocation (first one on ties), so the
/// counts always sum to `total`.
pub fn allocate_category_counts(categories: &[CategoryRule], total: u32) -> Vec<u32> {
    let mut counts: Vec<u32> = categories
        .iter()
        .map(|c| (total as f64 * c.revenue_share) as u32)
        .collect();

    let allocated: u32 = counts.iter().sum();
    if allocated != total {
        let mut largest = 0;
        for (i, &n) in counts.iter().enumerate() {
            if n > counts[largest] {
                largest = i;
            }
        }
        if let Some(n) = counts.get_mut(largest) {
            *n = (*n + total).saturating_sub(allocated);
        }
    }

    counts
}

/// Demand multipliers for one order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandAdjustment {
    /// Compound year-over-year growth since the start date.
    pub growth_factor: f64,
    /// Seasonal boost of the category in the order month.
    pub seasonal_multiplier: f64,
}

impl DemandAdjustment {
    /// Compute the adjustment for a category and order date.
    pub fn compute(
        category: &CategoryRule,
        order_date: NaiveDate,
        start_date: NaiveDate,
        yearly_growth: f64,
    ) -> Self {
        let years_elapsed = (order_date - start_date).num_days() as f64 / DAYS_PER_YEAR;
        Self {
            growth_factor: (1.0 + yearly_growth).powf(years_elapsed),
            seasonal_multiplier: category.seasonal_multiplier(order_date),
        }
    }

    /// Product of both multipliers.
    pub fn combined(&self) -> f64 {
        self.growth_factor * self.seasonal_multiplier
    }
}

/// Unit price floor: never more than 10% below the sampled price.
///
/// For a positive price this is the identity.
pub fn apply_price_floor(price: f64) -> f64 {
    (price * 0.9).max(price)
}

/// Unnormalised selection weight of a customer for an order date:
/// `exp(-(registration_date - order_date) / scale_days)`.
pub fn recency_weight(registration_date: NaiveDate, order_date: NaiveDate, scale_days: f64) -> f64 {
    let days = (registration_date - order_date).num_days() as f64;
    (-days / scale_days).exp()
}

/// Customer selection distribution.
///
/// Changing the order date multiplies every recency weight by the same
/// factor, so a single table anchored at one reference date gives the
/// selection probabilities for every order date.
#[derive(Debug, Clone)]
pub struct CustomerSampler {
    choice: WeightedChoice,
}

impl CustomerSampler {
    /// Build the sampler; falls back to uniform selection when the weights
    /// are unusable. Returns `None` for an empty customer base.
    pub fn new(customers: &[Customer], reference_date: NaiveDate, scale_days: f64) -> Option<Self> {
        let weights: Vec<f64> = customers
            .iter()
            .map(|c| recency_weight(c.registration_date, reference_date, scale_days))
            .collect();

        WeightedChoice::or_uniform(&weights).map(|choice| Self { choice })
    }

    /// Probability of selecting the customer at `index`.
    pub fn probability(&self, index: usize) -> f64 {
        self.choice.probability(index)
    }

    /// Draw a customer index.
    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        self.choice.sample(rng)
    }
}

/// Transaction generator over an existing catalog and customer base.
pub struct TransactionGenerator<'a> {
    rules: &'a BusinessRules,
    settings: TransactionSettings,
    products: &'a [Product],
    customers: &'a [Customer],
    /// Product indices per category, aligned with `rules.categories`.
    products_by_category: Vec<Vec<usize>>,
    customer_sampler: Option<CustomerSampler>,
    quantity_choice: Option<WeightedChoice>,
    channel_choice: Option<WeightedChoice>,
    region_choice: Option<WeightedChoice>,
    price_jitter: Option<Normal<f64>>,
    next_id: u32,
}

impl<'a> TransactionGenerator<'a> {
    /// Create a generator.
    pub fn new(
        rules: &'a BusinessRules,
        settings: TransactionSettings,
        products: &'a [Product],
        customers: &'a [Customer],
    ) -> Self {
        let products_by_category = rules
            .categories
            .iter()
            .map(|category| {
                products
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.category == category.name)
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();

        let orders = &rules.orders;

        Self {
            customer_sampler: CustomerSampler::new(
                customers,
                settings.end_date,
                rules.customers.recency_scale_days,
            ),
            quantity_choice: WeightedChoice::or_uniform(&orders.quantity_weights),
            channel_choice: WeightedChoice::or_uniform(
                &rules.sales_channels.iter().map(|c| c.share).collect::<Vec<_>>(),
            ),
            region_choice: WeightedChoice::or_uniform(
                &rules.regions.iter().map(|r| r.share).collect::<Vec<_>>(),
            ),
            price_jitter: Normal::new(1.0, orders.price_jitter).ok(),
            rules,
            settings,
            products,
            customers,
            products_by_category,
            next_id: 1,
        }
    }

    /// Number of transactions generated so far.
    pub fn generated(&self) -> u32 {
        self.next_id - 1
    }

    /// Generate the full transaction log.
    pub fn generate(&mut self, rng: &mut impl Rng) -> Vec<Transaction> {
        self.generate_with_progress(rng, |_| {})
    }

    /// Generate the full transaction log, reporting the running count after
    /// each transaction.
    pub fn generate_with_progress<F>(&mut self, rng: &mut impl Rng, mut on_progress: F) -> Vec<Transaction>
    where
        F: FnMut(u32),
    {
        let counts = allocate_category_counts(&self.rules.categories, self.settings.total_transactions);
        let mut transactions = Vec::with_capacity(self.settings.total_transactions as usize);

        let Some(sampler) = self.customer_sampler.take() else {
            warn!(
                total = self.settings.total_transactions,
                "no customers to attribute transactions to"
            );
            return transactions;
        };

        let rules = self.rules;
        for (idx, (category, &count)) in rules.categories.iter().zip(counts.iter()).enumerate() {
            if self.products_by_category[idx].is_empty() {
                warn!(category = %category.name, count, "skipping category without products");
                continue;
            }

            debug!(category = %category.name, count, "generating transactions");
            for _ in 0..count {
                let tx = self.generate_one(idx, category, &sampler, rng);
                transactions.push(tx);
                on_progress(self.generated());
            }
        }

        self.customer_sampler = Some(sampler);
        transactions
    }

    fn generate_one(
        &mut self,
        category_idx: usize,
        category: &CategoryRule,
        sampler: &CustomerSampler,
        rng: &mut impl Rng,
    ) -> Transaction {
        let orders = &self.rules.orders;

        // 1. Order date, uniform over the window
        let window = (self.settings.end_date - self.settings.start_date).num_days();
        let order_date = self.settings.start_date + Duration::days(rng.gen_range(0..=window));

        // 2. Demand adjustment
        let adjustment =
            DemandAdjustment::compute(category, order_date, self.settings.start_date, orders.yearly_growth);

        // 3. Customer, weighted by registration recency
        let customer = &self.customers[sampler.sample(rng)];

        // 4. Product, uniform within the category
        let candidates = &self.products_by_category[category_idx];
        let product = &self.products[candidates[rng.gen_range(0..candidates.len())]];

        // 5. Quantity
        let quantity = match &self.quantity_choice {
            Some(choice) => choice.sample(rng) as u32 + 1,
            None => 1,
        };

        // 6. Unit price around retail
        let jitter = match &self.price_jitter {
            Some(dist) => dist.sample(rng),
            None => 1.0,
        };
        let mut unit_price = product.retail_price * jitter;
        if self.settings.apply_demand_adjustment {
            unit_price *= adjustment.combined();
        }
        unit_price = round_cents(apply_price_floor(unit_price));

        // 7. Segment uplift
        let segment_multiplier = self.rules.aov_multiplier(customer.customer_segment);
        let uplift_cap = orders.max_segment_uplift.min(segment_multiplier);
        if segment_multiplier > 1.0 && uplift_cap > 1.0 {
            unit_price = round_cents(unit_price * rng.gen_range(1.0..uplift_cap));
        }

        // 8-11. Amounts
        let subtotal = unit_price * quantity as f64;

        let discount_amount = if rng.gen::<f64>() < orders.discount_rate {
            let fraction = if orders.min_discount < orders.max_discount {
                rng.gen_range(orders.min_discount..orders.max_discount)
            } else {
                orders.min_discount
            };
            round_cents(subtotal * fraction)
        } else {
            0.0
        };

        let shipping_cost = if subtotal > orders.free_shipping_threshold {
            0.0
        } else {
            orders.shipping_rates.choose(rng).copied().unwrap_or(0.0)
        };

        let total_amount = round_cents(subtotal - discount_amount + shipping_cost);

        // 12. Channel and region
        let sales_channel = match &self.channel_choice {
            Some(choice) => choice.choose(&self.rules.sales_channels, rng).name.clone(),
            None => String::new(),
        };
        let region = match &self.region_choice {
            Some(choice) => choice.choose(&self.rules.regions, rng).name.clone(),
            None => String::new(),
        };

        let transaction_id = Transaction::format_id(self.next_id);
        self.next_id += 1;

        Transaction {
            transaction_id,
            customer_id: customer.customer_id.clone(),
            order_date,
            product_category: category.name.clone(),
            product_name: product.product_name.clone(),
            product_id: product.product_id.clone(),
            quantity,
            unit_price,
            total_amount,
            discount_amount,
            shipping_cost,
            sales_channel,
            region,
            // 13. Segment snapshot
            customer_type: customer.customer_segment,
        }
    }
}
