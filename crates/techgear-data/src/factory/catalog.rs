//! Product catalog generation.

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand_distr::Normal;
use tracing::debug;

use crate::rules::{BusinessRules, CategoryRule};
use crate::types::{round_cents, Product};

/// Generate the product catalog, category by category.
///
/// Each category receives between `min_products` and `max_products`
/// products with normally distributed prices clamped to the category band.
/// Product IDs are sequential across categories.
pub fn generate_product_catalog(
    rules: &BusinessRules,
    start_date: NaiveDate,
    rng: &mut impl Rng,
) -> Vec<Product> {
    let policy = &rules.catalog;
    let mut products = Vec::new();
    let mut next_id = 1u32;

    for category in &rules.categories {
        let count = rng.gen_range(policy.min_products..=policy.max_products);
        debug!(category = %category.name, count, "generating products");

        for _ in 0..count {
            products.push(generate_product(category, next_id, rules, start_date, rng));
            next_id += 1;
        }
    }

    products
}

fn generate_product(
    category: &CategoryRule,
    seq: u32,
    rules: &BusinessRules,
    start_date: NaiveDate,
    rng: &mut impl Rng,
) -> Product {
    let policy = &rules.catalog;

    let brand = category.brands.choose(rng).map(String::as_str).unwrap_or_default();
    let model = category.models.choose(rng).map(String::as_str).unwrap_or_default();

    let raw_price = sample_price(category, policy.price_spread, rng);
    let retail_price = round_cents(category.clamp_price(raw_price));
    let cost_price = round_cents(category.cost_for(retail_price));

    let launch_offset = rng.gen_range(0..=policy.launch_window_days);
    let supplier = rng.gen_range(1..=policy.supplier_count);

    Product {
        product_id: Product::format_id(seq),
        product_name: format!("{brand} {model}"),
        category: category.name.clone(),
        retail_price,
        cost_price,
        launch_date: start_date + Duration::days(launch_offset),
        supplier: format!("Supplier_{supplier}"),
    }
}

/// Sample from Normal(avg, spread × avg); degenerate spreads yield the average.
fn sample_price(category: &CategoryRule, spread: f64, rng: &mut impl Rng) -> f64 {
    match Normal::new(category.avg_price, category.avg_price * spread) {
        Ok(dist) => dist.sample(rng),
        Err(_) => category.avg_price,
    }
}
