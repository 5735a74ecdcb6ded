//! End-to-end dataset generation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::{
    backfill_customer_metrics, generate_customer_base, generate_product_catalog,
    TransactionGenerator, TransactionSettings,
};
use crate::config::GeneratorSettings;
use crate::error::DataResult;
use crate::rules::BusinessRules;
use crate::types::{Customer, Product, Transaction};

/// The three generated tables.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
}

/// Generate products, customers and transactions, then back-fill the
/// customer metrics.
///
/// Every draw comes from one generator seeded with `settings.seed`, so equal
/// settings and rules produce equal datasets.
pub fn generate_dataset(settings: &GeneratorSettings, rules: &BusinessRules) -> DataResult<Dataset> {
    generate_dataset_with_progress(settings, rules, |_| {})
}

/// [`generate_dataset`] reporting the running transaction count.
pub fn generate_dataset_with_progress<F>(
    settings: &GeneratorSettings,
    rules: &BusinessRules,
    on_transaction: F,
) -> DataResult<Dataset>
where
    F: FnMut(u32),
{
    settings.validate()?;
    rules.validate()?;

    let mut rng = StdRng::seed_from_u64(settings.seed);

    let products = generate_product_catalog(rules, settings.start_date, &mut rng);
    info!(products = products.len(), "generated product catalog");

    let mut customers =
        generate_customer_base(rules, settings.customer_count, settings.end_date, &mut rng);
    info!(customers = customers.len(), "generated customer base");

    let transactions = {
        let mut generator = TransactionGenerator::new(
            rules,
            TransactionSettings {
                start_date: settings.start_date,
                end_date: settings.end_date,
                total_transactions: settings.total_transactions,
                apply_demand_adjustment: settings.apply_demand_adjustment,
            },
            &products,
            &customers,
        );
        generator.generate_with_progress(&mut rng, on_transaction)
    };
    info!(transactions = transactions.len(), "generated transactions");

    backfill_customer_metrics(&mut customers, &transactions);
    info!(
        active = customers.iter().filter(|c| c.is_active()).count(),
        "updated customer metrics"
    );

    Ok(Dataset {
        products,
        customers,
        transactions,
    })
}
