//! Synthetic dataset generation.
//!
//! Generation runs in two phases: the catalog, customer base and transaction
//! log are drawn from a single seeded random source, then the customer
//! aggregates are back-filled from the transactions.
//!
//! # Example
//!
//! ```ignore
//! use techgear_data::config::GeneratorSettings;
//! use techgear_data::factory::{generate_dataset, DatasetSummary};
//! use techgear_data::rules::BusinessRules;
//!
//! let dataset = generate_dataset(&GeneratorSettings::default(), &BusinessRules::default())?;
//! let summary = DatasetSummary::from_transactions(&dataset.transactions);
//! println!("revenue: ${:.2}", summary.total_revenue);
//! ```

mod catalog;
mod customers;
mod metrics;
mod pipeline;
mod sampling;
mod summary;
mod transactions;

pub use catalog::generate_product_catalog;
pub use customers::generate_customer_base;
pub use metrics::backfill_customer_metrics;
pub use pipeline::{generate_dataset, generate_dataset_with_progress, Dataset};
pub use sampling::WeightedChoice;
pub use summary::{DatasetSummary, RevenueShare, SegmentStats};
pub use transactions::{
    allocate_category_counts, apply_price_floor, recency_weight, CustomerSampler,
    DemandAdjustment, TransactionGenerator, TransactionSettings,
};
