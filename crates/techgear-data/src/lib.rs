//! TechGear Plus synthetic sales dataset.
//!
//! Generates a reproducible retail dataset for a consumer electronics
//! business (product catalog, customer base and transaction log) and
//! validates the persisted tables.
//!
//! # Features
//!
//! - **Business Rules**: Category revenue shares, price bands, seasonal boosts, channel and segment mixes
//! - **Dataset Factory**: Seeded generation of products, customers and transactions with metrics back-fill
//! - **Tables**: CSV persistence through polars
//! - **Validation**: Completeness, uniqueness and business logic checks with a quality score
//!
//! # Example
//!
//! ```ignore
//! use techgear_data::prelude::*;
//!
//! let config = TechGearConfig::load(None)?;
//! let dataset = generate_dataset(&config.generator, &config.rules)?;
//! write_dataset(&dataset, &config.generator.output_dir)?;
//!
//! let report = validate_dataset(&config.validator)?;
//! println!("quality score: {:.1}%", report.quality_score());
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod factory;
pub mod rules;
pub mod tables;
pub mod types;
pub mod validation;

pub use error::{DataError, DataResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{GeneratorSettings, TechGearConfig, ValidatorSettings};
    pub use crate::error::{DataError, DataResult};
    pub use crate::factory::{
        backfill_customer_metrics, generate_dataset, generate_dataset_with_progress, Dataset,
        DatasetSummary,
    };
    pub use crate::rules::BusinessRules;
    pub use crate::tables::{load_tables, write_dataset, DatasetPaths, LoadedTables};
    pub use crate::types::{Customer, CustomerSegment, Product, Transaction};
    pub use crate::validation::{validate_dataset, validate_tables, CheckStatus, ValidationReport};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
