//! Configuration management for dataset generation and validation.
//!
//! Settings are layered with the `config` crate: built-in defaults, an
//! optional TOML file, then `TECHGEAR__*` environment variables.
//!
//! # Example
//!
//! ```ignore
//! use techgear_data::config::TechGearConfig;
//!
//! let config = TechGearConfig::load(Some("techgear.toml".as_ref()))?;
//! println!("{} transactions", config.generator.total_transactions);
//! ```
//!
//! ```toml
//! [generator]
//! seed = 7
//! total_transactions = 1000
//! output_dir = "out"
//!
//! [validator]
//! max_order_date = "2026-06-30"
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};
use crate::rules::BusinessRules;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TECHGEAR";

/// Default directory holding the persisted tables.
pub const DEFAULT_DATA_DIR: &str = "data/raw";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechGearConfig {
    /// Generator settings.
    #[serde(default)]
    pub generator: GeneratorSettings,

    /// Validator settings.
    #[serde(default)]
    pub validator: ValidatorSettings,

    /// Business rules.
    #[serde(default)]
    pub rules: BusinessRules,
}

/// Generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Seed for the single random source.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// First possible order date.
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Last possible order date.
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,

    /// Exact number of transactions to generate.
    #[serde(default = "default_total_transactions")]
    pub total_transactions: u32,

    /// Number of customers to generate.
    #[serde(default = "default_customer_count")]
    pub customer_count: u32,

    /// Directory the tables are written to.
    #[serde(default = "default_data_dir")]
    pub output_dir: PathBuf,

    /// Scale sampled unit prices by the growth and seasonal multipliers.
    #[serde(default)]
    pub apply_demand_adjustment: bool,
}

fn default_seed() -> u64 {
    42
}

fn default_start_date() -> NaiveDate {
    date(2022, 1, 1)
}

fn default_end_date() -> NaiveDate {
    date(2025, 9, 28)
}

fn default_total_transactions() -> u32 {
    50_000
}

fn default_customer_count() -> u32 {
    15_000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            start_date: default_start_date(),
            end_date: default_end_date(),
            total_transactions: default_total_transactions(),
            customer_count: default_customer_count(),
            output_dir: default_data_dir(),
            apply_demand_adjustment: false,
        }
    }
}

impl GeneratorSettings {
    /// Number of days in the order window, inclusive of both ends.
    pub fn window_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Validate the settings.
    pub fn validate(&self) -> DataResult<()> {
        if self.end_date < self.start_date {
            return Err(DataError::Config(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        if self.customer_count == 0 {
            return Err(DataError::Config("customer count must be greater than 0".into()));
        }
        Ok(())
    }
}

/// Validator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorSettings {
    /// Directory the tables are read from.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Earliest accepted order date.
    #[serde(default = "default_min_order_date")]
    pub min_order_date: NaiveDate,

    /// Latest accepted order date.
    #[serde(default = "default_max_order_date")]
    pub max_order_date: NaiveDate,

    /// Largest accepted sum of absolute total differences.
    #[serde(default = "default_revenue_tolerance")]
    pub revenue_tolerance: f64,

    /// Average order value above which the business is labelled premium.
    #[serde(default = "default_premium_threshold")]
    pub premium_aov_threshold: f64,
}

fn default_min_order_date() -> NaiveDate {
    date(2022, 1, 1)
}

fn default_max_order_date() -> NaiveDate {
    date(2025, 12, 31)
}

fn default_revenue_tolerance() -> f64 {
    1.0
}

fn default_premium_threshold() -> f64 {
    500.0
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            min_order_date: default_min_order_date(),
            max_order_date: default_max_order_date(),
            revenue_tolerance: default_revenue_tolerance(),
            premium_aov_threshold: default_premium_threshold(),
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

impl TechGearConfig {
    /// Load configuration from an optional TOML file and the environment.
    pub fn load(path: Option<&Path>) -> DataResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        builder = builder.add_source(environment());

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string and the environment.
    pub fn from_toml_str(content: &str) -> DataResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .add_source(environment());

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> DataResult<()> {
        self.generator.validate()?;
        self.rules.validate()?;
        if self.validator.max_order_date < self.validator.min_order_date {
            return Err(DataError::Config(format!(
                "validator date window {}..={} is empty",
                self.validator.min_order_date, self.validator.max_order_date
            )));
        }
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TechGearConfig::default();
        assert_eq!(config.generator.seed, 42);
        assert_eq!(config.generator.total_transactions, 50_000);
        assert_eq!(config.generator.customer_count, 15_000);
        assert_eq!(config.generator.window_days(), 1367);
        assert_eq!(config.validator.max_order_date, date(2025, 12, 31));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str_overrides() {
        let config = TechGearConfig::from_toml_str(
            r#"
            [generator]
            seed = 7
            total_transactions = 100
            output_dir = "out"

            [validator]
            max_order_date = "2026-06-30"
            "#,
        )
        .unwrap();

        assert_eq!(config.generator.seed, 7);
        assert_eq!(config.generator.total_transactions, 100);
        assert_eq!(config.generator.output_dir, PathBuf::from("out"));
        assert_eq!(config.generator.customer_count, 15_000);
        assert_eq!(config.validator.max_order_date, date(2026, 6, 30));
        assert_eq!(config.rules, BusinessRules::default());
    }

    #[test]
    fn test_rules_section_overrides_tables() {
        let config = TechGearConfig::from_toml_str(
            r#"
            [[rules.regions]]
            name = "Everywhere"
            share = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.rules.regions.len(), 1);
        assert_eq!(config.rules.regions[0].name, "Everywhere");
        assert_eq!(config.rules.categories.len(), 5);
    }

    #[test]
    fn test_inverted_window_rejected() {
        let result = TechGearConfig::from_toml_str(
            r#"
            [generator]
            start_date = "2025-01-01"
            end_date = "2024-01-01"
            "#,
        );
        assert!(matches!(result, Err(DataError::Config(_))));
    }
}
