//! Business rules for the TechGear Plus catalog.
//!
//! Rules are immutable values handed to every generation function. The
//! defaults describe the reference company: five product categories with
//! revenue shares, price bands, margins and seasonal boosts, plus the
//! sales-channel, region and customer-segment distributions. A TOML
//! `[rules]` section can replace any of the tables (see [`crate::config`]).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};
use crate::types::CustomerSegment;

/// Allowed drift of a share table from 1.0.
const SHARE_TOLERANCE: f64 = 0.01;

/// Seasonal demand window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    /// November and December.
    Holiday,
    /// August.
    BackToSchool,
    /// June and July.
    Summer,
}

impl Season {
    /// Season a calendar month (1-12) falls into, if any.
    pub fn for_month(month: u32) -> Option<Self> {
        match month {
            11 | 12 => Some(Season::Holiday),
            8 => Some(Season::BackToSchool),
            6 | 7 => Some(Season::Summer),
            _ => None,
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Season::Holiday => "holiday",
            Season::BackToSchool => "back_to_school",
            Season::Summer => "summer",
        }
    }
}

/// Per-season demand boosts for one category. Missing seasons mean no boost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonalBoosts {
    /// Boost applied in November and December.
    #[serde(default)]
    pub holiday: Option<f64>,
    /// Boost applied in August.
    #[serde(default)]
    pub back_to_school: Option<f64>,
    /// Boost applied in June and July.
    #[serde(default)]
    pub summer: Option<f64>,
}

impl SeasonalBoosts {
    /// Boost for a season, if the category has one.
    pub fn get(&self, season: Season) -> Option<f64> {
        match season {
            Season::Holiday => self.holiday,
            Season::BackToSchool => self.back_to_school,
            Season::Summer => self.summer,
        }
    }
}

/// Rules for a single product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category name, persisted as `category` / `product_category`.
    pub name: String,
    /// Fraction of total transaction volume allocated to this category.
    pub revenue_share: f64,
    /// Centre of the retail price distribution.
    pub avg_price: f64,
    /// Lower retail price bound.
    pub min_price: f64,
    /// Upper retail price bound.
    pub max_price: f64,
    /// Gross margin used to derive the cost price.
    pub margin: f64,
    /// Seasonal demand boosts.
    #[serde(default)]
    pub seasonal_boost: SeasonalBoosts,
    /// Brand names used for product naming.
    pub brands: Vec<String>,
    /// Model names used for product naming.
    pub models: Vec<String>,
}

impl CategoryRule {
    #[allow(clippy::too_many_arguments)]
    fn new(
        name: &str,
        revenue_share: f64,
        avg_price: f64,
        price_range: (f64, f64),
        margin: f64,
        seasonal_boost: SeasonalBoosts,
        brands: &[&str],
        models: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            revenue_share,
            avg_price,
            min_price: price_range.0,
            max_price: price_range.1,
            margin,
            seasonal_boost,
            brands: brands.iter().map(|s| s.to_string()).collect(),
            models: models.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Clamp a sampled price into the category's bounds.
    pub fn clamp_price(&self, price: f64) -> f64 {
        price.max(self.min_price).min(self.max_price)
    }

    /// Cost price for a retail price, before rounding.
    pub fn cost_for(&self, retail_price: f64) -> f64 {
        retail_price * (1.0 - self.margin)
    }

    /// Seasonal demand multiplier for an order date.
    pub fn seasonal_multiplier(&self, date: NaiveDate) -> f64 {
        Season::for_month(date.month())
            .and_then(|season| self.seasonal_boost.get(season))
            .unwrap_or(1.0)
    }
}

/// Sales channel with its traffic characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRule {
    /// Channel name.
    pub name: String,
    /// Share of orders placed through this channel.
    pub share: f64,
    /// Visitor-to-order conversion rate.
    pub conversion_rate: f64,
    /// Customer acquisition cost in dollars.
    pub acquisition_cost: f64,
}

/// Named entry of a categorical distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRule {
    /// Label written to the table.
    pub name: String,
    /// Probability of the label.
    pub share: f64,
}

/// Customer segment distribution and spend behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRule {
    /// Segment.
    pub segment: CustomerSegment,
    /// Share of the customer base.
    pub share: f64,
    /// Average-order-value multiplier (New < Returning < VIP).
    pub aov_multiplier: f64,
}

/// Catalog generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogPolicy {
    /// Minimum products per category (inclusive).
    pub min_products: u32,
    /// Maximum products per category (inclusive).
    pub max_products: u32,
    /// Price standard deviation as a fraction of the category average.
    pub price_spread: f64,
    /// Launch dates fall within this many days after the start date.
    pub launch_window_days: i64,
    /// Number of synthetic suppliers.
    pub supplier_count: u32,
}

impl Default for CatalogPolicy {
    fn default() -> Self {
        Self {
            min_products: 15,
            max_products: 25,
            price_spread: 0.3,
            launch_window_days: 700,
            supplier_count: 20,
        }
    }
}

/// Customer base parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerPolicy {
    /// Mean tenure in days of the exponential registration draw.
    pub mean_tenure_days: f64,
    /// Tenure cap in days.
    pub max_tenure_days: i64,
    /// Recency scale in days for customer selection weights.
    pub recency_scale_days: f64,
}

impl Default for CustomerPolicy {
    fn default() -> Self {
        Self {
            mean_tenure_days: 365.0,
            max_tenure_days: 1000,
            recency_scale_days: 180.0,
        }
    }
}

/// Order pricing, discount and shipping parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderPolicy {
    /// Probabilities of ordering 1, 2, 3, ... units.
    pub quantity_weights: Vec<f64>,
    /// Standard deviation of the unit price jitter around retail.
    pub price_jitter: f64,
    /// Upper bound of the segment uplift multiplier.
    pub max_segment_uplift: f64,
    /// Fraction of orders that receive a discount.
    pub discount_rate: f64,
    /// Smallest discount as a fraction of the subtotal.
    pub min_discount: f64,
    /// Largest discount as a fraction of the subtotal.
    pub max_discount: f64,
    /// Subtotals above this ship for free.
    pub free_shipping_threshold: f64,
    /// Flat shipping rates charged below the threshold.
    pub shipping_rates: Vec<f64>,
    /// Year-over-year growth rate of demand.
    pub yearly_growth: f64,
}

impl Default for OrderPolicy {
    fn default() -> Self {
        Self {
            quantity_weights: vec![0.70, 0.15, 0.08, 0.04, 0.03],
            price_jitter: 0.05,
            max_segment_uplift: 1.2,
            discount_rate: 0.10,
            min_discount: 0.05,
            max_discount: 0.20,
            free_shipping_threshold: 75.0,
            shipping_rates: vec![5.99, 7.99, 9.99],
            yearly_growth: 0.15,
        }
    }
}

/// Complete set of business rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRules {
    /// Product categories in generation order.
    pub categories: Vec<CategoryRule>,
    /// Sales channel distribution.
    pub sales_channels: Vec<ChannelRule>,
    /// Shipping region distribution.
    pub regions: Vec<ShareRule>,
    /// Customer segment distribution.
    pub segments: Vec<SegmentRule>,
    /// Acquisition channels, drawn uniformly.
    pub acquisition_channels: Vec<String>,
    /// Catalog parameters.
    pub catalog: CatalogPolicy,
    /// Customer base parameters.
    pub customers: CustomerPolicy,
    /// Order parameters.
    pub orders: OrderPolicy,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            sales_channels: vec![
                channel("Website", 0.65, 0.035, 45.0),
                channel("Amazon", 0.20, 0.028, 35.0),
                channel("Retail Partners", 0.10, 0.042, 25.0),
                channel("Mobile App", 0.05, 0.055, 30.0),
            ],
            regions: vec![
                share("West Coast", 0.35),
                share("Northeast", 0.25),
                share("Southeast", 0.20),
                share("Midwest", 0.15),
                share("Southwest", 0.05),
            ],
            segments: vec![
                SegmentRule {
                    segment: CustomerSegment::New,
                    share: 0.40,
                    aov_multiplier: 0.8,
                },
                SegmentRule {
                    segment: CustomerSegment::Returning,
                    share: 0.45,
                    aov_multiplier: 1.6,
                },
                SegmentRule {
                    segment: CustomerSegment::Vip,
                    share: 0.15,
                    aov_multiplier: 2.2,
                },
            ],
            acquisition_channels: [
                "Organic Search",
                "Paid Search",
                "Social Media",
                "Email Marketing",
                "Referral",
                "Direct",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            catalog: CatalogPolicy::default(),
            customers: CustomerPolicy::default(),
            orders: OrderPolicy::default(),
        }
    }
}

fn channel(name: &str, share: f64, conversion_rate: f64, acquisition_cost: f64) -> ChannelRule {
    ChannelRule {
        name: name.to_string(),
        share,
        conversion_rate,
        acquisition_cost,
    }
}

fn share(name: &str, share: f64) -> ShareRule {
    ShareRule {
        name: name.to_string(),
        share,
    }
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "Laptops & Computers",
            0.35,
            899.0,
            (399.0, 2499.0),
            0.22,
            SeasonalBoosts {
                back_to_school: Some(1.4),
                holiday: Some(1.2),
                ..Default::default()
            },
            &["TechPro", "CompuMax", "EliteBook", "PowerStation"],
            &["X1", "Pro 15", "Gaming Elite", "Business Series", "Ultra Thin"],
        ),
        CategoryRule::new(
            "Mobile & Accessories",
            0.25,
            149.0,
            (19.0, 899.0),
            0.45,
            SeasonalBoosts {
                holiday: Some(1.6),
                ..Default::default()
            },
            &["PhoneGuard", "MobiTech", "PowerCell", "ConnectPro"],
            &[
                "Wireless Charger",
                "Screen Protector",
                "Phone Case",
                "Car Mount",
                "Power Bank",
            ],
        ),
        CategoryRule::new(
            "Gaming Equipment",
            0.20,
            349.0,
            (29.0, 699.0),
            0.35,
            SeasonalBoosts {
                holiday: Some(1.8),
                summer: Some(1.3),
                ..Default::default()
            },
            &["GameMaster", "ProPlayer", "EliteGaming", "TurboGear"],
            &[
                "Mechanical Keyboard",
                "Gaming Mouse",
                "Headset Pro",
                "Controller Elite",
                "Gaming Chair",
            ],
        ),
        CategoryRule::new(
            "Audio & Headphones",
            0.15,
            199.0,
            (39.0, 599.0),
            0.40,
            SeasonalBoosts {
                holiday: Some(1.4),
                ..Default::default()
            },
            &["SoundWave", "AudioPro", "BassMax", "ClearSound"],
            &[
                "Wireless Earbuds",
                "Over-Ear Headphones",
                "Bluetooth Speaker",
                "Sound Bar",
            ],
        ),
        CategoryRule::new(
            "Smart Home Devices",
            0.05,
            179.0,
            (49.0, 449.0),
            0.28,
            SeasonalBoosts {
                holiday: Some(1.3),
                ..Default::default()
            },
            &["SmartLife", "HomeConnect", "AutoHome", "TechNest"],
            &[
                "Smart Thermostat",
                "Security Camera",
                "Smart Bulb",
                "Voice Assistant",
                "Smart Lock",
            ],
        ),
    ]
}

impl BusinessRules {
    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&CategoryRule> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Segment rule for a segment.
    pub fn segment(&self, segment: CustomerSegment) -> Option<&SegmentRule> {
        self.segments.iter().find(|s| s.segment == segment)
    }

    /// AOV multiplier of a segment (1.0 when the segment has no rule).
    pub fn aov_multiplier(&self, segment: CustomerSegment) -> f64 {
        self.segment(segment).map(|s| s.aov_multiplier).unwrap_or(1.0)
    }

    /// Validate the rules.
    pub fn validate(&self) -> DataResult<()> {
        if self.categories.is_empty() {
            return Err(DataError::Config("at least one category is required".into()));
        }

        check_shares(
            "category revenue shares",
            self.categories.iter().map(|c| c.revenue_share),
        )?;
        check_shares("sales channel shares", self.sales_channels.iter().map(|c| c.share))?;
        check_shares("region shares", self.regions.iter().map(|r| r.share))?;
        check_shares("segment shares", self.segments.iter().map(|s| s.share))?;
        check_shares(
            "quantity weights",
            self.orders.quantity_weights.iter().copied(),
        )?;

        for category in &self.categories {
            if !(category.min_price <= category.avg_price && category.avg_price <= category.max_price)
            {
                return Err(DataError::Config(format!(
                    "category '{}': average price {} outside [{}, {}]",
                    category.name, category.avg_price, category.min_price, category.max_price
                )));
            }
            if !(0.0..1.0).contains(&category.margin) {
                return Err(DataError::Config(format!(
                    "category '{}': margin {} must be in [0, 1)",
                    category.name, category.margin
                )));
            }
            if category.brands.is_empty() || category.models.is_empty() {
                return Err(DataError::Config(format!(
                    "category '{}': brand and model lists must not be empty",
                    category.name
                )));
            }
        }

        if self.acquisition_channels.is_empty() {
            return Err(DataError::Config("at least one acquisition channel is required".into()));
        }
        if self.orders.shipping_rates.is_empty() {
            return Err(DataError::Config("at least one shipping rate is required".into()));
        }
        if self.catalog.min_products == 0 || self.catalog.min_products > self.catalog.max_products
        {
            return Err(DataError::Config(format!(
                "products per category range {}..={} is invalid",
                self.catalog.min_products, self.catalog.max_products
            )));
        }
        if self.catalog.supplier_count == 0 {
            return Err(DataError::Config("supplier count must be greater than 0".into()));
        }
        if self.orders.min_discount > self.orders.max_discount {
            return Err(DataError::Config(format!(
                "discount range {}..{} is invalid",
                self.orders.min_discount, self.orders.max_discount
            )));
        }
        if self.customers.mean_tenure_days <= 0.0 || self.customers.recency_scale_days <= 0.0 {
            return Err(DataError::Config(
                "tenure and recency scales must be positive".into(),
            ));
        }
        if self.catalog.launch_window_days < 0 {
            return Err(DataError::Config(format!(
                "launch window of {} days is negative",
                self.catalog.launch_window_days
            )));
        }
        if self.customers.max_tenure_days < 0 {
            return Err(DataError::Config(format!(
                "maximum tenure of {} days is negative",
                self.customers.max_tenure_days
            )));
        }

        Ok(())
    }
}

fn check_shares(what: &str, shares: impl Iterator<Item = f64>) -> DataResult<()> {
    let mut total = 0.0;
    for s in shares {
        if !s.is_finite() || s < 0.0 {
            return Err(DataError::Config(format!("{what}: invalid share {s}")));
        }
        total += s;
    }
    if (total - 1.0).abs() > SHARE_TOLERANCE {
        return Err(DataError::Config(format!(
            "{what} must sum to 1.0, got {total}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        let rules = BusinessRules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.categories.len(), 5);
        assert_eq!(rules.acquisition_channels.len(), 6);
    }

    #[test]
    fn test_shares_must_sum_to_one() {
        let mut rules = BusinessRules::default();
        rules.regions[0].share = 0.5;
        assert!(matches!(rules.validate(), Err(DataError::Config(_))));
    }

    #[test]
    fn test_negative_day_windows_rejected() {
        let mut rules = BusinessRules::default();
        rules.catalog.launch_window_days = -1;
        assert!(matches!(rules.validate(), Err(DataError::Config(_))));

        let mut rules = BusinessRules::default();
        rules.customers.max_tenure_days = -30;
        assert!(matches!(rules.validate(), Err(DataError::Config(_))));

        let mut rules = BusinessRules::default();
        rules.catalog.launch_window_days = 0;
        rules.customers.max_tenure_days = 0;
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_average_price_outside_bounds_rejected() {
        let mut rules = BusinessRules::default();
        rules.categories[1].avg_price = 1000.0;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_seasonal_multiplier() {
        let rules = BusinessRules::default();
        let laptops = rules.category("Laptops & Computers").unwrap();
        let gaming = rules.category("Gaming Equipment").unwrap();
        let date = |m| NaiveDate::from_ymd_opt(2023, m, 15).unwrap();

        assert_eq!(laptops.seasonal_multiplier(date(12)), 1.2);
        assert_eq!(laptops.seasonal_multiplier(date(8)), 1.4);
        assert_eq!(laptops.seasonal_multiplier(date(7)), 1.0);
        assert_eq!(gaming.seasonal_multiplier(date(11)), 1.8);
        assert_eq!(gaming.seasonal_multiplier(date(6)), 1.3);
        assert_eq!(gaming.seasonal_multiplier(date(8)), 1.0);
        assert_eq!(gaming.seasonal_multiplier(date(3)), 1.0);
    }

    #[test]
    fn test_clamp_and_cost() {
        let rules = BusinessRules::default();
        let mobile = rules.category("Mobile & Accessories").unwrap();

        assert_eq!(mobile.clamp_price(5.0), 19.0);
        assert_eq!(mobile.clamp_price(1500.0), 899.0);
        assert_eq!(mobile.clamp_price(120.0), 120.0);
        assert!((mobile.cost_for(100.0) - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_multipliers_ordered() {
        let rules = BusinessRules::default();
        let new = rules.aov_multiplier(CustomerSegment::New);
        let returning = rules.aov_multiplier(CustomerSegment::Returning);
        let vip = rules.aov_multiplier(CustomerSegment::Vip);
        assert!(new < returning && returning < vip);
    }
}
