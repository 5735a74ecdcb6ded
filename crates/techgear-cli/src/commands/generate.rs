//! `techgear generate` command - Generate the dataset and write it as CSV.

use std::path::PathBuf;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use techgear_data::config::{GeneratorSettings, TechGearConfig};
use techgear_data::factory::{generate_dataset_with_progress, DatasetSummary, RevenueShare};
use techgear_data::tables::write_dataset;
use tracing::debug;

use super::{format_count, format_money};
use crate::error::CliResult;

/// Command-line overrides for the generator settings.
#[derive(Debug, Default)]
pub struct GenerateArgs {
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
    pub transactions: Option<u32>,
    pub customers: Option<u32>,
    pub apply_demand_adjustment: bool,
}

impl GenerateArgs {
    /// Apply the overrides on top of the configured settings.
    pub fn apply(self, settings: &mut GeneratorSettings) {
        if let Some(output) = self.output {
            settings.output_dir = output;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(n) = self.transactions {
            settings.total_transactions = n;
        }
        if let Some(n) = self.customers {
            settings.customer_count = n;
        }
        if self.apply_demand_adjustment {
            settings.apply_demand_adjustment = true;
        }
    }
}

/// Execute the `generate` command.
pub fn execute(mut config: TechGearConfig, args: GenerateArgs, quiet: bool) -> CliResult<()> {
    args.apply(&mut config.generator);
    let settings = &config.generator;
    debug!(?settings, "effective generator settings");

    println!("{} Generating TechGear Plus dataset", "→".bright_cyan());
    println!("  {} Seed: {}", "•".dimmed(), settings.seed.to_string().bright_yellow());
    println!(
        "  {} Window: {} to {} ({} days)",
        "•".dimmed(),
        settings.start_date.to_string().bright_yellow(),
        settings.end_date.to_string().bright_yellow(),
        settings.window_days()
    );
    println!(
        "  {} Customers: {}, transactions: {}",
        "•".dimmed(),
        format_count(settings.customer_count as usize).bright_yellow(),
        format_count(settings.total_transactions as usize).bright_yellow()
    );
    if settings.apply_demand_adjustment {
        println!("  {} Growth and seasonal pricing enabled", "•".dimmed());
    }
    println!();

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(settings.total_transactions as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );
    pb.set_message("Generating transactions...");

    let dataset =
        generate_dataset_with_progress(settings, &config.rules, |n| pb.set_position(n as u64))?;
    pb.set_message("Writing tables...");
    let paths = write_dataset(&dataset, &settings.output_dir)?;
    pb.finish_with_message("Done!");
    println!();

    println!("{} Dataset written", "✓".bright_green().bold());
    for path in paths.all() {
        println!("  {} {}", "•".dimmed(), path.display().to_string().bright_white());
    }
    println!();

    print_summary(&DatasetSummary::from_transactions(&dataset.transactions));
    Ok(())
}

fn print_summary(summary: &DatasetSummary) {
    println!("{}:", "Dataset Summary".bright_white().underline());
    println!();
    println!("  Total Revenue: {}", format_money(summary.total_revenue).bright_white());
    println!(
        "  Average Order Value: {}",
        format_money(summary.average_order_value).bright_white()
    );
    if let Some((first, last)) = summary.date_range {
        println!("  Date Range: {} to {}", first, last);
    }

    print_shares("Revenue by Category", &summary.by_category);
    print_shares("Revenue by Channel", &summary.by_channel);

    println!();
    println!("  Customer Segments:");
    for stats in &summary.by_segment {
        println!(
            "    {} {:<10} {} orders, AOV {}",
            "•".dimmed(),
            stats.segment.name(),
            format_count(stats.orders),
            format_money(stats.average_order_value)
        );
    }
}

fn print_shares(title: &str, shares: &[RevenueShare]) {
    println!();
    println!("  {}:", title);
    for share in shares {
        println!(
            "    {} {:<24} {:>16} ({:.1}%)",
            "•".dimmed(),
            share.name,
            format_money(share.revenue),
            share.percent
        );
    }
}
