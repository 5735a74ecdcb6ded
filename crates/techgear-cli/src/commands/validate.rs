//! `techgear validate` command - Check the persisted dataset.

use std::path::PathBuf;

use colored::{ColoredString, Colorize};
use techgear_data::config::TechGearConfig;
use techgear_data::validation::{validate_dataset, CheckStatus, ValidationReport};
use techgear_data::DataError;
use tracing::debug;

use super::{format_count, format_money};
use crate::error::CliResult;

/// Execute the `validate` command.
///
/// Missing input tables are reported and treated as a clean exit.
pub fn execute(mut config: TechGearConfig, data_dir: Option<PathBuf>) -> CliResult<()> {
    if let Some(dir) = data_dir {
        config.validator.data_dir = dir;
    }
    let settings = &config.validator;
    debug!(?settings, "effective validator settings");

    println!("{} Validating TechGear Plus dataset", "→".bright_cyan());
    println!(
        "  {} Data directory: {}",
        "•".dimmed(),
        settings.data_dir.display().to_string().bright_yellow()
    );
    println!();

    let report = match validate_dataset(settings) {
        Ok(report) => report,
        Err(DataError::MissingInput { paths }) => {
            println!("{} Error loading data files:", "✗".bright_red());
            for path in &paths {
                println!("  {} {}", "•".dimmed(), path.display().to_string().bright_white());
            }
            println!(
                "  Ensure the CSV files are in {} (run `techgear generate` first)",
                settings.data_dir.display().to_string().bright_white()
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{} Successfully loaded all datasets", "✓".bright_green());
    print_report(&report);
    Ok(())
}

fn status_label(status: CheckStatus) -> ColoredString {
    match status {
        CheckStatus::Pass => format!("✓ {}", status).bright_green(),
        CheckStatus::Review => format!("⚠ {}", status).yellow(),
        CheckStatus::Fail => format!("✗ {}", status).bright_red(),
    }
}

fn print_report(report: &ValidationReport) {
    let metrics = &report.metrics;
    println!();
    println!("{}:", "Dataset Sizes".bright_white().underline());
    println!("  Customers: {} records", format_count(metrics.customers));
    println!("  Products: {} records", format_count(metrics.products));
    println!("  Transactions: {} records", format_count(metrics.transactions));

    println!();
    println!("{}:", "Business Logic Validation".bright_white().underline());
    println!(
        "  Revenue Calculation: {} (difference {:.2})",
        status_label(report.revenue.status),
        report.revenue.total_difference
    );
    let range = match (report.date_range.min_date, report.date_range.max_date) {
        (Some(min), Some(max)) => format!("{} to {}", min, max),
        _ => "no dates".to_string(),
    };
    println!("  Date Range ({}): {}", range, status_label(report.date_range.status));
    let consistency = &report.customer_consistency;
    println!(
        "  Customer Consistency: {} ({} of {} customers ordered, {} active)",
        status_label(consistency.status),
        format_count(consistency.transaction_customers),
        format_count(consistency.customer_rows),
        format_count(consistency.active_customers)
    );

    println!();
    println!("{}:", "Category Performance Summary".bright_white().underline());
    for rollup in &report.categories {
        println!(
            "  {}: {} orders, {} revenue, {} customers",
            rollup.category.bright_white(),
            format_count(rollup.orders),
            format_money(rollup.revenue),
            format_count(rollup.customers)
        );
    }

    println!();
    println!("{}:", "Data Quality Summary".bright_white().underline());
    let counts = [&report.missing_values, &report.duplicate_ids];
    for ((name, status), counts) in report.quality_checks().into_iter().zip(counts) {
        println!(
            "  {}: {} (customers {}, products {}, transactions {})",
            name,
            status_label(status),
            counts.customers,
            counts.products,
            counts.transactions
        );
    }

    println!();
    println!("{}:", "Key Metrics Validation".bright_white().underline());
    println!("  Total Revenue: {}", format_money(metrics.total_revenue));
    println!("  Average Order Value: {}", format_money(metrics.average_order_value));
    println!("  Business Model: {}", metrics.business_model.to_string().bright_white());

    println!();
    println!(
        "Overall Data Quality Score: {}",
        format!("{:.1}%", report.quality_score()).bright_white().bold()
    );
    if report.all_passed() {
        println!("{} Validation complete, all checks passed", "✓".bright_green().bold());
    } else {
        println!("{} Validation complete, some checks need review", "⚠".yellow().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techgear_data::factory::generate_dataset;
    use techgear_data::tables::write_dataset;

    #[test]
    fn test_missing_input_is_clean_exit() {
        let dir = tempfile::tempdir().unwrap();
        let result = execute(TechGearConfig::default(), Some(dir.path().to_path_buf()));
        assert!(result.is_ok());
    }

    #[test]
    fn test_validates_generated_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TechGearConfig::default();
        config.generator.total_transactions = 80;
        config.generator.customer_count = 50;

        let dataset = generate_dataset(&config.generator, &config.rules).unwrap();
        write_dataset(&dataset, dir.path()).unwrap();

        assert!(execute(config, Some(dir.path().to_path_buf())).is_ok());
    }

    #[test]
    fn test_malformed_table_is_error() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["techgear_products.csv", "techgear_customers.csv", "techgear_transactions.csv"] {
            std::fs::write(dir.path().join(name), "unrelated\n1\n").unwrap();
        }
        let result = execute(TechGearConfig::default(), Some(dir.path().to_path_buf()));
        assert!(result.is_err());
    }
}
