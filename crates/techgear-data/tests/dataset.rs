//! End-to-end tests: generate, persist, reload and validate.

use std::collections::{HashMap, HashSet};

use techgear_data::prelude::*;
use techgear_data::tables::{float_column, null_cells, string_column};

fn settings(dir: &std::path::Path, transactions: u32, customers: u32) -> GeneratorSettings {
    GeneratorSettings {
        seed: 42,
        total_transactions: transactions,
        customer_count: customers,
        output_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

fn validator(dir: &std::path::Path) -> ValidatorSettings {
    ValidatorSettings {
        data_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn test_hundred_transaction_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let generator = settings(dir.path(), 100, 200);
    let dataset = generate_dataset(&generator, &BusinessRules::default()).unwrap();
    write_dataset(&dataset, &generator.output_dir).unwrap();

    let tables = load_tables(&DatasetPaths::in_dir(dir.path())).unwrap();
    assert_eq!(tables.transactions.height(), 100);
    assert_eq!(null_cells(&tables.transactions), 0);

    let ids: HashSet<_> = string_column(&tables.transactions, "transaction_id")
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(ids.len(), 100);

    let report = validate_tables(&tables, &validator(dir.path())).unwrap();
    assert_eq!(report.revenue.status, CheckStatus::Pass);
    assert_eq!(report.duplicate_ids.status, CheckStatus::Pass);
    assert_eq!(report.date_range.status, CheckStatus::Pass);
    assert_eq!(report.metrics.transactions, 100);
}

#[test]
fn test_deleted_products_file_reports_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let generator = settings(dir.path(), 20, 20);
    let dataset = generate_dataset(&generator, &BusinessRules::default()).unwrap();
    let paths = write_dataset(&dataset, dir.path()).unwrap();

    std::fs::remove_file(&paths.products).unwrap();

    match validate_dataset(&validator(dir.path())) {
        Err(DataError::MissingInput { paths: missing }) => {
            assert_eq!(missing, vec![paths.products.clone()]);
        }
        other => panic!("expected missing input, got {other:?}"),
    }
}

#[test]
fn test_corrupted_unit_price_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let generator = settings(dir.path(), 50, 40);
    let dataset = generate_dataset(&generator, &BusinessRules::default()).unwrap();
    let paths = write_dataset(&dataset, dir.path()).unwrap();

    let text = std::fs::read_to_string(&paths.transactions).unwrap();
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    let column = lines[0].split(',').position(|h| h == "unit_price").unwrap();
    let mut fields: Vec<&str> = lines[1].split(',').collect();
    fields[column] = "abc";
    lines[1] = fields.join(",");
    std::fs::write(&paths.transactions, lines.join("\n") + "\n").unwrap();

    match validate_dataset(&validator(dir.path())) {
        Err(DataError::Validation(message)) => assert!(message.contains("unit_price"), "{message}"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_backfilled_metrics_survive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let generator = settings(dir.path(), 1_000, 300);
    let dataset = generate_dataset(&generator, &BusinessRules::default()).unwrap();
    write_dataset(&dataset, dir.path()).unwrap();
    let tables = load_tables(&DatasetPaths::in_dir(dir.path())).unwrap();

    let mut expected: HashMap<String, (f64, f64, String)> = HashMap::new();
    let tx_customers = string_column(&tables.transactions, "customer_id").unwrap();
    let tx_totals = float_column(&tables.transactions, "total_amount").unwrap();
    let tx_dates = string_column(&tables.transactions, "order_date").unwrap();
    for ((customer, total), date) in tx_customers.into_iter().zip(tx_totals).zip(tx_dates) {
        let entry = expected
            .entry(customer.unwrap())
            .or_insert((0.0, 0.0, String::new()));
        entry.0 += 1.0;
        entry.1 += total.unwrap();
        // ISO dates order lexically
        entry.2 = entry.2.clone().max(date.unwrap());
    }

    let ids = string_column(&tables.customers, "customer_id").unwrap();
    let orders = float_column(&tables.customers, "total_orders").unwrap();
    let spent = float_column(&tables.customers, "total_spent").unwrap();
    let last = string_column(&tables.customers, "last_order_date").unwrap();

    for i in 0..ids.len() {
        let id = ids[i].as_ref().unwrap();
        match expected.get(id) {
            Some((n, sum, latest)) => {
                assert_eq!(orders[i], Some(*n));
                assert!((spent[i].unwrap() - sum).abs() < 0.01, "{id}");
                assert_eq!(last[i].as_ref(), Some(latest));
            }
            None => {
                assert_eq!(orders[i], Some(0.0));
                assert_eq!(spent[i], Some(0.0));
                assert_eq!(last[i], None);
            }
        }
    }
}

#[test]
fn test_referential_integrity_and_category_volume() {
    let dir = tempfile::tempdir().unwrap();
    let rules = BusinessRules::default();
    let dataset = generate_dataset(&settings(dir.path(), 2_000, 500), &rules).unwrap();

    let products: HashMap<_, _> = dataset
        .products
        .iter()
        .map(|p| (p.product_id.as_str(), p))
        .collect();
    let customers: HashSet<_> = dataset.customers.iter().map(|c| c.customer_id.as_str()).collect();

    for tx in &dataset.transactions {
        let product = products[tx.product_id.as_str()];
        assert_eq!(product.category, tx.product_category);
        assert!(customers.contains(tx.customer_id.as_str()));
    }

    let mut per_category: HashMap<&str, u32> = HashMap::new();
    for tx in &dataset.transactions {
        *per_category.entry(tx.product_category.as_str()).or_default() += 1;
    }
    assert_eq!(per_category.values().sum::<u32>(), 2_000);
    assert_eq!(per_category["Laptops & Computers"], 700);
    assert_eq!(per_category["Smart Home Devices"], 100);
}

#[test]
fn test_summary_matches_validation_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = generate_dataset(&settings(dir.path(), 500, 100), &BusinessRules::default()).unwrap();
    write_dataset(&dataset, dir.path()).unwrap();

    let summary = DatasetSummary::from_transactions(&dataset.transactions);
    let report = validate_dataset(&validator(dir.path())).unwrap();

    assert!((summary.total_revenue - report.metrics.total_revenue).abs() < 0.01);
    assert!((summary.average_order_value - report.metrics.average_order_value).abs() < 0.01);
    assert_eq!(summary.date_range.map(|(lo, _)| lo), report.date_range.min_date);
    assert_eq!(summary.date_range.map(|(_, hi)| hi), report.date_range.max_date);
}
