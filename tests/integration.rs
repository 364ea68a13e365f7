//! Integration tests for BasketForge

use basketforge::{
    encode, filter_rules, generate_rules, load_transactions, mine, sort_rules, Metric, MineError,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// Create a test CSV file with sample retail data
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country"
    )
    .unwrap();

    // Invoice 1: milk + bread
    writeln!(file, "536365,10001,MILK,1,2010-12-01T08:26:00,1.20,17850,United Kingdom").unwrap();
    writeln!(file, "536365,10002,BREAD,2,2010-12-01T08:26:00,0.80,17850,United Kingdom").unwrap();

    // Invoice 2: milk + bread + eggs
    writeln!(file, "536366,10001,MILK,1,2010-12-01T09:00:00,1.20,13047,United Kingdom").unwrap();
    writeln!(file, "536366,10002,BREAD,1,2010-12-01T09:00:00,0.80,13047,United Kingdom").unwrap();
    writeln!(file, "536366,10003,EGGS,6,2010-12-01T09:00:00,2.10,13047,United Kingdom").unwrap();

    // Invoice 3: bread only
    writeln!(file, "536367,10002,BREAD,1,2010-12-01T09:30:00,0.80,12345,United Kingdom").unwrap();

    // Invoice 4: milk only
    writeln!(file, "536368,10001,MILK,2,2010-12-01T10:00:00,1.20,54321,United Kingdom").unwrap();

    // A credit note and the invoice it reverses: both must be dropped
    writeln!(file, "536369,10003,EGGS,6,2010-12-01T10:30:00,2.10,54321,United Kingdom").unwrap();
    writeln!(file, "C536369,10003,EGGS,-6,2010-12-02T10:30:00,2.10,54321,United Kingdom").unwrap();

    file
}

#[test]
fn test_end_to_end_pipeline() {
    let test_file = create_test_csv();
    let file_path = test_file.path().to_str().unwrap();

    // Load and clean
    let data = load_transactions(file_path).unwrap();
    assert_eq!(data.transactions.len(), 4); // credit-note pair removed
    assert_eq!(data.n_unique_items(), 3);

    // Encode and mine at the boundary threshold
    let encoded = encode(&data.transactions).unwrap();
    assert_eq!(encoded.vocabulary, vec!["BREAD", "EGGS", "MILK"]);

    let itemsets = mine(&encoded, 0.5).unwrap();
    // milk (0.75), bread (0.75) and the boundary pair {milk, bread} (0.5)
    assert_eq!(itemsets.len(), 3);
    let ranked = itemsets.ranked();
    assert_eq!(ranked[0].0, vec!["BREAD"]);
    assert!((ranked[0].1 - 0.75).abs() < 1e-9);
    assert_eq!(ranked[2].0, vec!["BREAD", "MILK"]);
    assert!((ranked[2].1 - 0.5).abs() < 1e-9);

    // Rules at confidence >= 0.5
    let mut rules = generate_rules(&itemsets, Metric::Confidence, 0.5).unwrap();
    assert_eq!(rules.len(), 2);
    sort_rules(&mut rules, Metric::Confidence);
    for rule in &rules {
        assert!((rule.support - 0.5).abs() < 1e-9);
        assert!((rule.confidence - 2.0 / 3.0).abs() < 1e-9);
        assert!((rule.lift - 8.0 / 9.0).abs() < 1e-9);
    }
}

#[test]
fn test_invalid_support_threshold() {
    let test_file = create_test_csv();
    let data = load_transactions(test_file.path().to_str().unwrap()).unwrap();
    let encoded = encode(&data.transactions).unwrap();

    let err = mine(&encoded, 1.1).unwrap_err();
    assert!(matches!(err, MineError::InvalidThreshold(_)));
}

#[test]
fn test_empty_transaction_collection() {
    let err = encode(&[]).unwrap_err();
    assert!(matches!(err, MineError::Validation(_)));
}

#[test]
fn test_non_overlapping_baskets_produce_no_rules() {
    let transactions: Vec<Vec<String>> = vec![
        vec!["APPLES".to_string()],
        vec!["PEARS".to_string()],
        vec!["PLUMS".to_string()],
    ];
    let encoded = encode(&transactions).unwrap();
    let itemsets = mine(&encoded, 0.3).unwrap();
    assert_eq!(itemsets.max_size(), 1);

    let rules = generate_rules(&itemsets, Metric::Lift, 0.0).unwrap();
    assert!(rules.is_empty());
}

#[test]
fn test_mining_is_idempotent() {
    let test_file = create_test_csv();
    let data = load_transactions(test_file.path().to_str().unwrap()).unwrap();
    let encoded = encode(&data.transactions).unwrap();

    let first = mine(&encoded, 0.25).unwrap();
    let second = mine(&encoded, 0.25).unwrap();
    assert_eq!(first.len(), second.len());
    for (key, &support) in &first.support {
        assert!((second.support[key] - support).abs() < 1e-12);
    }

    let mut rules_a = generate_rules(&first, Metric::Lift, 0.0).unwrap();
    let mut rules_b = generate_rules(&second, Metric::Lift, 0.0).unwrap();
    sort_rules(&mut rules_a, Metric::Lift);
    sort_rules(&mut rules_b, Metric::Lift);
    assert_eq!(rules_a, rules_b);
}

#[test]
fn test_anti_monotonicity_on_loaded_data() {
    let test_file = create_test_csv();
    let data = load_transactions(test_file.path().to_str().unwrap()).unwrap();
    let encoded = encode(&data.transactions).unwrap();
    let itemsets = mine(&encoded, 0.25).unwrap();

    for (a, &sa) in &itemsets.support {
        for (b, &sb) in &itemsets.support {
            if a.iter().all(|item| b.contains(item)) {
                assert!(sa >= sb - 1e-12);
            }
        }
    }
}

#[test]
fn test_composed_threshold_filter() {
    let test_file = create_test_csv();
    let data = load_transactions(test_file.path().to_str().unwrap()).unwrap();
    let encoded = encode(&data.transactions).unwrap();
    let itemsets = mine(&encoded, 0.25).unwrap();
    let rules = generate_rules(&itemsets, Metric::Support, 0.0).unwrap();

    let strong = filter_rules(&rules, |r| r.lift > 1.2 && r.confidence > 0.5);
    for rule in &strong {
        assert!(rule.lift > 1.2);
        assert!(rule.confidence > 0.5);
    }
    assert!(strong.len() <= rules.len());
}
