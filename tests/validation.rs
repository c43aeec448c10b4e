use hierarchical_transform::config::TransformConfig;
use hierarchical_transform::transform::Transformer;
use hierarchical_transform::types::{Cell, Grid};
use hierarchical_transform::validation::{validate, CustomOutcome, ValidationRules};

fn orders_table() -> Grid {
    Grid::new(
        vec![
            "customer_id".to_string(),
            "name".to_string(),
            "total".to_string(),
        ],
        vec![
            vec![Cell::from("12345"), Cell::from("John Doe"), Cell::from("500.00")],
            vec![Cell::from("12346"), Cell::from("Jane Smith"), Cell::from("750.50")],
        ],
    )
}

#[test]
fn missing_required_column_fails_with_one_error_naming_it() {
    let rules = ValidationRules::new().require_columns(vec!["amount".to_string()]);
    let result = validate(&orders_table(), &rules);

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("amount"));
}

#[test]
fn well_formed_table_passes_a_full_rule_set() {
    let rules = ValidationRules::new()
        .require_columns(vec!["customer_id".to_string(), "total".to_string()])
        .with_numeric_columns(vec!["customer_id".to_string(), "total".to_string()])
        .with_min_value("total", 0.0)
        .with_unique_columns(vec!["customer_id".to_string()])
        .with_custom(|grid: &Grid| {
            if grid.row_count() > 0 {
                CustomOutcome::pass()
            } else {
                CustomOutcome::fail("table is empty")
            }
        });

    let result = validate(&orders_table(), &rules);
    assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
}

#[test]
fn transform_output_feeds_straight_into_validate() {
    let grid = Grid::from_rows(vec![
        vec![Cell::from("Customer ID"), Cell::from("12345")],
        vec![Cell::from("Name"), Cell::from("John Doe")],
        vec![Cell::from("Order Date"), Cell::from("2024-01-15")],
        vec![Cell::from("Total"), Cell::from("500.00")],
    ]);
    let config = TransformConfig::new(
        "Customer ID",
        vec![
            "Customer ID".to_string(),
            "Name".to_string(),
            "Order Date".to_string(),
            "Total".to_string(),
        ],
    )
    .with_date_columns(vec!["order_date".to_string()]);

    let table = Transformer::new().transform(&grid, &config).unwrap();

    let rules = ValidationRules::new()
        .require_columns(vec![
            "customer_id".to_string(),
            "name".to_string(),
            "total".to_string(),
        ])
        .with_numeric_columns(vec!["total".to_string()])
        // Coerced date cells pass the format check trivially.
        .with_date_format("order_date", "%Y-%m-%d");

    let result = validate(&table, &rules);
    assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
}

#[test]
fn degenerate_transform_rows_are_caught_downstream() {
    // An identifier occurrence with no extractable fields still produces a
    // row; validation is the guard against shipping it.
    let grid = Grid::from_rows(vec![
        vec![Cell::from("Customer ID"), Cell::from("12345")],
        vec![Cell::from("Customer ID"), Cell::Null],
    ]);
    let config = TransformConfig::new("Customer ID", vec!["Customer ID".to_string()])
        .with_search_radius(1);

    let table = Transformer::new().transform(&grid, &config).unwrap();
    assert_eq!(table.row_count(), 2);

    let rules = ValidationRules::new().with_custom(|grid: &Grid| {
        let all_null_rows = grid
            .rows
            .iter()
            .filter(|row| row.iter().all(Cell::is_null))
            .count();
        if all_null_rows == 0 {
            CustomOutcome::pass()
        } else {
            CustomOutcome::fail(format!("{all_null_rows} empty record(s) in output"))
        }
    });

    let result = validate(&table, &rules);
    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["1 empty record(s) in output".to_string()]);
}

#[test]
fn mixed_rule_set_aggregates_errors_per_category() {
    let mut table = orders_table();
    table.rows[0][2] = Cell::from("free");
    table.rows[1][0] = Cell::from("12345");

    let rules = ValidationRules::new()
        .with_numeric_columns(vec!["total".to_string()])
        .with_unique_columns(vec!["customer_id".to_string()])
        .with_max_value("total", 600.0);

    let result = validate(&table, &rules);
    assert!(!result.is_valid);
    // numeric failure on total, duplicate customer_id, total above bound
    assert_eq!(result.errors.len(), 3);
}
