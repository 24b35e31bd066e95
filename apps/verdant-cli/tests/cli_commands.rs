//! End-to-end checks of the cart commands as the shell uses them.

use verdant_cli_lib::commands::cart::{
    add_to_cart, decrement_item, get_cart, increment_item, load_cart, remove_from_cart,
    update_cart_item,
};
use verdant_cli_lib::error::ErrorCode;
use verdant_cli_lib::state::{AppConfig, SharedCart};
use verdant_cli_lib::{execute, Args};
use verdant_core::{CartStatus, CostPolicy, LineItem};

const SCENARIO_B: &str = r#"[
    {"name": "Shirt", "image": "shirt.png", "cost": "$20.00", "quantity": 1},
    {"name": "Hat", "image": "hat.png", "cost": "$10.00", "quantity": 3}
]"#;

fn loaded_cart(json: &str, config: &AppConfig) -> SharedCart {
    let cart = SharedCart::new(config.limits);
    load_cart(&cart, config, json).unwrap();
    cart
}

#[test]
fn test_uninitialized_cart_reports_loading() {
    let config = AppConfig::default();
    let cart = SharedCart::new(config.limits);

    let response = get_cart(&cart, &config).unwrap();
    assert_eq!(response.status, CartStatus::Loading);
    assert!(response.totals.is_none());

    let empty = loaded_cart("[]", &config);
    let response = get_cart(&empty, &config).unwrap();
    assert_eq!(response.status, CartStatus::Empty);
    assert_eq!(response.totals.unwrap().total_quantity, 0);
    assert_eq!(response.total_display.as_deref(), Some("$0.00"));
}

#[test]
fn test_scenario_totals_through_commands() {
    let config = AppConfig::default();
    let cart = loaded_cart(SCENARIO_B, &config);

    let response = get_cart(&cart, &config).unwrap();
    let totals = response.totals.unwrap();
    assert_eq!(totals.total_quantity, 4);
    assert_eq!(totals.total_cost.cents(), 5000);
    assert_eq!(response.total_display.as_deref(), Some("$50.00"));

    let response = decrement_item(&cart, &config, "Shirt").unwrap();
    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0].name, "Hat");
    assert_eq!(response.items[0].line_total_display.as_deref(), Some("$30.00"));
    assert_eq!(response.total_display.as_deref(), Some("$30.00"));
}

#[test]
fn test_displayed_lines_match_displayed_total() {
    let config = AppConfig::default();
    let cart = loaded_cart(
        r#"[
            {"name": "Fern", "cost": "$0.10", "quantity": 3},
            {"name": "Cactus", "cost": 0.2, "quantity": 7},
            {"name": "Orchid", "cost": "$19.99", "quantity": 2}
        ]"#,
        &config,
    );

    let response = get_cart(&cart, &config).unwrap();
    let lines: i64 = response
        .items
        .iter()
        .map(|line| line.line_total.unwrap().cents())
        .sum();
    assert_eq!(lines, response.totals.unwrap().total_cost.cents());
}

#[test]
fn test_mutation_errors_map_to_codes() {
    let config = AppConfig::default();
    let cart = loaded_cart(SCENARIO_B, &config);

    let err = increment_item(&cart, &config, "Umbrella").unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = update_cart_item(&cart, &config, "Hat", 1000).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    // Failed mutations leave the cart as it was
    let response = get_cart(&cart, &config).unwrap();
    assert_eq!(response.totals.unwrap().total_quantity, 4);

    // Removing twice is fine
    remove_from_cart(&cart, &config, "Hat").unwrap();
    let response = remove_from_cart(&cart, &config, "Hat").unwrap();
    assert_eq!(response.items.len(), 1);
}

#[test]
fn test_malformed_cost_policies() {
    let json = r#"[
        {"name": "Shirt", "cost": "$20.00", "quantity": 1},
        {"name": "Mystery", "cost": "N/A", "quantity": 2}
    ]"#;

    let propagate = AppConfig::default();
    let cart = SharedCart::new(propagate.limits);
    let err = load_cart(&cart, &propagate, json).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedCost);

    let exclude = AppConfig {
        cost_policy: CostPolicy::Exclude,
        ..AppConfig::default()
    };
    let response = get_cart(&cart, &exclude).unwrap();
    let totals = response.totals.unwrap();
    assert_eq!(totals.total_cost.cents(), 2000);
    assert_eq!(totals.excluded.len(), 1);
    assert!(response.items[1].cost_error.is_some());
}

#[test]
fn test_add_to_cart_merges() {
    let config = AppConfig::default();
    let cart = loaded_cart(SCENARIO_B, &config);

    let response = add_to_cart(&cart, &config, LineItem::new("Hat", "hat.png", "$10.00", 2)).unwrap();
    assert_eq!(response.items.len(), 2);
    assert_eq!(response.items[1].quantity, 5);
}

#[test]
fn test_execute_file_and_operations() {
    let path = std::env::temp_dir().join(format!("verdant-cart-{}.json", std::process::id()));
    std::fs::write(&path, SCENARIO_B).unwrap();

    let args = Args {
        file: Some(path.clone()),
        policy: Some(CostPolicy::Propagate),
        verbose: false,
        operations: ["inc", "Hat", "dec", "Shirt", "set", "Hat", "2"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    let response = execute(&args).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(response.status, CartStatus::Items);
    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0].quantity, 2);
    assert_eq!(response.total_display.as_deref(), Some("$20.00"));
}

#[test]
fn test_execute_without_file_is_loading() {
    let args = Args {
        file: None,
        policy: None,
        verbose: false,
        operations: Vec::new(),
    };

    let response = execute(&args).unwrap();
    assert_eq!(response.status, CartStatus::Loading);
}
