use menu_profit::menu::{menu_from_raw, MenuItem, RawMenuItem};
use menu_profit::strategy::{
    apply_strategies, collect_suggestions, normalize_strategies, RawStrategy, Strategy,
};
use std::io::Write;

fn pizza_menu() -> Vec<MenuItem> {
    vec![MenuItem {
        id: "item_0".into(),
        title: "Margherita Pizza".into(),
        price: 12.0,
        category: "Pizza".into(),
        ingredients: None,
    }]
}

#[test]
fn up_price_end_to_end() {
    let menu = pizza_menu();
    let raws = vec![RawStrategy {
        tag: Some("Up Price".into()),
        dish: "Margherita Pizza".into(),
        current_price: Some(12.0),
        new_price: Some(15.0),
        ..Default::default()
    }];

    let strategies = normalize_strategies(&raws, &menu);
    match &strategies[0] {
        Strategy::Reprice { pct, .. } => assert_eq!(*pct, 25.0),
        other => panic!("expected Reprice, got {:?}", other),
    }

    let applied = apply_strategies(&menu, &strategies);
    assert_eq!(applied.updated[0].price, 15.0);
    let change = &applied.changes["item_0"];
    assert_eq!(change.price_delta, Some(3.0));
    assert_eq!(change.badges, vec!["+25% price".to_string()]);
}

#[test]
fn new_extra_end_to_end() {
    let menu = pizza_menu();
    let raws = vec![RawStrategy {
        tag: Some("New Extra".into()),
        dish: "Pizza".into(),
        action_instruction: Some("Add garlic knots".into()),
        new_price: Some(5.0),
        ..Default::default()
    }];

    let strategies = normalize_strategies(&raws, &menu);
    let applied = apply_strategies(&menu, &strategies);

    assert_eq!(applied.updated.len(), menu.len() + 1);
    let extra = applied.updated.last().unwrap();
    assert!(extra.id.starts_with("extra_"));
    assert_eq!(extra.price, 0.0);
    assert_eq!(extra.category, "Extras & Sides");
    // The base item is untouched.
    assert_eq!(applied.updated[0], menu[0]);
}

#[test]
fn normalization_is_idempotent_against_same_menu() {
    let menu = pizza_menu();
    let raws = vec![
        RawStrategy {
            tag: Some("Up Price".into()),
            dish: "Margherita".into(),
            current_price: Some(12.0),
            new_price: Some(13.5),
            ..Default::default()
        },
        RawStrategy {
            tag: Some("Reframe".into()),
            dish: "Margherita Pizza".into(),
            action_instruction: Some("Rename 'Margherita Pizza' to 'Wood-Fired Margherita'".into()),
            ..Default::default()
        },
    ];
    assert_eq!(
        normalize_strategies(&raws, &menu),
        normalize_strategies(&raws, &menu)
    );
}

#[test]
fn stale_strategy_never_aborts_the_fold() {
    let menu = pizza_menu();
    let raws = vec![
        // Names a dish no longer on the menu.
        RawStrategy {
            tag: Some("Up Price".into()),
            dish: "Lasagna".into(),
            current_price: Some(10.0),
            new_price: Some(12.0),
            ..Default::default()
        },
        RawStrategy {
            tag: Some("Up Price".into()),
            dish: "Margherita Pizza".into(),
            current_price: Some(12.0),
            new_price: Some(15.0),
            ..Default::default()
        },
    ];

    let strategies = normalize_strategies(&raws, &menu);
    match &strategies[0] {
        // Unresolved dish drops out of applies_to entirely, no sentinel id.
        Strategy::Reprice { applies_to, .. } => assert!(applies_to.is_empty()),
        other => panic!("expected Reprice, got {:?}", other),
    }

    let applied = apply_strategies(&menu, &strategies);
    assert_eq!(applied.updated[0].price, 15.0);
    assert_eq!(applied.changes.len(), 1);
}

#[test]
fn mixed_strategy_run_over_extracted_menu() {
    let raw_items = vec![
        RawMenuItem {
            dish_title: Some("Margherita Pizza".into()),
            price: Some("$12.99".into()),
            category: Some("Pizza".into()),
            ..Default::default()
        },
        RawMenuItem {
            dish_title: Some("Caesar Salad".into()),
            price: Some("$9.50".into()),
            ..Default::default()
        },
    ];
    let menu = menu_from_raw(&raw_items);
    assert_eq!(menu[1].category, "Uncategorized");

    let raws = vec![
        RawStrategy {
            tag: Some("Up price".into()),
            dish: "Caesar".into(),
            current_price: Some(9.5),
            new_price: Some(10.93),
            ..Default::default()
        },
        RawStrategy {
            tag: Some("New Combo".into()),
            dish: "Margherita Pizza".into(),
            action_instruction: Some("Pizza and salad lunch deal".into()),
            new_price: Some(19.0),
            ..Default::default()
        },
        RawStrategy {
            tag: Some("Presentation".into()),
            dish: "Caesar Salad".into(),
            rationale: Some("Serve in a chilled bowl and say so on the menu".into()),
            ..Default::default()
        },
    ];

    let strategies = normalize_strategies(&raws, &menu);
    let applied = apply_strategies(&menu, &strategies);
    let suggestions = collect_suggestions(&strategies);

    // pct = round1((10.93 - 9.5) / 9.5 * 100) = 15.1 -> delta 1.43.
    assert_eq!(applied.updated[1].price, 10.93);
    assert_eq!(applied.changes["item_1"].price_delta, Some(1.43));
    assert_eq!(
        applied.changes["item_1"].badges,
        vec!["+15.1% price".to_string()]
    );

    let combo = applied.updated.last().unwrap();
    assert_eq!(combo.id, "combo_strategy_1");
    assert_eq!(combo.category, "Combos");

    assert_eq!(
        suggestions,
        vec!["Serve in a chilled bowl and say so on the menu".to_string()]
    );

    // Untouched item has no ledger entry.
    assert!(!applied.changes.contains_key("item_0"));
}

#[test]
fn toggling_a_strategy_off_and_recomputing_is_stable() {
    let menu = pizza_menu();
    let raws = vec![
        RawStrategy {
            tag: Some("Up Price".into()),
            dish: "Margherita Pizza".into(),
            current_price: Some(12.0),
            new_price: Some(15.0),
            ..Default::default()
        },
        RawStrategy {
            tag: Some("New Extra".into()),
            dish: "Pizza".into(),
            action_instruction: Some("Add burrata".into()),
            new_price: Some(6.0),
            ..Default::default()
        },
    ];
    let strategies = normalize_strategies(&raws, &menu);

    // All on.
    let all_on = apply_strategies(&menu, &strategies);
    assert_eq!(all_on.updated.len(), 2);
    assert_eq!(all_on.updated[0].price, 15.0);

    // Reprice toggled off: only the extra remains.
    let enabled: Vec<_> = strategies
        .iter()
        .filter(|s| s.id() != "strategy_0")
        .cloned()
        .collect();
    let partial = apply_strategies(&menu, &enabled);
    assert_eq!(partial.updated[0].price, 12.0);
    assert_eq!(partial.updated.len(), 2);

    // Toggling back on reproduces the original result.
    let again = apply_strategies(&menu, &strategies);
    assert_eq!(again.updated, all_on.updated);
    assert_eq!(again.changes, all_on.changes);
}

#[test]
fn strategies_replay_from_saved_json_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"[{{"tag": "Up Price", "dish": "Margherita Pizza", "currentPrice": 12, "newPrice": 15}}]"#
    )
    .expect("write strategies");

    let json = std::fs::read_to_string(file.path()).expect("read back");
    let raws: Vec<RawStrategy> = serde_json::from_str(&json).expect("parse saved strategies");

    let menu = pizza_menu();
    let strategies = normalize_strategies(&raws, &menu);
    let applied = apply_strategies(&menu, &strategies);
    assert_eq!(applied.updated[0].price, 15.0);
}
