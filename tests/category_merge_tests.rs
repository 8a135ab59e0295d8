mod common;

use std::collections::HashMap;

use budget_engine::{
    core::services::CategoryMergeService,
    domain::{BudgetItemShape, HiddenCategories},
};
use common::{legacy_item, travel_limits, Catalog};
use uuid::Uuid;

#[test]
fn every_category_gets_a_row_in_catalog_order() {
    let catalog = Catalog::new();
    let items = vec![legacy_item(&catalog.rent, 40_000.0, 40_000.0)];
    let rows = CategoryMergeService::merge(
        &catalog.all(),
        &items,
        &HashMap::new(),
        &HiddenCategories::new(),
    );

    let codes: Vec<&str> = rows.iter().map(|row| row.category.code.as_str()).collect();
    assert_eq!(codes, vec!["food", "rent", "travel", "gifts"]);
    assert!(rows[1].has_item);
    assert_eq!(rows[1].item_id, Some(items[0].id));
    assert!(!rows[0].has_item);
}

#[test]
fn category_without_item_or_spend_is_all_zeros() {
    let catalog = Catalog::new();
    let rows = CategoryMergeService::merge(
        &catalog.all(),
        &[],
        &HashMap::new(),
        &HiddenCategories::new(),
    );
    for row in &rows {
        assert!(!row.has_item);
        assert_eq!(row.figures.total_planned, 0.0);
        assert_eq!(row.figures.actual_amount, 0.0);
        assert_eq!(row.figures.variance, 0.0);
        assert_eq!(row.figures.progress_percent, 0.0);
        assert!(!row.figures.is_over_budget);
    }
}

#[test]
fn spend_without_item_marks_row_as_having_data() {
    let catalog = Catalog::new();
    let actuals = HashMap::from([(catalog.gifts.id, 1_500.0)]);
    let rows = CategoryMergeService::merge(
        &catalog.all(),
        &[],
        &actuals,
        &HiddenCategories::new(),
    );
    let gifts = rows.iter().find(|row| row.category_id() == catalog.gifts.id).unwrap();
    assert!(gifts.has_item);
    assert_eq!(gifts.item_id, None);
    assert_eq!(gifts.figures.actual_amount, 1_500.0);
    assert!(gifts.figures.is_over_budget);
    assert_eq!(gifts.figures.progress_percent, 100.0);
    assert_eq!(gifts.figures.over_budget_percent, 0.0);
}

#[test]
fn actual_spend_map_drives_legacy_actuals() {
    let catalog = Catalog::new();
    let items = vec![legacy_item(&catalog.food, 20_000.0, 5_000.0)];
    let actuals = HashMap::from([(catalog.food.id, 12_000.0)]);
    let rows = CategoryMergeService::merge(
        &catalog.all(),
        &items,
        &actuals,
        &HiddenCategories::new(),
    );
    let food = &rows[0];
    assert_eq!(food.shape, BudgetItemShape::Legacy);
    assert_eq!(food.figures.buffer_amount, 15_000.0);
    assert_eq!(food.figures.mandatory_amount, 5_000.0);
    assert_eq!(food.figures.total_planned, 20_000.0);
    assert_eq!(food.figures.variance, 8_000.0);
    assert_eq!(food.figures.progress_percent, 60.0);
}

#[test]
fn multi_currency_row_sums_buffers_nominally() {
    let catalog = Catalog::new();
    let rows = CategoryMergeService::merge(
        &catalog.all(),
        &[travel_limits(&catalog.travel)],
        &HashMap::new(),
        &HiddenCategories::new(),
    );
    let travel = &rows[2];
    assert_eq!(travel.shape, BudgetItemShape::MultiCurrency);
    assert_eq!(travel.currency_limits.len(), 2);
    assert_eq!(travel.figures.buffer_amount, 100.0);
    assert_eq!(travel.figures.total_planned, 600.0);
    assert_eq!(travel.figures.actual_amount, 400.0);

    let eur = &travel.currency_limits[1];
    assert_eq!(eur.currency.as_str(), "EUR");
    assert!(eur.figures.is_over_budget);
    assert_eq!(eur.figures.over_budget_percent, 25.0);
    assert_eq!(eur.figures.progress_percent, 100.0);
}

#[test]
fn hidden_categories_stay_in_rows_and_toggle_menu() {
    let catalog = Catalog::new();
    let mut hidden = HiddenCategories::new();
    hidden.hide(catalog.rent.id);
    let rows = CategoryMergeService::merge(
        &catalog.all(),
        &[legacy_item(&catalog.rent, 40_000.0, 0.0)],
        &HashMap::new(),
        &hidden,
    );
    assert_eq!(rows.len(), 4);
    assert!(rows[1].is_hidden);
    assert_eq!(CategoryMergeService::visible_rows(&rows).count(), 3);

    let menu = CategoryMergeService::visibility_menu(&rows);
    let rent = menu.iter().find(|toggle| toggle.category_id == catalog.rent.id).unwrap();
    assert!(!rent.visible);
    assert!(rent.has_item);
    assert_eq!(rent.icon, "home");
}

#[test]
fn fund_financing_is_carried_on_the_row() {
    let catalog = Catalog::new();
    let fund_id = Uuid::new_v4();
    let item = legacy_item(&catalog.travel, 50_000.0, 0.0).with_fund(fund_id, 30_000.0);
    let rows = CategoryMergeService::merge(
        &catalog.all(),
        &[item],
        &HashMap::new(),
        &HiddenCategories::new(),
    );
    let fund = rows[2].fund.as_ref().expect("fund financing");
    assert_eq!(fund.fund_id, fund_id);
    assert_eq!(fund.allocation, 30_000.0);
    assert!(rows[0].fund.is_none());
}

#[test]
fn first_item_wins_for_duplicate_category() {
    let catalog = Catalog::new();
    let first = legacy_item(&catalog.food, 100.0, 0.0);
    let second = legacy_item(&catalog.food, 900.0, 0.0);
    let rows = CategoryMergeService::merge(
        &catalog.all(),
        &[first.clone(), second],
        &HashMap::new(),
        &HiddenCategories::new(),
    );
    assert_eq!(rows[0].item_id, Some(first.id));
    assert_eq!(rows[0].figures.planned_amount, 100.0);
}
