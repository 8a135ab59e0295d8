#![allow(dead_code)]

use std::sync::Mutex;

use budget_engine::{
    config::ConfigManager,
    domain::{BudgetItem, CurrencyLimit, ExpenseCategory},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a config manager backed by a unique directory.
pub fn config_manager() -> ConfigManager {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    ConfigManager::with_base_dir(base).expect("create config manager for temp dir")
}

pub struct Catalog {
    pub food: ExpenseCategory,
    pub rent: ExpenseCategory,
    pub travel: ExpenseCategory,
    pub gifts: ExpenseCategory,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            food: ExpenseCategory::new("food", "Food").with_icon("utensils", "#f59e0b"),
            rent: ExpenseCategory::new("rent", "Rent").with_icon("home", "#3b82f6"),
            travel: ExpenseCategory::new("travel", "Travel").with_icon("plane", "#10b981"),
            gifts: ExpenseCategory::new("gifts", "Gifts").with_icon("gift", "#ec4899"),
        }
    }

    pub fn all(&self) -> Vec<ExpenseCategory> {
        vec![
            self.food.clone(),
            self.rent.clone(),
            self.travel.clone(),
            self.gifts.clone(),
        ]
    }
}

pub fn legacy_item(category: &ExpenseCategory, planned: f64, mandatory: f64) -> BudgetItem {
    BudgetItem::legacy(category.id, planned, mandatory)
}

pub fn travel_limits(category: &ExpenseCategory) -> BudgetItem {
    BudgetItem::multi_currency(
        category.id,
        vec![
            CurrencyLimit::new("USD", 300.0, 100.0, 150.0),
            CurrencyLimit::new("EUR", 200.0, 0.0, 250.0),
        ],
    )
}
