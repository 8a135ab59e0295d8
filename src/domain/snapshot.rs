use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BudgetItem, BudgetPeriod, ExpenseCategory};

/// Already-resolved API data for one budget period.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BudgetSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<BudgetPeriod>,
    pub categories: Vec<ExpenseCategory>,
    #[serde(default)]
    pub items: Vec<BudgetItem>,
    /// Actual spend per category; absent categories spent nothing.
    #[serde(default)]
    pub actuals: HashMap<Uuid, f64>,
}

impl BudgetSnapshot {
    pub fn new(categories: Vec<ExpenseCategory>) -> Self {
        Self {
            categories,
            ..Self::default()
        }
    }

    pub fn with_period(mut self, period: BudgetPeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_items(mut self, items: Vec<BudgetItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_actual(mut self, category_id: Uuid, amount: f64) -> Self {
        self.actuals.insert(category_id, amount);
        self
    }
}
