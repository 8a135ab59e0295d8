//! Joins the category catalog with sparse budget items into one row per category.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{BudgetItem, BudgetItemShape, CategoryIcon, ExpenseCategory, HiddenCategories};

use super::limit_service::{CurrencyLimitFigures, LimitCalculator, LimitFigures};

/// Financing of a category from a savings fund.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundFinancing {
    pub fund_id: Uuid,
    pub allocation: f64,
}

/// Derived view-model for one category. Rebuilt on every pass, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetRow {
    pub category: CategoryIcon,
    pub item_id: Option<Uuid>,
    /// A budget item exists or money was already spent in the category.
    pub has_item: bool,
    pub is_hidden: bool,
    pub shape: BudgetItemShape,
    /// Category-level figures. For multi-currency items these are nominal
    /// sums across currencies.
    pub figures: LimitFigures,
    pub currency_limits: Vec<CurrencyLimitFigures>,
    pub fund: Option<FundFinancing>,
}

impl BudgetRow {
    pub fn category_id(&self) -> Uuid {
        self.category.id
    }

    pub fn is_multi_currency(&self) -> bool {
        !self.currency_limits.is_empty()
    }
}

/// Entry of the show/hide menu. Every category appears, hidden or not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryToggle {
    pub category_id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub visible: bool,
    pub has_item: bool,
}

pub struct CategoryMergeService;

impl CategoryMergeService {
    /// Produces one row per category in catalog order.
    ///
    /// Categories without an item get zero figures. Rows are never dropped
    /// here; hidden categories are only flagged.
    pub fn merge(
        categories: &[ExpenseCategory],
        items: &[BudgetItem],
        actuals: &HashMap<Uuid, f64>,
        hidden: &HiddenCategories,
    ) -> Vec<BudgetRow> {
        let mut by_category: HashMap<Uuid, &BudgetItem> = HashMap::with_capacity(items.len());
        for item in items {
            if by_category.contains_key(&item.category_id) {
                tracing::debug!(
                    category_id = %item.category_id,
                    item_id = %item.id,
                    "ignoring duplicate budget item for category"
                );
                continue;
            }
            by_category.insert(item.category_id, item);
        }

        let rows: Vec<BudgetRow> = categories
            .iter()
            .map(|category| {
                let item = by_category.get(&category.id).copied();
                let spent = actuals.get(&category.id).copied();
                Self::build_row(category, item, spent, hidden.contains(category.id))
            })
            .collect();

        let known: HashSet<Uuid> = categories.iter().map(|category| category.id).collect();
        let orphaned = by_category.keys().filter(|id| !known.contains(id)).count();
        tracing::debug!(
            categories = categories.len(),
            items = items.len(),
            orphaned,
            hidden = hidden.len(),
            "merged budget rows"
        );
        rows
    }

    fn build_row(
        category: &ExpenseCategory,
        item: Option<&BudgetItem>,
        spent: Option<f64>,
        is_hidden: bool,
    ) -> BudgetRow {
        let shape = item.map_or(BudgetItemShape::Legacy, BudgetItem::shape);
        let (figures, currency_limits) = match (item, shape) {
            (Some(item), BudgetItemShape::MultiCurrency) => {
                let limits: Vec<CurrencyLimitFigures> = item
                    .currency_limits
                    .iter()
                    .map(LimitCalculator::for_currency_limit)
                    .collect();
                let figures = LimitFigures::nominal_sum(limits.iter().map(|limit| &limit.figures));
                (figures, limits)
            }
            (Some(item), BudgetItemShape::Legacy) => {
                let actual = spent.unwrap_or(item.actual_amount);
                let figures =
                    LimitCalculator::legacy(item.planned_amount, item.planned_expenses_sum, actual);
                (figures, Vec::new())
            }
            (None, _) => (
                LimitCalculator::legacy(0.0, 0.0, spent.unwrap_or(0.0)),
                Vec::new(),
            ),
        };

        BudgetRow {
            category: category.icon(),
            item_id: item.map(|item| item.id),
            has_item: item.is_some() || spent.unwrap_or(0.0) > 0.0,
            is_hidden,
            shape,
            figures,
            currency_limits,
            fund: item.and_then(|item| {
                item.fund_id.map(|fund_id| FundFinancing {
                    fund_id,
                    allocation: item.fund_allocation.unwrap_or(0.0),
                })
            }),
        }
    }

    /// Rows that contribute to totals.
    pub fn visible_rows(rows: &[BudgetRow]) -> impl Iterator<Item = &BudgetRow> {
        rows.iter().filter(|row| !row.is_hidden)
    }

    /// Builds the show/hide menu from the full row set.
    pub fn visibility_menu(rows: &[BudgetRow]) -> Vec<CategoryToggle> {
        rows.iter()
            .map(|row| CategoryToggle {
                category_id: row.category.id,
                name: row.category.name.clone(),
                icon: row.category.icon.clone(),
                color: row.category.color.clone(),
                visible: !row.is_hidden,
                has_item: row.has_item,
            })
            .collect()
    }
}
