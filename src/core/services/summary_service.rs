use serde::{Deserialize, Serialize};

use crate::currency::CurrencyCode;
use crate::domain::{BudgetPeriod, BudgetSnapshot, HiddenCategories};

use super::bucket_service::{CurrencyBucketAggregator, CurrencyTotals};
use super::merge_service::{BudgetRow, CategoryMergeService, CategoryToggle};

/// Footer totals over visible rows. Cross-currency amounts are summed nominally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BudgetTotals {
    pub planned: f64,
    pub mandatory: f64,
    pub buffer: f64,
    pub actual: f64,
    pub variance: f64,
    /// Limit left to spend, matching the per-currency bucket `remaining`.
    pub remaining: f64,
}

impl BudgetTotals {
    pub fn from_rows(rows: &[BudgetRow]) -> Self {
        let mut totals = CategoryMergeService::visible_rows(rows).fold(
            Self::default(),
            |mut totals, row| {
                totals.planned += row.figures.total_planned;
                totals.mandatory += row.figures.mandatory_amount;
                totals.buffer += row.figures.buffer_amount;
                totals.actual += row.figures.actual_amount;
                totals
            },
        );
        totals.variance = totals.planned - totals.actual;
        totals.remaining = totals.variance;
        totals
    }

    pub fn is_over_budget(&self) -> bool {
        self.variance < 0.0
    }
}

/// Everything a budget table needs for one render pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetReport {
    pub period: Option<BudgetPeriod>,
    pub rows: Vec<BudgetRow>,
    pub totals: BudgetTotals,
    pub currency_totals: CurrencyTotals,
    pub toggles: Vec<CategoryToggle>,
}

pub struct SummaryService;

impl SummaryService {
    /// Runs the merge, limit, and bucket passes over a snapshot.
    pub fn budget_report(
        snapshot: &BudgetSnapshot,
        hidden: &HiddenCategories,
        default_currency: &CurrencyCode,
    ) -> BudgetReport {
        let rows = CategoryMergeService::merge(
            &snapshot.categories,
            &snapshot.items,
            &snapshot.actuals,
            hidden,
        );
        let totals = BudgetTotals::from_rows(&rows);
        let currency_totals = CurrencyBucketAggregator::aggregate(&rows, default_currency);
        let toggles = CategoryMergeService::visibility_menu(&rows);
        BudgetReport {
            period: snapshot.period,
            rows,
            totals,
            currency_totals,
            toggles,
        }
    }
}
