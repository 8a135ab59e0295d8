//! Budget items and their per-currency limits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::CurrencyCode;
use crate::domain::common::approx_eq;

/// Per-currency limit attached to a budget item.
///
/// `total_limit` is `planned_amount + buffer_amount` and `remaining` is
/// `total_limit - actual_amount` for any well-formed record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyLimit {
    pub currency: CurrencyCode,
    pub planned_amount: f64,
    pub buffer_amount: f64,
    pub total_limit: f64,
    pub actual_amount: f64,
    pub remaining: f64,
}

impl CurrencyLimit {
    pub fn new(
        currency: impl Into<CurrencyCode>,
        planned_amount: f64,
        buffer_amount: f64,
        actual_amount: f64,
    ) -> Self {
        let total_limit = planned_amount + buffer_amount;
        Self {
            currency: currency.into(),
            planned_amount,
            buffer_amount,
            total_limit,
            actual_amount,
            remaining: total_limit - actual_amount,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        approx_eq(self.total_limit, self.planned_amount + self.buffer_amount)
            && approx_eq(self.remaining, self.total_limit - self.actual_amount)
    }

    /// Re-derives `total_limit` and `remaining` from the stored components.
    pub fn normalized(&self) -> Self {
        Self::new(
            self.currency.clone(),
            self.planned_amount,
            self.buffer_amount,
            self.actual_amount,
        )
    }
}

/// Which of the two stored shapes a budget item uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetItemShape {
    /// One planned/actual pair in the default currency.
    Legacy,
    /// A list of [`CurrencyLimit`] entries.
    MultiCurrency,
}

/// Budget record for one category in one period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetItem {
    pub id: Uuid,
    pub category_id: Uuid,
    #[serde(default)]
    pub planned_amount: f64,
    #[serde(default)]
    pub actual_amount: f64,
    /// Sum of planned fixed expenses in the category.
    #[serde(default)]
    pub planned_expenses_sum: f64,
    #[serde(default)]
    pub currency_limits: Vec<CurrencyLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_allocation: Option<f64>,
}

impl BudgetItem {
    pub fn legacy(category_id: Uuid, planned_amount: f64, planned_expenses_sum: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            planned_amount,
            actual_amount: 0.0,
            planned_expenses_sum,
            currency_limits: Vec::new(),
            fund_id: None,
            fund_allocation: None,
        }
    }

    pub fn multi_currency(category_id: Uuid, currency_limits: Vec<CurrencyLimit>) -> Self {
        Self {
            currency_limits,
            ..Self::legacy(category_id, 0.0, 0.0)
        }
    }

    pub fn with_fund(mut self, fund_id: Uuid, allocation: f64) -> Self {
        self.fund_id = Some(fund_id);
        self.fund_allocation = Some(allocation);
        self
    }

    pub fn shape(&self) -> BudgetItemShape {
        if self.currency_limits.is_empty() {
            BudgetItemShape::Legacy
        } else {
            BudgetItemShape::MultiCurrency
        }
    }
}
